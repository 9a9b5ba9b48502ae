use tracing::debug;

use crate::ChunkError;
use crate::types::{Chunk, ChunkSequence, Representation};

/// Splits `text` into chunks of at most `limit` characters.
///
/// Splits only on `char` boundaries, so no code point is ever cut in half.
/// Payloads meant for [`assemble`](crate::assemble) must be base64 text;
/// the assembler skips chunks holding any other characters.
pub fn chunk_text(text: &str, limit: usize) -> Result<ChunkSequence, ChunkError> {
    let chunks = TextChunks::new(text, limit)?;
    let mut seq = ChunkSequence::with_capacity(Representation::Text, chunks.count_hint());
    for piece in chunks {
        seq.push(Chunk::Text(piece.to_owned()));
    }
    debug!(len = text.len(), limit, chunks = seq.len(), "split text payload");
    Ok(seq)
}

/// Lazily walks a string in `limit`-character slices.
pub struct TextChunks<'a> {
    rest: &'a str,
    limit: usize,
    ascii: bool,
    done: bool,
}

impl<'a> TextChunks<'a> {
    /// Returns [`ChunkError::InvalidLimit`] if `limit` is 0.
    pub fn new(text: &'a str, limit: usize) -> Result<Self, ChunkError> {
        if limit == 0 {
            return Err(ChunkError::InvalidLimit(limit));
        }
        Ok(Self {
            rest: text,
            limit,
            ascii: text.is_ascii(),
            done: false,
        })
    }

    /// Text not yet yielded.
    pub fn remaining(&self) -> &'a str {
        self.rest
    }

    fn count_hint(&self) -> usize {
        if self.ascii {
            self.rest.len().div_ceil(self.limit).max(1)
        } else {
            0
        }
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // Byte index of the first character past the limit, if any.
        let split = if self.ascii {
            (self.rest.len() > self.limit).then_some(self.limit)
        } else {
            self.rest.char_indices().nth(self.limit).map(|(i, _)| i)
        };
        match split {
            Some(at) => {
                let (head, tail) = self.rest.split_at(at);
                self.rest = tail;
                Some(head)
            }
            None => {
                self.done = true;
                Some(std::mem::take(&mut self.rest))
            }
        }
    }
}
