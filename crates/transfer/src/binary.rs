use tracing::debug;

use crate::types::{Chunk, ChunkSequence, Representation};
use crate::ChunkError;

/// Splits `data` into chunks of at most `limit` bytes.
///
/// A payload that fits in one chunk (including an empty one) yields exactly
/// one chunk equal to the input. Otherwise every chunk but the last holds
/// `limit` bytes and the last holds the non-empty remainder.
pub fn chunk_binary(data: &[u8], limit: usize) -> Result<ChunkSequence, ChunkError> {
    let chunks = BinaryChunks::new(data, limit)?;
    let mut seq = ChunkSequence::with_capacity(Representation::Binary, chunks.count_hint());
    for slice in chunks {
        seq.push(Chunk::Binary(slice.to_vec()));
    }
    debug!(len = data.len(), limit, chunks = seq.len(), "split binary payload");
    Ok(seq)
}

/// Lazily walks a byte buffer in `limit`-sized slices.
pub struct BinaryChunks<'a> {
    data: &'a [u8],
    limit: usize,
    offset: usize,
    done: bool,
}

impl<'a> BinaryChunks<'a> {
    /// Returns [`ChunkError::InvalidLimit`] if `limit` is 0.
    pub fn new(data: &'a [u8], limit: usize) -> Result<Self, ChunkError> {
        if limit == 0 {
            return Err(ChunkError::InvalidLimit(limit));
        }
        Ok(Self {
            data,
            limit,
            offset: 0,
            done: false,
        })
    }

    /// Byte offset of the next slice.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet yielded.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn count_hint(&self) -> usize {
        if self.done {
            0
        } else {
            self.remaining().div_ceil(self.limit).max(1)
        }
    }
}

impl<'a> Iterator for BinaryChunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.remaining() <= self.limit {
            // The tail runs to the end of the buffer, not `len - 1`.
            self.done = true;
            let tail = &self.data[self.offset..];
            self.offset = self.data.len();
            return Some(tail);
        }
        let end = self.offset + self.limit;
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Some(slice)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count_hint();
        (n, Some(n))
    }
}

impl ExactSizeIterator for BinaryChunks<'_> {}
