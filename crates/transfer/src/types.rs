use serde::{Deserialize, Serialize};

/// How a payload travels over the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Raw bytes.
    Binary,
    /// Standard base64 text of the bytes.
    Text,
}

/// A whole payload, before chunking or after reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Binary(Vec<u8>),
    Text(String),
}

impl Payload {
    /// Returns the representation tag.
    pub fn representation(&self) -> Representation {
        match self {
            Payload::Binary(_) => Representation::Binary,
            Payload::Text(_) => Representation::Text,
        }
    }

    /// Returns the raw bytes of a binary payload.
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Payload::Binary(data) => Some(data),
            Payload::Text(_) => None,
        }
    }

    /// Returns the text of a text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Binary(_) => None,
        }
    }
}

/// One bounded-size piece of a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Binary(Vec<u8>),
    Text(String),
}

impl Chunk {
    /// Returns the representation tag.
    pub fn representation(&self) -> Representation {
        match self {
            Chunk::Binary(_) => Representation::Binary,
            Chunk::Text(_) => Representation::Text,
        }
    }

    /// Size of the chunk: bytes for binary, characters for text.
    pub fn len(&self) -> usize {
        match self {
            Chunk::Binary(data) => data.len(),
            Chunk::Text(text) => text.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Chunk::Binary(data) => data.is_empty(),
            Chunk::Text(text) => text.is_empty(),
        }
    }

    /// Underlying bytes (UTF-8 bytes for text chunks).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Chunk::Binary(data) => data,
            Chunk::Text(text) => text.as_bytes(),
        }
    }
}

/// Ordered chunks of a single representation.
///
/// Concatenating the chunks in order yields the original payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSequence {
    representation: Representation,
    chunks: Vec<Chunk>,
}

impl ChunkSequence {
    pub(crate) fn with_capacity(representation: Representation, capacity: usize) -> Self {
        Self {
            representation,
            chunks: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, chunk: Chunk) {
        debug_assert_eq!(chunk.representation(), self.representation);
        self.chunks.push(chunk);
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    pub fn as_slice(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Size of every chunk, in order.
    pub fn lengths(&self) -> Vec<usize> {
        self.chunks.iter().map(Chunk::len).collect()
    }

    /// Concatenates the chunks back into a payload.
    pub fn concat(&self) -> Payload {
        match self.representation {
            Representation::Binary => {
                let total = self.chunks.iter().map(|c| c.as_bytes().len()).sum();
                let mut out = Vec::with_capacity(total);
                for chunk in &self.chunks {
                    out.extend_from_slice(chunk.as_bytes());
                }
                Payload::Binary(out)
            }
            Representation::Text => {
                let mut out = String::new();
                for chunk in &self.chunks {
                    if let Chunk::Text(text) = chunk {
                        out.push_str(text);
                    }
                }
                Payload::Text(out)
            }
        }
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

impl IntoIterator for ChunkSequence {
    type Item = Chunk;
    type IntoIter = std::vec::IntoIter<Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChunkSequence {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
