use tracing::{trace, warn};

use crate::ChunkError;
use crate::types::{Chunk, Payload, Representation};

/// What to do with a chunk that cannot be appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssemblyPolicy {
    /// Log the chunk and skip it; the result is best-effort.
    #[default]
    Lenient,
    /// Surface [`ChunkError::MalformedChunk`] to the caller.
    Strict,
}

/// Concatenates base64 text chunks in the order given.
///
/// Entries that are not base64 text fragments (wrong representation, or any
/// character outside the base64 alphabet, `=` and ASCII whitespace) are
/// logged and skipped. Text payloads must therefore be base64.
pub fn assemble<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let mut assembler = Assembler::new(Representation::Text);
    for chunk in chunks {
        assembler.append(chunk);
    }
    match assembler.finish() {
        Payload::Text(text) => text,
        Payload::Binary(_) => String::new(),
    }
}

/// Concatenates binary chunks in the order given.
///
/// Entries of the wrong representation are logged and skipped.
pub fn assemble_binary<'a, I>(chunks: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let mut assembler = Assembler::new(Representation::Binary);
    for chunk in chunks {
        assembler.append(chunk);
    }
    match assembler.finish() {
        Payload::Binary(data) => data,
        Payload::Text(_) => Vec::new(),
    }
}

/// Incremental receiver-side reassembly.
///
/// Chunks are appended in arrival order; no reordering or sequence checks
/// happen here. A chunk refused under [`AssemblyPolicy::Strict`] leaves the
/// assembler unchanged, so the same position can be pushed again.
#[derive(Debug)]
pub struct Assembler {
    representation: Representation,
    policy: AssemblyPolicy,
    binary: Vec<u8>,
    text: String,
    received: usize,
    skipped: usize,
}

impl Assembler {
    /// Creates a lenient assembler for `representation`.
    pub fn new(representation: Representation) -> Self {
        Self {
            representation,
            policy: AssemblyPolicy::default(),
            binary: Vec::new(),
            text: String::new(),
            received: 0,
            skipped: 0,
        }
    }

    pub fn with_policy(mut self, policy: AssemblyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Appends the next chunk.
    ///
    /// Only fails under [`AssemblyPolicy::Strict`].
    pub fn push(&mut self, chunk: Chunk) -> Result<(), ChunkError> {
        match self.check(&chunk) {
            Ok(()) => {
                self.extend(&chunk);
                Ok(())
            }
            Err(reason) => self.malformed(reason),
        }
    }

    /// Records a chunk that never made it to a [`Chunk`] (e.g. its framing
    /// could not be decoded), applying the policy as for a bad chunk.
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), ChunkError> {
        self.malformed(reason.into())
    }

    /// Appends `chunk` or skips it, whatever the policy.
    fn append(&mut self, chunk: &Chunk) {
        match self.check(chunk) {
            Ok(()) => self.extend(chunk),
            Err(reason) => self.skip(reason),
        }
    }

    fn check(&self, chunk: &Chunk) -> Result<(), String> {
        match (self.representation, chunk) {
            (Representation::Binary, Chunk::Binary(_)) => Ok(()),
            (Representation::Text, Chunk::Text(text)) => {
                match text.chars().find(|c| !is_base64_char(*c)) {
                    Some(bad) => Err(format!("unexpected character {bad:?}")),
                    None => Ok(()),
                }
            }
            (expected, chunk) => Err(format!(
                "expected {expected:?} chunk, got {:?}",
                chunk.representation()
            )),
        }
    }

    fn extend(&mut self, chunk: &Chunk) {
        match chunk {
            Chunk::Binary(data) => self.binary.extend_from_slice(data),
            Chunk::Text(text) => self.text.push_str(text),
        }
        trace!(index = self.received, len = chunk.len(), "appended chunk");
        self.received += 1;
    }

    fn skip(&mut self, reason: String) {
        warn!(index = self.received, %reason, "skipping malformed chunk");
        self.received += 1;
        self.skipped += 1;
    }

    fn malformed(&mut self, reason: String) -> Result<(), ChunkError> {
        match self.policy {
            AssemblyPolicy::Lenient => {
                self.skip(reason);
                Ok(())
            }
            AssemblyPolicy::Strict => Err(ChunkError::MalformedChunk {
                index: self.received,
                reason,
            }),
        }
    }

    /// Chunks taken so far, appended or skipped. Chunks refused under the
    /// strict policy are not counted.
    pub fn received(&self) -> usize {
        self.received
    }

    /// Chunks dropped as malformed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Assembled length so far in bytes. Accepted text is base64, so for
    /// text this is also the character count.
    pub fn len(&self) -> usize {
        match self.representation {
            Representation::Binary => self.binary.len(),
            Representation::Text => self.text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn finish(self) -> Payload {
        match self.representation {
            Representation::Binary => Payload::Binary(self.binary),
            Representation::Text => Payload::Text(self.text),
        }
    }
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=') || c.is_ascii_whitespace()
}
