//! Optional message framing layered over `peerchunk-transfer`.
//!
//! Each chunk travels as one [`ChunkMessage`] carrying its transfer id,
//! position and a last-chunk flag, so a receiver knows which transfer a
//! message belongs to and when the payload is complete.

pub mod framing;
pub mod messages;

pub use framing::{Collector, frame};
pub use messages::ChunkMessage;

use peerchunk_transfer::ChunkError;

/// Errors produced by the framing layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Chunk(#[from] ChunkError),

    #[error("message for transfer {got}, expected {expected}")]
    WrongTransfer { expected: String, got: String },

    #[error("unexpected chunk index {got}, expected {expected}")]
    UnexpectedIndex { expected: u32, got: u32 },

    #[error("transfer already complete")]
    AlreadyComplete,

    #[error("too many chunks for one transfer: {0}")]
    TooManyChunks(usize),
}
