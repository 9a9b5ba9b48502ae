//! Segmentation and reassembly of payloads for data channels that only
//! accept bounded-size messages.
//!
//! A sender picks a limit from a [`SizeProfile`], splits the payload with
//! [`chunk_binary`] or [`chunk_text`], and hands the chunks to its transport
//! one at a time. The receiver feeds them, in delivery order, to
//! [`assemble`] / [`assemble_binary`] (or an incremental [`Assembler`]).

mod binary;
mod codec;
mod integrity;
mod profile;
mod reassembly;
mod text;
mod types;

pub use binary::{BinaryChunks, chunk_binary};
pub use codec::{decode_base64, encode_base64, encode_base64_blocking, encode_base64_with};
pub use integrity::{Fingerprint, checksum_bytes};
pub use profile::{
    EndpointQuirk, FILE_CHUNK_SIZE, FIREFOX_FILE_CHUNK_SIZE, SizeProfile, TEXT_CHUNK_SIZE,
};
pub use reassembly::{Assembler, AssemblyPolicy, assemble, assemble_binary};
pub use text::{TextChunks, chunk_text};
pub use types::{Chunk, ChunkSequence, Payload, Representation};

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("invalid chunk size limit: {0}")]
    InvalidLimit(usize),

    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("malformed chunk at index {index}: {reason}")]
    MalformedChunk { index: usize, reason: String },

    #[error("invalid size profile: {0}")]
    InvalidProfile(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("encode task failed: {0}")]
    EncodeTask(String),
}
