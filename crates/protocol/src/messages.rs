use serde::{Deserialize, Serialize};

use peerchunk_transfer::{
    Chunk, ChunkError, Representation, decode_base64, encode_base64_blocking,
};

use crate::ProtocolError;

/// One chunk of a transfer, as sent over the channel.
///
/// Binary chunks carry their bytes as standard base64 in `data`; text
/// chunks carry the fragment verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMessage {
    pub transfer_id: String,
    pub index: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_last: bool,
    pub representation: Representation,
    pub data: String,
}

impl ChunkMessage {
    /// Wraps `chunk` for sending.
    pub fn from_chunk(
        transfer_id: impl Into<String>,
        index: u32,
        is_last: bool,
        chunk: &Chunk,
    ) -> Self {
        let data = match chunk {
            Chunk::Binary(bytes) => encode_base64_blocking(bytes),
            Chunk::Text(text) => text.clone(),
        };
        Self {
            transfer_id: transfer_id.into(),
            index,
            is_last,
            representation: chunk.representation(),
            data,
        }
    }

    /// Recovers the chunk carried by this message.
    pub fn to_chunk(&self) -> Result<Chunk, ChunkError> {
        match self.representation {
            Representation::Binary => Ok(Chunk::Binary(decode_base64(&self.data)?)),
            Representation::Text => Ok(Chunk::Text(self.data.clone())),
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn is_false(v: &bool) -> bool {
    !v
}
