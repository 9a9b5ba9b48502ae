use serde::{Deserialize, Serialize};

use crate::{ChunkError, Representation};

/// Maximum bytes per binary chunk on a standards-conformant endpoint.
pub const FILE_CHUNK_SIZE: usize = 49_152;

/// Maximum bytes per binary chunk when the receiver re-fragments large
/// messages unpredictably.
pub const FIREFOX_FILE_CHUNK_SIZE: usize = 12_288;

/// Maximum characters per text (base64) chunk.
pub const TEXT_CHUNK_SIZE: usize = 1_212;

/// Receiving-endpoint behavior that affects the binary limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointQuirk {
    #[default]
    Conformant,
    /// The endpoint splits large messages on its own; use the smaller limit.
    Refragmenting,
}

/// Named chunk-size limits, passed explicitly to whoever chunks.
///
/// Deserializes from camelCase JSON; missing keys take their defaults and
/// the result is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SizeProfileFields")]
pub struct SizeProfile {
    file_chunk_size: usize,
    firefox_file_chunk_size: usize,
    text_chunk_size: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SizeProfileFields {
    file_chunk_size: usize,
    firefox_file_chunk_size: usize,
    text_chunk_size: usize,
}

impl Default for SizeProfileFields {
    fn default() -> Self {
        Self {
            file_chunk_size: FILE_CHUNK_SIZE,
            firefox_file_chunk_size: FIREFOX_FILE_CHUNK_SIZE,
            text_chunk_size: TEXT_CHUNK_SIZE,
        }
    }
}

impl TryFrom<SizeProfileFields> for SizeProfile {
    type Error = ChunkError;

    fn try_from(f: SizeProfileFields) -> Result<Self, Self::Error> {
        SizeProfile::new(f.file_chunk_size, f.firefox_file_chunk_size, f.text_chunk_size)
    }
}

impl Default for SizeProfile {
    fn default() -> Self {
        Self {
            file_chunk_size: FILE_CHUNK_SIZE,
            firefox_file_chunk_size: FIREFOX_FILE_CHUNK_SIZE,
            text_chunk_size: TEXT_CHUNK_SIZE,
        }
    }
}

impl SizeProfile {
    /// Creates a profile, rejecting zero limits and a refragmenting limit
    /// larger than the standard one.
    pub fn new(
        file_chunk_size: usize,
        firefox_file_chunk_size: usize,
        text_chunk_size: usize,
    ) -> Result<Self, ChunkError> {
        if file_chunk_size == 0 || firefox_file_chunk_size == 0 || text_chunk_size == 0 {
            return Err(ChunkError::InvalidProfile(
                "chunk sizes must be positive".into(),
            ));
        }
        if firefox_file_chunk_size > file_chunk_size {
            return Err(ChunkError::InvalidProfile(format!(
                "firefoxFileChunkSize ({firefox_file_chunk_size}) exceeds fileChunkSize ({file_chunk_size})"
            )));
        }
        Ok(Self {
            file_chunk_size,
            firefox_file_chunk_size,
            text_chunk_size,
        })
    }

    /// Parses and validates a profile from JSON.
    pub fn from_json(json: &str) -> Result<Self, ChunkError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn file_chunk_size(&self) -> usize {
        self.file_chunk_size
    }

    pub fn firefox_file_chunk_size(&self) -> usize {
        self.firefox_file_chunk_size
    }

    pub fn text_chunk_size(&self) -> usize {
        self.text_chunk_size
    }

    /// Picks the limit for a payload representation and endpoint.
    ///
    /// Text payloads ignore the quirk.
    pub fn limit_for(&self, representation: Representation, quirk: EndpointQuirk) -> usize {
        match (representation, quirk) {
            (Representation::Text, _) => self.text_chunk_size,
            (Representation::Binary, EndpointQuirk::Conformant) => self.file_chunk_size,
            (Representation::Binary, EndpointQuirk::Refragmenting) => {
                self.firefox_file_chunk_size
            }
        }
    }
}
