use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Computes SHA-256 of `data` and returns the hex-encoded digest.
pub fn checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Length and digest of a payload, captured before chunking and sent
/// out-of-band so the receiver can check what reassembly produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingerprint {
    pub len: u64,
    pub sha256: String,
}

impl Fingerprint {
    pub fn of(data: &[u8]) -> Self {
        Self {
            len: data.len() as u64,
            sha256: checksum_bytes(data),
        }
    }

    /// Returns `true` if `data` has the recorded length and digest.
    pub fn matches(&self, data: &[u8]) -> bool {
        self.len == data.len() as u64 && self.sha256 == checksum_bytes(data)
    }
}
