//! Binary ⇄ base64 text conversion for channels that only carry text.

use std::borrow::Cow;

use base64::{Engine, engine::general_purpose::STANDARD};
use tokio::task::JoinHandle;

use crate::ChunkError;

/// Decodes standard base64 into raw bytes.
///
/// ASCII whitespace (line breaks inserted by transports into long encoded
/// text) is stripped before decoding. Anything else outside the alphabet is
/// a [`ChunkError::Decode`].
pub fn decode_base64(text: &str) -> Result<Vec<u8>, ChunkError> {
    let compact: Cow<'_, str> = if text.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(text.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(text)
    };
    Ok(STANDARD.decode(compact.as_bytes())?)
}

/// Encodes on the calling thread.
pub fn encode_base64_blocking(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Encodes on the blocking pool without holding up the calling task.
///
/// Resolves once with the full text. Must be awaited inside a tokio runtime.
pub async fn encode_base64(data: Vec<u8>) -> Result<String, ChunkError> {
    tokio::task::spawn_blocking(move || STANDARD.encode(&data))
        .await
        .map_err(|e| ChunkError::EncodeTask(e.to_string()))
}

/// Callback form of [`encode_base64`].
///
/// `completion` runs exactly once, on a blocking-pool thread. It may run
/// before or after this function returns; callers must not assume either.
/// Aborting the returned handle does not stop an encode that has already
/// started; callers that lose interest must ignore the late callback.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn encode_base64_with<F>(data: Vec<u8>, completion: F) -> JoinHandle<()>
where
    F: FnOnce(String) + Send + 'static,
{
    tokio::task::spawn_blocking(move || completion(STANDARD.encode(&data)))
}
