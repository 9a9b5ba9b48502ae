use tracing::{debug, warn};

use peerchunk_transfer::{
    Assembler, AssemblyPolicy, ChunkSequence, Payload, Representation,
};

use crate::ProtocolError;
use crate::messages::ChunkMessage;

/// Wraps every chunk of `seq` in a [`ChunkMessage`], numbering from 0 and
/// flagging the final one.
pub fn frame(transfer_id: &str, seq: &ChunkSequence) -> Result<Vec<ChunkMessage>, ProtocolError> {
    let last = seq.len().saturating_sub(1);
    seq.iter()
        .enumerate()
        .map(|(i, chunk)| -> Result<ChunkMessage, ProtocolError> {
            let index = u32::try_from(i).map_err(|_| ProtocolError::TooManyChunks(seq.len()))?;
            Ok(ChunkMessage::from_chunk(transfer_id, index, i == last, chunk))
        })
        .collect()
}

/// Receiver side of one framed transfer.
///
/// Messages must arrive in send order. Chunks whose body cannot be turned
/// back into a chunk go through the assembler's malformed-chunk policy.
pub struct Collector {
    transfer_id: String,
    next_index: u32,
    assembler: Option<Assembler>,
}

impl Collector {
    /// Creates a lenient collector for `transfer_id`.
    pub fn new(transfer_id: impl Into<String>, representation: Representation) -> Self {
        Self {
            transfer_id: transfer_id.into(),
            next_index: 0,
            assembler: Some(Assembler::new(representation)),
        }
    }

    pub fn with_policy(mut self, policy: AssemblyPolicy) -> Self {
        self.assembler = self.assembler.map(|a| a.with_policy(policy));
        self
    }

    pub fn transfer_id(&self) -> &str {
        &self.transfer_id
    }

    /// Returns `true` once the last message has been accepted.
    pub fn is_complete(&self) -> bool {
        self.assembler.is_none()
    }

    /// Number of messages accepted so far. A message refused under
    /// [`AssemblyPolicy::Strict`] is not counted and may be sent again.
    pub fn received(&self) -> u32 {
        self.next_index
    }

    /// Feeds the next message.
    ///
    /// Returns the reassembled payload when `message.is_last` is set.
    pub fn accept(&mut self, message: ChunkMessage) -> Result<Option<Payload>, ProtocolError> {
        if message.transfer_id != self.transfer_id {
            return Err(ProtocolError::WrongTransfer {
                expected: self.transfer_id.clone(),
                got: message.transfer_id,
            });
        }
        let Some(assembler) = self.assembler.as_mut() else {
            return Err(ProtocolError::AlreadyComplete);
        };
        if message.index != self.next_index {
            return Err(ProtocolError::UnexpectedIndex {
                expected: self.next_index,
                got: message.index,
            });
        }
        let next_index = self
            .next_index
            .checked_add(1)
            .ok_or(ProtocolError::TooManyChunks(u32::MAX as usize))?;

        match message.to_chunk() {
            Ok(chunk) => assembler.push(chunk)?,
            Err(e) => {
                warn!(transfer_id = %self.transfer_id, index = message.index, error = %e, "undecodable chunk body");
                assembler.reject(e.to_string())?;
            }
        }
        // Refused chunks leave the index open for a resend.
        self.next_index = next_index;

        if !message.is_last {
            return Ok(None);
        }
        let Some(assembler) = self.assembler.take() else {
            return Err(ProtocolError::AlreadyComplete);
        };
        debug!(
            transfer_id = %self.transfer_id,
            chunks = self.next_index,
            skipped = assembler.skipped(),
            len = assembler.len(),
            "transfer complete"
        );
        Ok(Some(assembler.finish()))
    }
}
