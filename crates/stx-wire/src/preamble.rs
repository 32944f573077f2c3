use crate::cursor::ByteCursor;
use crate::error::WireError;
use crate::hash::{ConsensusHash, MessageSignature};

/// Total preamble size in bytes (fixed).
pub const PREAMBLE_ENCODED_SIZE: usize = 148;

/// Bytes occupied by the named fields: 4 + 4 + 4 + 8 + 20 + 8 + 20 + 4 + 65 + 4.
pub const PREAMBLE_FIELDS_ENCODED_SIZE: usize = 141;

/// Unassigned bytes closing out the preamble. Read and discarded.
///
/// Compatibility: the named fields only account for 141 bytes, and a peer
/// that frames its preamble as exactly those fields will not send this
/// padding. Against such a peer every message would be misframed by 7
/// bytes, starting with the first body. Lowering [`PREAMBLE_ENCODED_SIZE`]
/// to 141 drops the padding and reads that framing instead.
pub const PREAMBLE_PADDING_ENCODED_SIZE: usize = PREAMBLE_ENCODED_SIZE - PREAMBLE_FIELDS_ENCODED_SIZE;

/// The fixed header in front of every P2P message.
///
/// ```text
/// ┌────────┬──────────┬─────────────────────────────────────────┐
/// │ Offset │ Size     │ Field                                   │
/// ├────────┼──────────┼─────────────────────────────────────────┤
/// │ 0x00   │ 4 bytes  │ peer_version                            │
/// │ 0x04   │ 4 bytes  │ network_id                              │
/// │ 0x08   │ 4 bytes  │ seq                                     │
/// │ 0x0C   │ 8 bytes  │ burn_block_height                       │
/// │ 0x14   │ 20 bytes │ burn_consensus_hash                     │
/// │ 0x28   │ 8 bytes  │ burn_stable_block_height                │
/// │ 0x30   │ 20 bytes │ burn_stable_consensus_hash              │
/// │ 0x44   │ 4 bytes  │ additional_data (reserved)              │
/// │ 0x48   │ 65 bytes │ signature                               │
/// │ 0x89   │ 4 bytes  │ payload_len (relayers + message body)   │
/// │ 0x8D   │ 7 bytes  │ padding (skipped)                       │
/// └────────┴──────────┴─────────────────────────────────────────┘
/// ```
///
/// All integers are big-endian.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preamble {
    pub peer_version: u32,
    pub network_id: u32,
    pub seq: u32,
    pub burn_block_height: u64,
    pub burn_consensus_hash: ConsensusHash,
    pub burn_stable_block_height: u64,
    pub burn_stable_consensus_hash: ConsensusHash,
    /// Reserved; carried through undecoded.
    pub additional_data: u32,
    pub signature: MessageSignature,
    /// Byte length of everything after the preamble: the relayer vector
    /// plus the message body.
    pub payload_len: u32,
}

impl Preamble {
    /// Parse a preamble from the front of the cursor.
    ///
    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than
    /// [`PREAMBLE_ENCODED_SIZE`] bytes remain.
    pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, WireError> {
        // Claim the whole preamble up front so a short buffer fails before
        // any field is read.
        let mut block = cursor.split_block(PREAMBLE_ENCODED_SIZE)?;

        let preamble = Self {
            peer_version: block.read_u32()?,
            network_id: block.read_u32()?,
            seq: block.read_u32()?,
            burn_block_height: block.read_u64()?,
            burn_consensus_hash: ConsensusHash::read_from(&mut block)?,
            burn_stable_block_height: block.read_u64()?,
            burn_stable_consensus_hash: ConsensusHash::read_from(&mut block)?,
            additional_data: block.read_u32()?,
            signature: MessageSignature::read_from(&mut block)?,
            payload_len: block.read_u32()?,
        };
        block.skip(PREAMBLE_PADDING_ENCODED_SIZE)?;
        Ok(preamble)
    }
}
