use std::fmt;

use stx_wire::ByteCursor;
use stx_wire::hash::{Hash160, Hash32, VrfProof};

use crate::bounded::capacity_for;
use crate::error::TypeError;
use crate::transaction::StacksTransaction;

/// Encoded size of an anchored block header as read by
/// [`StacksHeaderDecoder`].
pub const STACKS_BLOCK_HEADER_ENCODED_SIZE: usize = 1 + 16 + 80 + 32 + 32 + 2 + 32 + 32 + 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StacksWorkScore {
  /// Burn tokens destroyed so far.
  pub burn: u64,
  pub work: u64,
}

/// Anchored block header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StacksBlockHeader {
  pub version: u8,
  pub total_work: StacksWorkScore,
  pub proof: VrfProof,
  pub parent_block: Hash32,
  pub parent_microblock: Hash32,
  pub parent_microblock_sequence: u16,
  pub tx_merkle_root: Hash32,
  pub state_index_root: Hash32,
  pub microblock_pubkey_hash: Hash160,
}

/// Decodes the header in front of each block's transaction list.
///
/// Header layout is owned by whoever implements this trait; the block list
/// decoder only calls it once per block and expects the cursor to be left
/// just past the header.
pub trait BlockHeaderDecoder: Send + Sync {
  /// # Errors
  ///
  /// Any [`TypeError`]; it aborts the enclosing block list.
  fn decode_header(&self, cursor: &mut ByteCursor) -> Result<StacksBlockHeader, TypeError>;

  /// Fewest bytes a header can occupy on the wire.
  ///
  /// Bounds how much the block list reserves up front for a declared
  /// count. Variable-width decoders should return their smallest case.
  fn min_encoded_size(&self) -> usize;
}

/// Count prefix of each block's transaction list.
const TX_COUNT_ENCODED_SIZE: usize = 4;

/// Default header decoder for the fixed 247-byte anchored header.
///
/// ```text
/// ┌─────────────────────────────┬──────────┐
/// │ Field                       │ Size     │
/// ├─────────────────────────────┼──────────┤
/// │ version                     │ 1        │
/// │ total_work.burn             │ 8        │
/// │ total_work.work             │ 8        │
/// │ proof                       │ 80       │
/// │ parent_block                │ 32       │
/// │ parent_microblock           │ 32       │
/// │ parent_microblock_sequence  │ 2        │
/// │ tx_merkle_root              │ 32       │
/// │ state_index_root            │ 32       │
/// │ microblock_pubkey_hash      │ 20       │
/// └─────────────────────────────┴──────────┘
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StacksHeaderDecoder;

impl BlockHeaderDecoder for StacksHeaderDecoder {
  fn decode_header(&self, cursor: &mut ByteCursor) -> Result<StacksBlockHeader, TypeError> {
    let mut block = cursor.split_block(STACKS_BLOCK_HEADER_ENCODED_SIZE)?;
    Ok(StacksBlockHeader {
      version: block.read_u8()?,
      total_work: StacksWorkScore {
        burn: block.read_u64()?,
        work: block.read_u64()?,
      },
      proof: VrfProof::read_from(&mut block)?,
      parent_block: Hash32::read_from(&mut block)?,
      parent_microblock: Hash32::read_from(&mut block)?,
      parent_microblock_sequence: block.read_u16()?,
      tx_merkle_root: Hash32::read_from(&mut block)?,
      state_index_root: Hash32::read_from(&mut block)?,
      microblock_pubkey_hash: Hash160::read_from(&mut block)?,
    })
  }

  fn min_encoded_size(&self) -> usize {
    STACKS_BLOCK_HEADER_ENCODED_SIZE
  }
}

/// A block: header plus its transactions in wire order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StacksBlock {
  pub header: StacksBlockHeader,
  pub txs: Vec<StacksTransaction>,
}

impl StacksBlock {
  /// Decode a u32 count followed by that many (header, transaction list)
  /// pairs.
  ///
  /// # Errors
  ///
  /// The first error from the header decoder or the transaction decoder.
  pub fn read_list(
    cursor: &mut ByteCursor,
    headers: &dyn BlockHeaderDecoder,
  ) -> Result<Vec<Self>, TypeError> {
    let count = cursor.read_u32()?;
    let min_block = headers.min_encoded_size() + TX_COUNT_ENCODED_SIZE;
    let mut blocks = Vec::with_capacity(capacity_for::<Self>(count, cursor, min_block));
    for _ in 0..count {
      let header = headers.decode_header(cursor)?;
      let txs = StacksTransaction::read_list(cursor)?;
      blocks.push(Self { header, txs });
    }
    Ok(blocks)
  }
}

impl fmt::Display for StacksBlockHeader {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "v{} parent={} burn={} work={}",
      self.version, self.parent_block, self.total_work.burn, self.total_work.work
    )
  }
}
