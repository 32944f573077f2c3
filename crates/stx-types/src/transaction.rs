use stx_wire::ByteCursor;

use crate::auth::TransactionAuth;
use crate::bounded::capacity_for;
use crate::enums::{PostConditionMode, TransactionAnchorMode, TransactionVersion};
use crate::error::TypeError;
use crate::payload::TransactionPayload;
use crate::post_condition::PostCondition;

/// Smallest possible transaction: version, chain id, standard single-sig
/// auth, two mode bytes, empty post-condition list, payload tag.
const MIN_TRANSACTION_ENCODED_SIZE: usize = 1 + 4 + 1 + 103 + 2 + 4 + 1;

/// A decoded Stacks transaction.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────┐
/// │ Field                │ Encoding                             │
/// ├──────────────────────┼──────────────────────────────────────┤
/// │ version              │ u8 tag                               │
/// │ chain_id             │ u32 BE                               │
/// │ auth                 │ tag + 1 or 2 spending conditions     │
/// │ anchor_mode          │ u8 tag                               │
/// │ post_condition_mode  │ u8 tag                               │
/// │ post_conditions      │ u32 count + entries                  │
/// │ payload              │ tag + body                           │
/// └──────────────────────┴──────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StacksTransaction {
  pub version: TransactionVersion,
  pub chain_id: u32,
  pub auth: TransactionAuth,
  pub anchor_mode: TransactionAnchorMode,
  pub post_condition_mode: PostConditionMode,
  pub post_conditions: Vec<PostCondition>,
  pub payload: TransactionPayload,
}

impl StacksTransaction {
  /// Decode one transaction.
  ///
  /// There is no length prefix per transaction, so a failure anywhere
  /// leaves the cursor at an unknown offset; callers must treat the rest of
  /// the enclosing batch as lost.
  ///
  /// # Errors
  ///
  /// Any [`TypeError`] from the nested decoders.
  pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
    let version = TransactionVersion::read_from(cursor)?;
    let chain_id = cursor.read_u32()?;
    let auth = TransactionAuth::read_from(cursor)?;
    let anchor_mode = TransactionAnchorMode::read_from(cursor)?;
    let post_condition_mode = PostConditionMode::read_from(cursor)?;
    let post_conditions = PostCondition::read_list(cursor)?;
    let payload = TransactionPayload::read_from(cursor)?;

    Ok(Self {
      version,
      chain_id,
      auth,
      anchor_mode,
      post_condition_mode,
      post_conditions,
      payload,
    })
  }

  /// Decode a u32 count followed by that many transactions, in order.
  ///
  /// # Errors
  ///
  /// The first error from [`read_from`](Self::read_from); no partial list
  /// is returned.
  pub fn read_list(cursor: &mut ByteCursor) -> Result<Vec<Self>, TypeError> {
    let count = cursor.read_u32()?;
    let capacity = capacity_for::<Self>(count, cursor, MIN_TRANSACTION_ENCODED_SIZE);
    let mut txs = Vec::with_capacity(capacity);
    for _ in 0..count {
      txs.push(Self::read_from(cursor)?);
    }
    Ok(txs)
  }

  /// Convenience wrapper decoding a transaction from a byte slice.
  ///
  /// Trailing bytes after the transaction are ignored.
  ///
  /// # Errors
  ///
  /// Same as [`read_from`](Self::read_from).
  pub fn decode(bytes: &[u8]) -> Result<Self, TypeError> {
    Self::read_from(&mut ByteCursor::new(bytes.to_vec()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::auth::SpendingCondition;
  use crate::payload::CoinbasePayload;
  use stx_wire::WireError;

  fn coinbase_tx(anchor: u8, pc_mode: u8) -> Vec<u8> {
    let mut buf = vec![0x00];
    buf.extend_from_slice(&1u32.to_be_bytes());
    buf.push(0x04);
    buf.push(0x00);
    buf.extend_from_slice(&[0x11; 20]);
    buf.extend_from_slice(&0u64.to_be_bytes());
    buf.extend_from_slice(&0u64.to_be_bytes());
    buf.push(0x00);
    buf.extend_from_slice(&[0x22; 65]);
    buf.push(anchor);
    buf.push(pc_mode);
    buf.extend_from_slice(&0u32.to_be_bytes());
    buf.push(0x04);
    buf.extend_from_slice(&[0u8; 32]);
    buf
  }

  #[test]
  fn minimal_coinbase_transaction() {
    let bytes = coinbase_tx(0x01, 0x02);
    assert_eq!(bytes.len(), MIN_TRANSACTION_ENCODED_SIZE + 32);

    let tx = StacksTransaction::decode(&bytes).unwrap();
    assert_eq!(tx.version, TransactionVersion::Mainnet);
    assert_eq!(tx.chain_id, 1);
    assert!(matches!(tx.auth, TransactionAuth::Standard(SpendingCondition::Singlesig(_))));
    assert_eq!(tx.anchor_mode, TransactionAnchorMode::OnChainOnly);
    assert_eq!(tx.post_condition_mode, PostConditionMode::Deny);
    assert!(tx.post_conditions.is_empty());
    assert_eq!(tx.payload, TransactionPayload::Coinbase(CoinbasePayload([0; 32])));
  }

  #[test]
  fn bad_anchor_mode_fails() {
    let bytes = coinbase_tx(0x03, 0x01);
    assert!(matches!(
      StacksTransaction::decode(&bytes),
      Err(TypeError::InvalidEnumValue { enum_name: "TransactionAnchorMode", value: 0x03 })
    ));
  }

  #[test]
  fn bad_post_condition_mode_fails() {
    let bytes = coinbase_tx(0x01, 0x00);
    assert!(matches!(
      StacksTransaction::decode(&bytes),
      Err(TypeError::InvalidEnumValue { enum_name: "PostConditionMode", value: 0x00 })
    ));
  }

  #[test]
  fn list_decodes_in_wire_order() {
    let mut bytes = 2u32.to_be_bytes().to_vec();
    bytes.extend(coinbase_tx(0x01, 0x01));
    bytes.extend(coinbase_tx(0x02, 0x02));
    let mut cursor = ByteCursor::new(bytes);

    let txs = StacksTransaction::read_list(&mut cursor).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].anchor_mode, TransactionAnchorMode::OnChainOnly);
    assert_eq!(txs[1].anchor_mode, TransactionAnchorMode::OffChainOnly);
    assert!(cursor.is_exhausted());
  }

  #[test]
  fn list_fails_on_missing_transaction() {
    let mut bytes = 2u32.to_be_bytes().to_vec();
    bytes.extend(coinbase_tx(0x01, 0x01));
    assert!(matches!(
      StacksTransaction::read_list(&mut ByteCursor::new(bytes)),
      Err(TypeError::Wire(WireError::CursorUnderflow { .. }))
    ));
  }
}
