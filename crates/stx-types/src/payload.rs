use num_bigint::BigUint;
use stx_wire::{ByteCursor, ByteOrder};

use crate::address::StacksAddress;
use crate::enums::TransactionPayloadId;
use crate::error::TypeError;
use crate::post_condition::AMOUNT_ENCODED_SIZE;

/// Memo attached to a token transfer.
pub const TOKEN_TRANSFER_MEMO_ENCODED_SIZE: usize = 34;

/// Token transfer body: address version (1) + address hash (20) + amount +
/// memo (34).
pub const TOKEN_TRANSFER_ENCODED_SIZE: usize = 21 + AMOUNT_ENCODED_SIZE + TOKEN_TRANSFER_MEMO_ENCODED_SIZE;

/// Coinbase body: 32 opaque bytes.
pub const COINBASE_ENCODED_SIZE: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenTransferPayload {
  pub recipient: StacksAddress,
  /// Amount in micro-STX.
  pub amount: BigUint,
  pub memo: [u8; TOKEN_TRANSFER_MEMO_ENCODED_SIZE],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoinbasePayload(pub [u8; COINBASE_ENCODED_SIZE]);

/// Transaction-type-specific body.
///
/// ```text
/// ┌──────┬──────────────────┬─────────────────────────┐
/// │ Wire │ Payload          │ Decoded                 │
/// ├──────┼──────────────────┼─────────────────────────┤
/// │ 0x00 │ TokenTransfer    │ yes, fixed 63 bytes     │
/// │ 0x01 │ SmartContract    │ no (not implemented)    │
/// │ 0x02 │ ContractCall     │ no (not implemented)    │
/// │ 0x03 │ PoisonMicroblock │ no (not implemented)    │
/// │ 0x04 │ Coinbase         │ yes, fixed 32 bytes     │
/// └──────┴──────────────────┴─────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionPayload {
  TokenTransfer(TokenTransferPayload),
  Coinbase(CoinbasePayload),
}

impl TransactionPayload {
  /// # Errors
  ///
  /// - [`TypeError::InvalidEnumValue`] for an unknown payload tag.
  /// - [`TypeError::NotImplemented`] for smart-contract, contract-call and
  ///   poison-microblock payloads.
  /// - [`TypeError::Wire`] on truncation.
  pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
    match TransactionPayloadId::read_from(cursor)? {
      TransactionPayloadId::Coinbase => Ok(Self::Coinbase(CoinbasePayload(cursor.read_array()?))),
      TransactionPayloadId::TokenTransfer => {
        let mut block = cursor.split_block(TOKEN_TRANSFER_ENCODED_SIZE)?;
        Ok(Self::TokenTransfer(TokenTransferPayload {
          recipient: StacksAddress::read_from(&mut block)?,
          amount: block.read_uint(AMOUNT_ENCODED_SIZE, ByteOrder::BigEndian)?,
          memo: block.read_array()?,
        }))
      }
      other @ (TransactionPayloadId::SmartContract
      | TransactionPayloadId::ContractCall
      | TransactionPayloadId::PoisonMicroblock) => Err(other.not_implemented()),
    }
  }

  #[must_use]
  pub fn payload_id(&self) -> TransactionPayloadId {
    match self {
      Self::TokenTransfer(_) => TransactionPayloadId::TokenTransfer,
      Self::Coinbase(_) => TransactionPayloadId::Coinbase,
    }
  }
}
