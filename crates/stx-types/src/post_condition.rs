use num_bigint::BigUint;
use stx_wire::{ByteCursor, ByteOrder};

use crate::address::StacksAddress;
use crate::bounded::capacity_for;
use crate::enums::{AssetInfoId, FungibleConditionCode, PostConditionPrincipalId};
use crate::error::TypeError;

/// Standard principal body: version (1) + hash (20).
pub const STANDARD_PRINCIPAL_ENCODED_SIZE: usize = 21;

/// Contract principal fixed part: version (1) + hash (20) + name length (1).
pub const CONTRACT_PRINCIPAL_PREFIX_ENCODED_SIZE: usize = 22;

/// Width of amount fields in post-conditions and token transfers.
///
/// Read as an unbounded integer, so a wider encoding only changes this
/// constant.
pub const AMOUNT_ENCODED_SIZE: usize = 8;

/// STX post-condition suffix after the principal: condition code (1) +
/// amount.
pub const STX_POST_CONDITION_SUFFIX_ENCODED_SIZE: usize = 1 + AMOUNT_ENCODED_SIZE;

/// Smallest possible post-condition: asset tag + origin principal tag +
/// STX suffix.
const MIN_POST_CONDITION_ENCODED_SIZE: usize = 2 + STX_POST_CONDITION_SUFFIX_ENCODED_SIZE;

/// Whose balance a post-condition constrains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostConditionPrincipal {
  /// The transaction's origin account.
  Origin,
  Standard(StacksAddress),
  Contract {
    address: StacksAddress,
    /// ASCII contract name, at most 255 bytes.
    contract_name: String,
  },
}

impl PostConditionPrincipal {
  /// Decode a tagged principal.
  ///
  /// ```text
  ///   0x01 Origin   │ (nothing)
  ///   0x02 Standard │ version(1) hash(20)
  ///   0x03 Contract │ version(1) hash(20) name_len(1) │ name[name_len]
  /// ```
  ///
  /// The contract name is read from the same bounded cursor as everything
  /// else in the message body.
  ///
  /// # Errors
  ///
  /// - [`TypeError::InvalidEnumValue`] for an unknown principal tag.
  /// - [`TypeError::InvalidContractName`] if the name is not ASCII.
  /// - [`TypeError::Wire`] on truncation.
  pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
    match PostConditionPrincipalId::read_from(cursor)? {
      PostConditionPrincipalId::Origin => Ok(Self::Origin),
      PostConditionPrincipalId::Standard => {
        let mut block = cursor.split_block(STANDARD_PRINCIPAL_ENCODED_SIZE)?;
        Ok(Self::Standard(StacksAddress::read_from(&mut block)?))
      }
      PostConditionPrincipalId::Contract => {
        let mut block = cursor.split_block(CONTRACT_PRINCIPAL_PREFIX_ENCODED_SIZE)?;
        let address = StacksAddress::read_from(&mut block)?;
        let name_len = block.read_u8()?;

        let raw = cursor.read_bytes(usize::from(name_len))?;
        if !raw.is_ascii() {
          return Err(TypeError::InvalidContractName { raw });
        }
        let contract_name = String::from_utf8(raw)
          .map_err(|e| TypeError::InvalidContractName { raw: e.into_bytes() })?;

        Ok(Self::Contract { address, contract_name })
      }
    }
  }

  #[must_use]
  pub fn principal_id(&self) -> PostConditionPrincipalId {
    match self {
      Self::Origin => PostConditionPrincipalId::Origin,
      Self::Standard(_) => PostConditionPrincipalId::Standard,
      Self::Contract { .. } => PostConditionPrincipalId::Contract,
    }
  }
}

/// Constraint on the STX a principal sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StxPostCondition {
  pub principal: PostConditionPrincipal,
  pub condition_code: FungibleConditionCode,
  /// Amount in micro-STX.
  pub amount: BigUint,
}

/// A post-condition the transaction commits to.
///
/// Only STX post-conditions decode; fungible and non-fungible asset
/// post-conditions are recognized and reported as not implemented.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PostCondition {
  Stx(StxPostCondition),
}

impl PostCondition {
  /// # Errors
  ///
  /// - [`TypeError::InvalidEnumValue`] for an unknown asset tag, principal
  ///   tag, or condition code.
  /// - [`TypeError::NotImplemented`] for fungible and non-fungible assets.
  /// - [`TypeError::Wire`] on truncation.
  pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
    match AssetInfoId::read_from(cursor)? {
      AssetInfoId::Stx => {
        let principal = PostConditionPrincipal::read_from(cursor)?;
        let mut block = cursor.split_block(STX_POST_CONDITION_SUFFIX_ENCODED_SIZE)?;
        let condition_code = FungibleConditionCode::read_from(&mut block)?;
        let amount = block.read_uint(AMOUNT_ENCODED_SIZE, ByteOrder::BigEndian)?;
        Ok(Self::Stx(StxPostCondition {
          principal,
          condition_code,
          amount,
        }))
      }
      other @ (AssetInfoId::FungibleAsset | AssetInfoId::NonfungibleAsset) => {
        Err(other.not_implemented())
      }
    }
  }

  /// Decode a u32 count followed by that many post-conditions.
  ///
  /// # Errors
  ///
  /// Any error from [`read_from`](Self::read_from); the whole list fails
  /// with the first bad entry.
  pub fn read_list(cursor: &mut ByteCursor) -> Result<Vec<Self>, TypeError> {
    let count = cursor.read_u32()?;
    let capacity = capacity_for::<Self>(count, cursor, MIN_POST_CONDITION_ENCODED_SIZE);
    let mut list = Vec::with_capacity(capacity);
    for _ in 0..count {
      list.push(Self::read_from(cursor)?);
    }
    Ok(list)
  }

  #[must_use]
  pub fn asset_info_id(&self) -> AssetInfoId {
    match self {
      Self::Stx(_) => AssetInfoId::Stx,
    }
  }
}
