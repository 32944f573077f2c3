use stx_wire::ByteCursor;
use stx_wire::hash::{Hash160, MessageSignature, PublicKeyBytes};

use crate::bounded::capacity_for;
use crate::enums::{AuthFieldType, HashMode, PublicKeyEncoding, TransactionAuthType};
use crate::error::TypeError;

/// Single-sig body after the hash-mode byte:
/// signer (20) + nonce (8) + fee rate (8) + key encoding (1) + signature (65).
pub const SINGLESIG_BODY_ENCODED_SIZE: usize = 102;

/// Fixed multi-sig prefix after the hash-mode byte:
/// signer (20) + nonce (8) + fee rate (8) + auth-field count (4).
pub const MULTISIG_PREFIX_ENCODED_SIZE: usize = 40;

/// Smallest possible auth field: tag + public key.
const MIN_AUTH_FIELD_ENCODED_SIZE: usize = 1 + PublicKeyBytes::ENCODED_SIZE;

/// One entry of a multi-sig spending condition.
///
/// The tag byte decides which of the two is present and how the key it
/// carries (directly, or recoverable from the signature) is encoded.
///
/// ```text
/// ┌──────┬──────────────────────┬──────────────┐
/// │ Tag  │ Field                │ Body         │
/// ├──────┼──────────────────────┼──────────────┤
/// │ 0x00 │ compressed key       │ 33 bytes     │
/// │ 0x01 │ uncompressed key     │ 33 bytes     │
/// │ 0x02 │ compressed sig       │ 65 bytes     │
/// │ 0x03 │ uncompressed sig     │ 65 bytes     │
/// └──────┴──────────────────────┴──────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthField {
  PublicKey {
    encoding: PublicKeyEncoding,
    key: PublicKeyBytes,
  },
  Signature {
    encoding: PublicKeyEncoding,
    signature: MessageSignature,
  },
}

impl AuthField {
  /// Decode one tagged auth field.
  ///
  /// # Errors
  ///
  /// - [`TypeError::InvalidEnumValue`] for an unknown tag.
  /// - [`TypeError::Wire`] if the body is truncated.
  pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
    let field = match AuthFieldType::read_from(cursor)? {
      AuthFieldType::PublicKeyCompressed => Self::PublicKey {
        encoding: PublicKeyEncoding::Compressed,
        key: PublicKeyBytes::read_from(cursor)?,
      },
      AuthFieldType::PublicKeyUncompressed => Self::PublicKey {
        encoding: PublicKeyEncoding::Uncompressed,
        key: PublicKeyBytes::read_from(cursor)?,
      },
      AuthFieldType::SignatureCompressed => Self::Signature {
        encoding: PublicKeyEncoding::Compressed,
        signature: MessageSignature::read_from(cursor)?,
      },
      AuthFieldType::SignatureUncompressed => Self::Signature {
        encoding: PublicKeyEncoding::Uncompressed,
        signature: MessageSignature::read_from(cursor)?,
      },
    };
    Ok(field)
  }

  /// The wire tag this field was decoded from.
  #[must_use]
  pub fn field_type(&self) -> AuthFieldType {
    match self {
      Self::PublicKey { encoding: PublicKeyEncoding::Compressed, .. } => AuthFieldType::PublicKeyCompressed,
      Self::PublicKey { encoding: PublicKeyEncoding::Uncompressed, .. } => AuthFieldType::PublicKeyUncompressed,
      Self::Signature { encoding: PublicKeyEncoding::Compressed, .. } => AuthFieldType::SignatureCompressed,
      Self::Signature { encoding: PublicKeyEncoding::Uncompressed, .. } => AuthFieldType::SignatureUncompressed,
    }
  }

  /// Raw body bytes (33 for a key, 65 for a signature).
  #[must_use]
  pub fn body(&self) -> &[u8] {
    match self {
      Self::PublicKey { key, .. } => key.as_bytes(),
      Self::Signature { signature, .. } => signature.as_bytes(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinglesigSpendingCondition {
  /// Always [`HashMode::P2PKH`] or [`HashMode::P2WPKH`].
  pub hash_mode: HashMode,
  pub signer: Hash160,
  pub nonce: u64,
  pub fee_rate: u64,
  pub key_encoding: PublicKeyEncoding,
  pub signature: MessageSignature,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigSpendingCondition {
  /// Always [`HashMode::P2SH`] or [`HashMode::P2WSH`].
  pub hash_mode: HashMode,
  pub signer: Hash160,
  pub nonce: u64,
  pub fee_rate: u64,
  /// Keys and signatures in wire order.
  pub fields: Vec<AuthField>,
}

/// Proof of authorization to spend from an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpendingCondition {
  Singlesig(SinglesigSpendingCondition),
  Multisig(MultisigSpendingCondition),
}

impl SpendingCondition {
  /// Decode a spending condition, dispatching on its hash-mode byte.
  ///
  /// Wire layout:
  ///
  /// ```text
  ///   single-sig: mode │ signer(20) nonce(8) fee(8) key_enc(1) sig(65)
  ///   multi-sig:  mode │ signer(20) nonce(8) fee(8) count(4) │ count × AuthField
  /// ```
  ///
  /// The fixed part of each layout is claimed as one block before any of
  /// its fields are read.
  ///
  /// # Errors
  ///
  /// - [`TypeError::InvalidEnumValue`] for an unknown hash mode, key
  ///   encoding, or auth-field tag.
  /// - [`TypeError::Wire`] if the condition is truncated.
  pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
    let hash_mode = HashMode::read_from(cursor)?;

    if hash_mode.is_singlesig() {
      let mut block = cursor.split_block(SINGLESIG_BODY_ENCODED_SIZE)?;
      return Ok(Self::Singlesig(SinglesigSpendingCondition {
        hash_mode,
        signer: Hash160::read_from(&mut block)?,
        nonce: block.read_u64()?,
        fee_rate: block.read_u64()?,
        key_encoding: PublicKeyEncoding::read_from(&mut block)?,
        signature: MessageSignature::read_from(&mut block)?,
      }));
    }

    let mut block = cursor.split_block(MULTISIG_PREFIX_ENCODED_SIZE)?;
    let signer = Hash160::read_from(&mut block)?;
    let nonce = block.read_u64()?;
    let fee_rate = block.read_u64()?;
    let count = block.read_u32()?;

    let capacity = capacity_for::<AuthField>(count, cursor, MIN_AUTH_FIELD_ENCODED_SIZE);
    let mut fields = Vec::with_capacity(capacity);
    for _ in 0..count {
      fields.push(AuthField::read_from(cursor)?);
    }

    Ok(Self::Multisig(MultisigSpendingCondition {
      hash_mode,
      signer,
      nonce,
      fee_rate,
      fields,
    }))
  }

  #[must_use]
  pub fn hash_mode(&self) -> HashMode {
    match self {
      Self::Singlesig(c) => c.hash_mode,
      Self::Multisig(c) => c.hash_mode,
    }
  }

  #[must_use]
  pub fn signer(&self) -> &Hash160 {
    match self {
      Self::Singlesig(c) => &c.signer,
      Self::Multisig(c) => &c.signer,
    }
  }

  #[must_use]
  pub fn nonce(&self) -> u64 {
    match self {
      Self::Singlesig(c) => c.nonce,
      Self::Multisig(c) => c.nonce,
    }
  }

  #[must_use]
  pub fn fee_rate(&self) -> u64 {
    match self {
      Self::Singlesig(c) => c.fee_rate,
      Self::Multisig(c) => c.fee_rate,
    }
  }
}

/// Transaction authorization: the origin's spending condition, plus a
/// sponsor's when someone else pays the fee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionAuth {
  Standard(SpendingCondition),
  Sponsored {
    origin: SpendingCondition,
    sponsor: SpendingCondition,
  },
}

impl TransactionAuth {
  /// # Errors
  ///
  /// [`TypeError::InvalidEnumValue`] for an unknown auth type, plus any
  /// error from [`SpendingCondition::read_from`].
  pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
    match TransactionAuthType::read_from(cursor)? {
      TransactionAuthType::Standard => Ok(Self::Standard(SpendingCondition::read_from(cursor)?)),
      TransactionAuthType::Sponsored => {
        let origin = SpendingCondition::read_from(cursor)?;
        let sponsor = SpendingCondition::read_from(cursor)?;
        Ok(Self::Sponsored { origin, sponsor })
      }
    }
  }

  #[must_use]
  pub fn auth_type(&self) -> TransactionAuthType {
    match self {
      Self::Standard(_) => TransactionAuthType::Standard,
      Self::Sponsored { .. } => TransactionAuthType::Sponsored,
    }
  }

  #[must_use]
  pub fn origin(&self) -> &SpendingCondition {
    match self {
      Self::Standard(origin) | Self::Sponsored { origin, .. } => origin,
    }
  }

  #[must_use]
  pub fn sponsor(&self) -> Option<&SpendingCondition> {
    match self {
      Self::Standard(_) => None,
      Self::Sponsored { sponsor, .. } => Some(sponsor),
    }
  }
}
