use std::fmt;

use stx_wire::ByteCursor;
use stx_wire::hash::Hash160;

use crate::error::TypeError;

/// Encoded size of a [`StacksAddress`]: version byte + 20-byte hash.
pub const STACKS_ADDRESS_ENCODED_SIZE: usize = 1 + Hash160::ENCODED_SIZE;

/// Address version bytes as used on mainnet and testnet.
pub mod address_version {
  pub const MAINNET_SINGLESIG: u8 = 22;
  pub const MAINNET_MULTISIG: u8 = 20;
  pub const TESTNET_SINGLESIG: u8 = 26;
  pub const TESTNET_MULTISIG: u8 = 21;
}

/// A Stacks account address.
///
/// The version byte is carried as-is; it is not checked against the known
/// [`address_version`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StacksAddress {
  pub version: u8,
  pub hash160: Hash160,
}

impl StacksAddress {
  /// Read a version byte followed by a 20-byte hash.
  ///
  /// # Errors
  ///
  /// [`TypeError::Wire`] if fewer than 21 bytes remain.
  pub fn read_from(cursor: &mut ByteCursor) -> Result<Self, TypeError> {
    Ok(Self {
      version: cursor.read_u8()?,
      hash160: Hash160::read_from(cursor)?,
    })
  }

  #[must_use]
  pub fn is_mainnet(&self) -> bool {
    matches!(
      self.version,
      address_version::MAINNET_SINGLESIG | address_version::MAINNET_MULTISIG
    )
  }
}

impl fmt::Display for StacksAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.version, self.hash160)
  }
}
