use stx_wire::ByteCursor;

use crate::block::{BlockHeaderDecoder, StacksBlock};
use crate::enums::StacksMessageTypeId;
use crate::error::TypeError;
use crate::transaction::StacksTransaction;

/// A decoded P2P message body.
///
/// Of the sixteen message types only two carry a decoded payload; the rest
/// are recognized by [`StacksMessage::read_body`] and reported as not
/// implemented.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StacksMessage {
  Blocks(Vec<StacksBlock>),
  Transaction(StacksTransaction),
}

impl StacksMessage {
  /// Read the type tag and dispatch to the matching body decoder.
  ///
  /// # Errors
  ///
  /// - [`TypeError::InvalidEnumValue`] if the tag names no message type.
  /// - [`TypeError::NotImplemented`] for message types without a decoder.
  /// - Any error from the body decoder.
  pub fn read_from(
    cursor: &mut ByteCursor,
    headers: &dyn BlockHeaderDecoder,
  ) -> Result<Self, TypeError> {
    let type_id = StacksMessageTypeId::read_from(cursor)?;
    Self::read_body(type_id, cursor, headers)
  }

  /// Decode the body of a message whose tag has already been read.
  ///
  /// # Errors
  ///
  /// Same as [`read_from`](Self::read_from), minus the tag check.
  pub fn read_body(
    type_id: StacksMessageTypeId,
    cursor: &mut ByteCursor,
    headers: &dyn BlockHeaderDecoder,
  ) -> Result<Self, TypeError> {
    match type_id {
      StacksMessageTypeId::Blocks => Ok(Self::Blocks(StacksBlock::read_list(cursor, headers)?)),
      StacksMessageTypeId::Transaction => Ok(Self::Transaction(StacksTransaction::read_from(cursor)?)),
      other => Err(other.not_implemented()),
    }
  }

  #[must_use]
  pub fn type_id(&self) -> StacksMessageTypeId {
    match self {
      Self::Blocks(_) => StacksMessageTypeId::Blocks,
      Self::Transaction(_) => StacksMessageTypeId::Transaction,
    }
  }
}
