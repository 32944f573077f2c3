#![warn(clippy::pedantic)]

pub mod error;
pub mod enums;
pub mod address;
pub mod auth;
pub mod post_condition;
pub mod payload;
pub mod transaction;
pub mod block;
pub mod message;

mod bounded;

pub use address::StacksAddress;
pub use auth::{AuthField, MultisigSpendingCondition, SinglesigSpendingCondition, SpendingCondition, TransactionAuth};
pub use block::{BlockHeaderDecoder, StacksBlock, StacksBlockHeader, StacksHeaderDecoder, StacksWorkScore};
pub use enums::{
  AssetInfoId, AuthFieldType, FungibleConditionCode, HashMode, PostConditionMode,
  PostConditionPrincipalId, PublicKeyEncoding, StacksMessageTypeId, TransactionAnchorMode,
  TransactionAuthType, TransactionPayloadId, TransactionVersion,
};
pub use error::TypeError;
pub use message::StacksMessage;
pub use payload::{CoinbasePayload, TokenTransferPayload, TransactionPayload};
pub use post_condition::{PostCondition, PostConditionPrincipal, StxPostCondition};
pub use transaction::StacksTransaction;
