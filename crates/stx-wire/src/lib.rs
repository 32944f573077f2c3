#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod hash;
pub mod preamble;
pub mod relay;

pub use cursor::{ByteCursor, ByteOrder};
pub use error::WireError;
pub use preamble::{
    Preamble, PREAMBLE_ENCODED_SIZE, PREAMBLE_FIELDS_ENCODED_SIZE, PREAMBLE_PADDING_ENCODED_SIZE,
};
