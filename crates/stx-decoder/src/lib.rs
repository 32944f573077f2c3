#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod framing;
pub mod message_stream;
pub mod stream_reader;

pub use config::{DecoderConfig, DEFAULT_MAX_PAYLOAD_LEN};
pub use error::{DecodeError, DecodeErrorKind};
pub use framing::{DecodedMessage, MessageDecoder, Messages};
pub use message_stream::MessageStream;
pub use stream_reader::StreamReader;
