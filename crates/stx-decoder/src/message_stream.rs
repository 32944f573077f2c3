use stx_wire::{Preamble, PREAMBLE_ENCODED_SIZE};
use tokio::io::AsyncRead;
use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::framing::{self, DecodedMessage};
use crate::stream_reader::StreamReader;

/// Asynchronous message loop over a peer connection.
///
/// Each call to [`next`](Self::next) pulls one preamble, then exactly
/// `payload_len` body bytes, and decodes them. Nothing is read ahead:
/// the next preamble is only requested when the caller asks for the next
/// message.
///
/// ```text
///   ┌──────────┐  148 bytes   ┌──────────┐  payload_len  ┌────────┐
///   │ preamble │ ───────────▶ │   body   │ ────────────▶ │ decode │ ─▶ DecodedMessage
///   └──────────┘              └──────────┘               └────────┘
///        ▲                                                    │
///        └────────────────────── next() ◀─────────────────────┘
/// ```
///
/// The stream ends (`None`) when the peer closes the connection at a
/// message boundary. Any error is yielded once and then ends the stream:
/// there is no length marker to resynchronize on.
///
/// # Example
///
/// ```rust,no_run
/// use stx_decoder::{DecoderConfig, MessageStream};
/// use tokio::net::TcpStream;
///
/// async fn follow(peer: TcpStream) {
///   let mut stream = MessageStream::new(peer, DecoderConfig::default());
///   while let Some(result) = stream.next().await {
///     match result {
///       Ok(decoded) => println!("{:?}", decoded.message.type_id()),
///       Err(e) => eprintln!("peer sent bad data: {e}"),
///     }
///   }
/// }
/// ```
pub struct MessageStream<R> {
  reader: StreamReader<R>,
  config: DecoderConfig,
  state: StreamState,
  decoded: u64,
}

/// ```text
///   Active ──(clean EOF or error)──▶ Done
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
  Active,
  Done,
}

impl<R: AsyncRead + Unpin> MessageStream<R> {
  #[must_use]
  pub fn new(reader: R, config: DecoderConfig) -> Self {
    Self {
      reader: StreamReader::new(reader),
      config,
      state: StreamState::Active,
      decoded: 0,
    }
  }

  /// Read the next message from the stream.
  ///
  /// Returns `Some(Ok(_))` per decoded message, `Some(Err(_))` once on
  /// failure, and `None` after a clean close or a previous error.
  pub async fn next(&mut self) -> Option<Result<DecodedMessage, DecodeError>> {
    if self.state == StreamState::Done {
      return None;
    }

    match self.read_message().await {
      Ok(Some(decoded)) => {
        self.decoded += 1;
        Some(Ok(decoded))
      }
      Ok(None) => {
        debug!(
          messages = self.decoded,
          bytes = self.reader.bytes_read(),
          "peer closed stream"
        );
        self.state = StreamState::Done;
        None
      }
      Err(e) => {
        warn!(
          messages = self.decoded,
          bytes = self.reader.bytes_read(),
          kind = ?e.kind(),
          "stopping message stream: {e}"
        );
        self.state = StreamState::Done;
        Some(Err(e))
      }
    }
  }

  /// Messages successfully decoded so far.
  #[must_use]
  pub fn messages_decoded(&self) -> u64 {
    self.decoded
  }

  #[must_use]
  pub fn is_done(&self) -> bool {
    self.state == StreamState::Done
  }

  pub fn into_inner(self) -> R {
    self.reader.into_inner()
  }

  async fn read_message(&mut self) -> Result<Option<DecodedMessage>, DecodeError> {
    let Some(mut head) = self.reader.read_exactly_or_eof(PREAMBLE_ENCODED_SIZE).await? else {
      return Ok(None);
    };
    let preamble = Preamble::read_from(&mut head)?;
    let payload_len = framing::checked_payload_len(&preamble, &self.config)?;
    trace!(seq = preamble.seq, payload_len, "preamble received");

    let body = self.reader.read_exactly(payload_len).await?;
    framing::decode_body(preamble, body, &self.config).map(Some)
  }
}
