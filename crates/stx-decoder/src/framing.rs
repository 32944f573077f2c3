use bytes::Bytes;
use stx_types::{StacksMessage, StacksMessageTypeId};
use stx_wire::relay::skip_relayers;
use stx_wire::{ByteCursor, Preamble, WireError, PREAMBLE_ENCODED_SIZE};
use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::error::DecodeError;

/// One fully framed and decoded P2P message.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ DecodedMessage                                       │
/// │   preamble: Preamble      ← fixed 148-byte header    │
/// │   relayers: u32           ← relay records skipped    │
/// │   message:  StacksMessage ← decoded body             │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedMessage {
  pub preamble: Preamble,
  pub relayers: u32,
  pub message: StacksMessage,
}

/// Synchronous decoder for messages already held in memory, such as a
/// captured session dump.
///
/// Uses the same framing as [`MessageStream`](crate::MessageStream): the
/// input is treated as a stream, so running out of bytes while pulling a
/// preamble or body is [`WireError::StreamTruncated`], while running off
/// the end of a body is [`WireError::CursorUnderflow`].
#[derive(Debug, Default)]
pub struct MessageDecoder {
  config: DecoderConfig,
}

impl MessageDecoder {
  #[must_use]
  pub fn new(config: DecoderConfig) -> Self {
    Self { config }
  }

  #[must_use]
  pub fn config(&self) -> &DecoderConfig {
    &self.config
  }

  /// Decode the first message in `bytes`.
  ///
  /// Returns the message and the number of bytes it occupied
  /// (preamble plus `payload_len`). To walk a whole capture, use
  /// [`messages`](Self::messages), which never copies the input.
  ///
  /// # Errors
  ///
  /// Any [`DecodeError`]; see the type for the classification.
  pub fn decode(&self, bytes: &[u8]) -> Result<(DecodedMessage, usize), DecodeError> {
    let mut stream = ByteCursor::new(Bytes::copy_from_slice(bytes));
    let decoded = self.decode_next(&mut stream)?;
    Ok((decoded, stream.position()))
  }

  /// Decode back-to-back messages until `bytes` is used up.
  ///
  /// # Errors
  ///
  /// The first error encountered; messages decoded before it are
  /// discarded, since nothing after a failed message can be framed.
  pub fn decode_all(&self, bytes: &[u8]) -> Result<Vec<DecodedMessage>, DecodeError> {
    self
      .messages(Bytes::copy_from_slice(bytes))
      .map(|(_, result)| result)
      .collect()
  }

  /// Iterate over back-to-back messages in a shared buffer.
  ///
  /// Each item carries the byte offset the message starts at. Bodies are
  /// sliced out of `bytes` without copying. Iteration stops after the
  /// first error.
  ///
  /// ```text
  ///   bytes: [ msg @0 ][ msg @offset ][ msg … ]
  ///            │         │
  ///            ▼         ▼
  ///          (0, Ok)   (offset, Ok) … (offset, Err) ─▶ None
  /// ```
  #[must_use]
  pub fn messages(&self, bytes: impl Into<Bytes>) -> Messages<'_> {
    Messages {
      decoder: self,
      stream: ByteCursor::new(bytes),
      failed: false,
    }
  }

  fn decode_next(&self, stream: &mut ByteCursor) -> Result<DecodedMessage, DecodeError> {
    let mut head = take_from_stream(stream, PREAMBLE_ENCODED_SIZE)?;
    let preamble = Preamble::read_from(&mut head)?;
    let payload_len = checked_payload_len(&preamble, &self.config)?;
    let body = take_from_stream(stream, payload_len)?;
    decode_body(preamble, body, &self.config)
  }
}

/// Iterator returned by [`MessageDecoder::messages`].
#[derive(Debug)]
pub struct Messages<'a> {
  decoder: &'a MessageDecoder,
  stream: ByteCursor,
  failed: bool,
}

impl Messages<'_> {
  /// Offset of the next message to decode.
  #[must_use]
  pub fn offset(&self) -> usize {
    self.stream.position()
  }
}

impl Iterator for Messages<'_> {
  type Item = (usize, Result<DecodedMessage, DecodeError>);

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.stream.is_exhausted() {
      return None;
    }
    let offset = self.stream.position();
    let result = self.decoder.decode_next(&mut self.stream);
    self.failed = result.is_err();
    Some((offset, result))
  }
}

impl std::iter::FusedIterator for Messages<'_> {}

/// Validate the preamble's declared length against the configured limit.
pub(crate) fn checked_payload_len(preamble: &Preamble, config: &DecoderConfig) -> Result<usize, DecodeError> {
  if preamble.payload_len > config.max_payload_len {
    return Err(DecodeError::PayloadTooLarge {
      declared: preamble.payload_len,
      limit: config.max_payload_len,
    });
  }
  Ok(preamble.payload_len as usize)
}

/// Decode a message body bounded to exactly `payload_len` bytes.
///
/// ```text
///   body: [ relayer count │ relayers… │ type tag │ message fields… ]
/// ```
///
/// Bytes left over after the message fields are ignored.
pub(crate) fn decode_body(
  preamble: Preamble,
  mut body: ByteCursor,
  config: &DecoderConfig,
) -> Result<DecodedMessage, DecodeError> {
  let relayers = skip_relayers(&mut body)?;
  let type_id = StacksMessageTypeId::read_from(&mut body)?;
  debug!(
    seq = preamble.seq,
    payload_len = preamble.payload_len,
    relayers,
    message_type = type_id.name(),
    "decoding message"
  );

  let message = StacksMessage::read_body(type_id, &mut body, config.header_decoder.as_ref())?;

  if !body.is_exhausted() {
    warn!(
      seq = preamble.seq,
      message_type = type_id.name(),
      trailing = body.remaining(),
      "ignoring trailing bytes after message body"
    );
  }

  Ok(DecodedMessage {
    preamble,
    relayers,
    message,
  })
}

/// Pull a block off an in-memory stream, reporting a short input as a
/// truncated stream rather than a body underflow.
fn take_from_stream(stream: &mut ByteCursor, n: usize) -> Result<ByteCursor, WireError> {
  let received = stream.remaining();
  stream
    .split_block(n)
    .map_err(|_| WireError::StreamTruncated { expected: n, received })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::DecodeErrorKind;

  fn preamble_bytes(seq: u32, payload_len: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(PREAMBLE_ENCODED_SIZE);
    buf.extend_from_slice(&1u32.to_be_bytes());
    buf.extend_from_slice(&0x8000_0000u32.to_be_bytes());
    buf.extend_from_slice(&seq.to_be_bytes());
    buf.extend_from_slice(&0u64.to_be_bytes());
    buf.extend_from_slice(&[0; 20]);
    buf.extend_from_slice(&0u64.to_be_bytes());
    buf.extend_from_slice(&[0; 20]);
    buf.extend_from_slice(&0u32.to_be_bytes());
    buf.extend_from_slice(&[0; 65]);
    buf.extend_from_slice(&payload_len.to_be_bytes());
    buf.extend_from_slice(&[0; 7]);
    buf
  }

  /// Empty Blocks message: no relayers, tag 8, zero blocks.
  fn empty_blocks(seq: u32) -> Vec<u8> {
    let body = [0, 0, 0, 0, 8, 0, 0, 0, 0];
    let mut buf = preamble_bytes(seq, 9);
    buf.extend_from_slice(&body);
    buf
  }

  #[test]
  fn decode_reports_consumed_length() {
    let mut bytes = empty_blocks(3);
    bytes.extend_from_slice(&[0xEE; 4]);

    let (decoded, consumed) = MessageDecoder::default().decode(&bytes).unwrap();
    assert_eq!(consumed, PREAMBLE_ENCODED_SIZE + 9);
    assert_eq!(decoded.preamble.seq, 3);
    assert_eq!(decoded.relayers, 0);
    assert_eq!(decoded.message, StacksMessage::Blocks(Vec::new()));
  }

  #[test]
  fn decode_all_walks_back_to_back_messages() {
    let mut bytes = empty_blocks(1);
    bytes.extend(empty_blocks(2));

    let messages = MessageDecoder::default().decode_all(&bytes).unwrap();
    let seqs: Vec<_> = messages.iter().map(|m| m.preamble.seq).collect();
    assert_eq!(seqs, vec![1, 2]);
  }

  #[test]
  fn messages_yield_offsets_and_stop_after_error() {
    let mut bytes = empty_blocks(1);
    bytes.extend(empty_blocks(2));
    let second = bytes.len() / 2;
    bytes.extend_from_slice(&[0; 10]);

    let decoder = MessageDecoder::default();
    let mut messages = decoder.messages(bytes);

    let (offset, first) = messages.next().unwrap();
    assert_eq!(offset, 0);
    assert_eq!(first.unwrap().preamble.seq, 1);
    assert_eq!(messages.offset(), second);

    let (offset, next) = messages.next().unwrap();
    assert_eq!(offset, second);
    assert_eq!(next.unwrap().preamble.seq, 2);

    let (offset, err) = messages.next().unwrap();
    assert_eq!(offset, 2 * second);
    assert_eq!(err.unwrap_err().kind(), DecodeErrorKind::StreamTruncated);
    assert!(messages.next().is_none());
  }

  #[test]
  fn messages_share_the_input_buffer() {
    let mut bytes = empty_blocks(1);
    bytes.extend(empty_blocks(2));
    let shared = Bytes::from(bytes);

    let decoder = MessageDecoder::default();
    let seqs: Vec<_> = decoder
      .messages(shared)
      .map(|(_, result)| result.unwrap().preamble.seq)
      .collect();
    assert_eq!(seqs, vec![1, 2]);
    assert!(decoder.messages(Bytes::new()).next().is_none());
  }

  #[test]
  fn trailing_body_bytes_are_ignored() {
    let mut bytes = preamble_bytes(0, 11);
    bytes.extend_from_slice(&[0, 0, 0, 0, 8, 0, 0, 0, 0, 0xAB, 0xCD]);

    let (decoded, consumed) = MessageDecoder::default().decode(&bytes).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(decoded.message, StacksMessage::Blocks(Vec::new()));
  }

  #[test]
  fn short_input_is_stream_truncation() {
    let bytes = empty_blocks(0);
    let err = MessageDecoder::default().decode(&bytes[..100]).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::StreamTruncated);

    let err = MessageDecoder::default().decode(&bytes[..150]).unwrap_err();
    assert!(matches!(
      err,
      DecodeError::Wire(WireError::StreamTruncated {
        expected: 9,
        received: 2
      })
    ));
  }

  #[test]
  fn body_overrun_is_cursor_underflow() {
    // Declares one block but the body ends after the count.
    let mut bytes = preamble_bytes(0, 9);
    bytes.extend_from_slice(&[0, 0, 0, 0, 8, 0, 0, 0, 1]);
    let err = MessageDecoder::default().decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::CursorUnderflow);
  }

  #[test]
  fn oversized_payload_is_rejected_before_reading() {
    let bytes = preamble_bytes(0, 1_000);
    let decoder = MessageDecoder::new(DecoderConfig::default().with_max_payload_len(512));
    assert!(matches!(
      decoder.decode(&bytes),
      Err(DecodeError::PayloadTooLarge {
        declared: 1_000,
        limit: 512
      })
    ));
  }
}
