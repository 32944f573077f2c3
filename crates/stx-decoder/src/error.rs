use stx_types::TypeError;
use stx_wire::WireError;

/// Errors that can occur while framing and decoding P2P messages.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── PayloadTooLarge       ← preamble declares a body over the limit
///   ├── Type(TypeError)       ← bad or unsupported tag inside the body
///   │   └── Wire(WireError)   ← underflow while reading a typed field
///   └── Wire(WireError)       ← truncated stream, I/O failure
/// ```
///
/// Nothing here is recoverable within a connection: the wire format has no
/// resynchronization marker, so after any error the caller should drop the
/// connection. Use [`DecodeError::kind`] to classify without matching the
/// nested layers.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
  /// The preamble declared a payload longer than the configured limit.
  ///
  /// Raised before any body bytes are pulled from the stream.
  #[error("declared payload length {declared} exceeds limit {limit}")]
  PayloadTooLarge { declared: u32, limit: u32 },

  /// A typed structure inside the body failed to decode.
  #[error(transparent)]
  Type(#[from] TypeError),

  /// A framing-level error from `stx-wire` or the transport.
  #[error(transparent)]
  Wire(#[from] WireError),
}

/// Flat classification of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
  /// The stream ended before a required number of bytes arrived.
  StreamTruncated,
  /// A read ran past the declared payload length.
  CursorUnderflow,
  /// A tag byte (or contract name) is not valid protocol data.
  MessageParsing,
  /// A valid tag this decoder has no logic for.
  NotImplemented,
  /// A configured limit was exceeded.
  LimitExceeded,
  /// The transport failed.
  Io,
}

impl DecodeError {
  #[must_use]
  pub fn kind(&self) -> DecodeErrorKind {
    match self {
      Self::PayloadTooLarge { .. } => DecodeErrorKind::LimitExceeded,
      Self::Type(TypeError::InvalidEnumValue { .. } | TypeError::InvalidContractName { .. }) => {
        DecodeErrorKind::MessageParsing
      }
      Self::Type(TypeError::NotImplemented { .. }) => DecodeErrorKind::NotImplemented,
      Self::Type(TypeError::Wire(wire)) | Self::Wire(wire) => wire_kind(wire),
    }
  }

  #[must_use]
  pub fn is_not_implemented(&self) -> bool {
    self.kind() == DecodeErrorKind::NotImplemented
  }
}

fn wire_kind(err: &WireError) -> DecodeErrorKind {
  match err {
    WireError::StreamTruncated { .. } => DecodeErrorKind::StreamTruncated,
    WireError::CursorUnderflow { .. } => DecodeErrorKind::CursorUnderflow,
    WireError::Io(_) => DecodeErrorKind::Io,
  }
}
