use std::fmt;
use std::sync::Arc;

use stx_types::{BlockHeaderDecoder, StacksHeaderDecoder};

/// Default ceiling on a preamble's declared payload length (32 MiB).
pub const DEFAULT_MAX_PAYLOAD_LEN: u32 = 32 * 1024 * 1024;

/// Knobs shared by [`MessageDecoder`](crate::MessageDecoder) and
/// [`MessageStream`](crate::MessageStream).
///
/// ```text
/// ┌──────────────────┬──────────────────────────┬──────────────────────┐
/// │ Field            │ Default                  │ Effect               │
/// ├──────────────────┼──────────────────────────┼──────────────────────┤
/// │ max_payload_len  │ 32 MiB                   │ PayloadTooLarge      │
/// │ header_decoder   │ StacksHeaderDecoder      │ Blocks message       │
/// │                  │ (247-byte header)        │ header layout        │
/// └──────────────────┴──────────────────────────┴──────────────────────┘
/// ```
#[derive(Clone)]
pub struct DecoderConfig {
  /// Largest `payload_len` accepted from a preamble. Checked before the
  /// body is read, so a hostile peer cannot force a large allocation.
  pub max_payload_len: u32,

  /// Decoder invoked once per block in a Blocks message.
  pub header_decoder: Arc<dyn BlockHeaderDecoder>,
}

impl DecoderConfig {
  #[must_use]
  pub fn with_max_payload_len(mut self, max_payload_len: u32) -> Self {
    self.max_payload_len = max_payload_len;
    self
  }

  #[must_use]
  pub fn with_header_decoder(mut self, header_decoder: impl BlockHeaderDecoder + 'static) -> Self {
    self.header_decoder = Arc::new(header_decoder);
    self
  }
}

impl Default for DecoderConfig {
  fn default() -> Self {
    Self {
      max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
      header_decoder: Arc::new(StacksHeaderDecoder),
    }
  }
}

impl fmt::Debug for DecoderConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DecoderConfig")
      .field("max_payload_len", &self.max_payload_len)
      .finish_non_exhaustive()
  }
}
