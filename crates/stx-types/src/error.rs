use stx_wire::WireError;

/// Errors that can occur while decoding typed protocol structures.
///
/// These sit one level above [`WireError`]: the bytes were there, but
/// they did not describe something this decoder can produce.
///
/// # Error hierarchy
///
/// ```text
/// ┌────────────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                                     │
/// │   ├── InvalidEnumValue   tag byte names no known variant   │
/// │   ├── NotImplemented     tag is valid, no decoder for it   │
/// │   ├── InvalidContractName contract name is not ASCII       │
/// │   └── wraps WireError for truncation and underflow         │
/// └────────────────────────────────────────────────────────────┘
/// ```
///
/// `InvalidEnumValue` means "these bytes are not this protocol";
/// `NotImplemented` means "this protocol feature isn't covered yet". The
/// two are kept apart so callers can tell a hostile peer from a decoder
/// coverage gap.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// A tag byte did not match any variant of its enum.
  #[error("invalid {enum_name} value: {value:#04X}")]
  InvalidEnumValue { enum_name: &'static str, value: u8 },

  /// A tag byte named a real protocol variant that has no decoder.
  #[error("{enum_name}::{variant} is not implemented")]
  NotImplemented {
    enum_name: &'static str,
    variant: &'static str,
  },

  /// A contract principal's name contained non-ASCII bytes.
  #[error("contract name is not ASCII: {raw:02x?}")]
  InvalidContractName { raw: Vec<u8> },

  /// An underlying wire-level error (truncation, underflow, I/O).
  #[error(transparent)]
  Wire(#[from] WireError),
}
