/// Errors raised while pulling bytes off the wire or reading them back out
/// of a bounded cursor.
///
/// These are the two ways a decode can run out of data:
///
/// ```text
/// ┌──────────────────┬────────────────────────────────────────────────┐
/// │ Variant          │ Meaning                                        │
/// ├──────────────────┼────────────────────────────────────────────────┤
/// │ StreamTruncated  │ the live stream closed before N bytes arrived  │
/// │ CursorUnderflow  │ a read ran past the declared payload length    │
/// │ Io               │ the transport itself failed                    │
/// └──────────────────┴────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The input stream ended before the requested block was complete.
    #[error("stream ended after {received} of {expected} expected bytes")]
    StreamTruncated { expected: usize, received: usize },

    /// A bounded read would have passed the end of its block.
    ///
    /// Inside a framed message this means the preamble's payload length
    /// was too small for what the body claims to contain.
    #[error("cursor underflow at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    CursorUnderflow {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// I/O error from the underlying transport.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
