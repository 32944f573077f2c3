use std::io;

use bytes::BytesMut;
use stx_wire::{ByteCursor, WireError};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Pulls exact-length blocks off an async byte stream.
///
/// Each call suspends until exactly `n` bytes have been delivered, however
/// the transport chunks them, and hands them back as a [`ByteCursor`]
/// bounded to that block. Bytes beyond `n` stay in the stream for the next
/// call.
///
/// ```text
///   stream:  ──[ chunk ][ chunk ][ chunk ]──────────▶
///   read_exactly(148)  → ┌──── 148 bytes ────┐
///   read_exactly(len)  →                      ┌── len ──┐
/// ```
pub struct StreamReader<R> {
  reader: R,
  bytes_read: u64,
}

/// Outcome of filling a block from the stream.
enum Fill {
  Complete(BytesMut),
  /// The stream ended after this many bytes.
  Short(usize),
}

impl<R: AsyncRead + Unpin> StreamReader<R> {
  #[must_use]
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      bytes_read: 0,
    }
  }

  /// Read exactly `n` bytes.
  ///
  /// # Errors
  ///
  /// - [`WireError::StreamTruncated`] if the stream ends first. The bytes
  ///   that did arrive are dropped.
  /// - [`WireError::Io`] if the transport fails.
  pub async fn read_exactly(&mut self, n: usize) -> Result<ByteCursor, WireError> {
    match self.fill(n).await? {
      Fill::Complete(buf) => Ok(ByteCursor::new(buf.freeze())),
      Fill::Short(received) => Err(WireError::StreamTruncated { expected: n, received }),
    }
  }

  /// Like [`read_exactly`](Self::read_exactly), but a stream that ends
  /// before delivering its first byte yields `Ok(None)`.
  ///
  /// Used at message boundaries, where end of stream is a clean close.
  ///
  /// # Errors
  ///
  /// Same as [`read_exactly`](Self::read_exactly) once at least one byte
  /// has arrived.
  pub async fn read_exactly_or_eof(&mut self, n: usize) -> Result<Option<ByteCursor>, WireError> {
    match self.fill(n).await? {
      Fill::Complete(buf) => Ok(Some(ByteCursor::new(buf.freeze()))),
      Fill::Short(0) if n > 0 => Ok(None),
      Fill::Short(received) => Err(WireError::StreamTruncated { expected: n, received }),
    }
  }

  /// Total bytes consumed from the underlying reader.
  #[must_use]
  pub fn bytes_read(&self) -> u64 {
    self.bytes_read
  }

  pub fn get_ref(&self) -> &R {
    &self.reader
  }

  pub fn into_inner(self) -> R {
    self.reader
  }

  async fn fill(&mut self, n: usize) -> Result<Fill, WireError> {
    let mut buf = BytesMut::zeroed(n);
    let mut filled = 0;
    while filled < n {
      let read = match self.reader.read(&mut buf[filled..]).await {
        Ok(read) => read,
        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
        Err(e) => return Err(e.into()),
      };
      if read == 0 {
        return Ok(Fill::Short(filled));
      }
      filled += read;
      self.bytes_read += read as u64;
    }
    Ok(Fill::Complete(buf))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio_test::io::Builder;

  #[tokio::test]
  async fn assembles_block_across_chunks() {
    let mock = Builder::new().read(&[1, 2]).read(&[3]).read(&[4, 5]).build();
    let mut reader = StreamReader::new(mock);

    let mut block = reader.read_exactly(5).await.unwrap();
    assert_eq!(block.len(), 5);
    assert_eq!(block.read_bytes(5).unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(reader.bytes_read(), 5);
  }

  #[tokio::test]
  async fn leaves_extra_bytes_queued() {
    let mut reader = StreamReader::new(&[1u8, 2, 3, 4, 5, 6][..]);

    let first = reader.read_exactly(4).await.unwrap();
    assert_eq!(first.len(), 4);

    let mut rest = reader.read_exactly(2).await.unwrap();
    assert_eq!(rest.read_bytes(2).unwrap(), vec![5, 6]);
  }

  #[tokio::test]
  async fn short_stream_is_truncated() {
    let mut reader = StreamReader::new(&[9u8, 9, 9][..]);
    let err = reader.read_exactly(4).await.unwrap_err();
    assert!(matches!(
      err,
      WireError::StreamTruncated {
        expected: 4,
        received: 3
      }
    ));
  }

  #[tokio::test]
  async fn eof_at_boundary_is_clean() {
    let mut reader = StreamReader::new(&[][..]);
    assert!(reader.read_exactly_or_eof(148).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn eof_mid_block_is_not_clean() {
    let mut reader = StreamReader::new(&[0u8; 10][..]);
    assert!(matches!(
      reader.read_exactly_or_eof(148).await,
      Err(WireError::StreamTruncated {
        expected: 148,
        received: 10
      })
    ));
  }

  #[tokio::test]
  async fn zero_length_read_is_empty_block() {
    let mut reader = StreamReader::new(&[][..]);
    let block = reader.read_exactly(0).await.unwrap();
    assert!(block.is_empty());
  }

  #[tokio::test]
  async fn interrupted_reads_are_retried() {
    let mock = Builder::new()
      .read(&[1, 2])
      .read_error(io::Error::from(io::ErrorKind::Interrupted))
      .read(&[3, 4])
      .build();
    let mut reader = StreamReader::new(mock);

    let mut block = reader.read_exactly(4).await.unwrap();
    assert_eq!(block.read_bytes(4).unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(reader.bytes_read(), 4);
  }

  #[tokio::test]
  async fn io_errors_propagate() {
    let mock = Builder::new()
      .read(&[1])
      .read_error(std::io::Error::other("reset"))
      .build();
    let mut reader = StreamReader::new(mock);
    assert!(matches!(reader.read_exactly(4).await, Err(WireError::Io(_))));
  }
}
