use bytes::Bytes;
use num_bigint::BigUint;

use crate::error::WireError;

/// Byte order for arbitrary-width integer fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first. Every fixed-width field in the
    /// Stacks P2P protocol uses this order.
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
}

/// Bounded reader over a block of bytes whose length is known up front.
///
/// A `ByteCursor` owns its block (a cheaply cloneable [`Bytes`]) and an
/// offset into it. Every read advances the offset, and any read that would
/// cross the end of the block fails with [`WireError::CursorUnderflow`]
/// without moving the offset, so a failed read never leaves the cursor
/// half-advanced.
///
/// ```text
///   ┌───────────── len ─────────────┐
///   │ consumed    │ remaining        │
///   └─────────────┴──────────────────┘
///                 ^ position
/// ```
///
/// All fixed-width integer reads are big-endian. Fields wider than 64 bits
/// go through [`read_uint`](Self::read_uint), which takes an explicit
/// width and byte order and yields a [`BigUint`].
#[derive(Clone, Debug)]
pub struct ByteCursor {
    buf: Bytes,
    pos: usize,
}

impl ByteCursor {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Total length of the underlying block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// `true` once every byte of the block has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `n` bytes and advance past them.
    fn take(&mut self, n: usize) -> Result<&[u8], WireError> {
        if n > self.remaining() {
            return Err(WireError::CursorUnderflow {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.buf[start..self.pos])
    }

    /// Read a fixed-size array.
    ///
    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than `N` bytes remain.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if the cursor is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than 8 bytes remain.
    pub fn read_u64(&mut self) -> Result<u64, WireError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Read a `width`-byte unsigned integer of arbitrary size.
    ///
    /// The same primitive serves 8-byte amounts, 16-byte amounts, and any
    /// other width the protocol uses; the result is unbounded so nothing is
    /// truncated regardless of `width`. A zero width reads nothing and
    /// yields zero.
    ///
    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than `width` bytes remain.
    pub fn read_uint(&mut self, width: usize, order: ByteOrder) -> Result<BigUint, WireError> {
        let raw = self.take(width)?;
        Ok(match order {
            ByteOrder::BigEndian => BigUint::from_bytes_be(raw),
            ByteOrder::LittleEndian => BigUint::from_bytes_le(raw),
        })
    }

    /// Read `n` bytes into an owned buffer.
    ///
    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than `n` bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, WireError> {
        Ok(self.take(n)?.to_vec())
    }

    /// Advance past `n` bytes without looking at them.
    ///
    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> Result<(), WireError> {
        self.take(n).map(|_| ())
    }

    /// Split the next `n` bytes off into their own cursor.
    ///
    /// Used for the protocol's fixed-size blocks: the whole block is
    /// claimed in one step, so a short body fails before any of the
    /// block's fields are interpreted. The new cursor shares the underlying
    /// allocation.
    ///
    /// # Errors
    ///
    /// [`WireError::CursorUnderflow`] if fewer than `n` bytes remain.
    pub fn split_block(&mut self, n: usize) -> Result<ByteCursor, WireError> {
        if n > self.remaining() {
            return Err(WireError::CursorUnderflow {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let block = self.buf.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(ByteCursor::new(block))
    }
}
