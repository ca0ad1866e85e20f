//! buffer.rs
//! Byte cursor pair: one owned buffer with independent read/write cursors.
//!
//! Design notes:
//! - The driver only ever advances cursors by the byte counts the engine
//!   actually touched; overrunning a cursor is an internal invariant
//!   violation and panics.
//! - Storage is `BytesMut` so the fully-read form can be frozen and
//!   sliced without copying.

use bytes::{Bytes, BytesMut};

/// Fixed-capacity byte buffer with a read cursor and a write cursor.
///
/// `0 <= read_pos <= write_pos <= capacity` always holds. The unread
/// region is `[read_pos, write_pos)`; the unwritten region is
/// `[write_pos, capacity)`.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    data: BytesMut,
    read_pos: usize,
    write_pos: usize,
}

impl ByteBuffer {
    /// Empty buffer with `capacity` writable bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::zeroed(capacity),
            read_pos: 0,
            write_pos: 0,
        }
    }

    /// Buffer pre-filled with `bytes`, write cursor at the end.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: BytesMut::from(bytes),
            read_pos: 0,
            write_pos: bytes.len(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes written but not yet read.
    pub fn readable_bytes(&self) -> usize {
        self.write_pos - self.read_pos
    }

    /// Remaining destination space.
    pub fn writable_bytes(&self) -> usize {
        self.data.len() - self.write_pos
    }

    /// The unread region.
    pub fn unread(&self) -> &[u8] {
        &self.data[self.read_pos..self.write_pos]
    }

    /// Mutable view of the unwritten region.
    pub fn unwritten_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.write_pos..]
    }

    /// Advance the read cursor by `n` consumed bytes.
    ///
    /// Panics if `n` exceeds the unread region.
    pub fn advance_read(&mut self, n: usize) {
        assert!(n <= self.readable_bytes(), "read cursor overrun");
        self.read_pos += n;
    }

    /// Advance the write cursor by `n` produced bytes.
    ///
    /// Panics if `n` exceeds the unwritten region.
    pub fn advance_write(&mut self, n: usize) {
        assert!(n <= self.writable_bytes(), "write cursor overrun");
        self.write_pos += n;
    }

    /// Move both cursors back to the start, keeping the capacity.
    pub fn reset_cursors(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
    }

    /// Copy `bytes` into the unwritten region and advance the write cursor.
    ///
    /// Panics if the destination space is insufficient.
    pub fn write_slice(&mut self, bytes: &[u8]) {
        assert!(bytes.len() <= self.writable_bytes(), "write cursor overrun");
        let end = self.write_pos + bytes.len();
        self.data[self.write_pos..end].copy_from_slice(bytes);
        self.write_pos = end;
    }

    /// Append the other buffer's unread bytes here, consuming them there.
    pub fn append_from(&mut self, other: &mut ByteBuffer) {
        let n = other.readable_bytes();
        self.write_slice(other.unread());
        other.advance_read(n);
    }

    /// Freeze into the unread region without copying.
    pub fn into_readable(self) -> Bytes {
        self.data.freeze().slice(self.read_pos..self.write_pos)
    }
}
