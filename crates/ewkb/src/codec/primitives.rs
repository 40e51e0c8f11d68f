//! Primitive encoding/decoding for the EWKB binary format.
//!
//! Implements bounds-checked fixed-width reads and writes in either byte
//! order. The byte order is passed per call because every nested EWKB value
//! declares its own.

use crate::error::DecodeError;
use crate::model::ByteOrder;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking. Every failed read reports the offset it started at.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Fails unless at least `n` bytes remain.
    #[inline]
    pub fn ensure(&self, n: usize, context: &'static str) -> Result<(), DecodeError> {
        let available = self.remaining_len();
        if n > available {
            return Err(DecodeError::TruncatedBuffer {
                context,
                position: self.pos,
                needed: n,
                available,
            });
        }
        Ok(())
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        self.ensure(1, context)?;
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        self.ensure(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Reads an unsigned 32-bit integer.
    #[inline]
    pub fn read_u32(&mut self, order: ByteOrder, context: &'static str) -> Result<u32, DecodeError> {
        let bytes = self.read_array::<4>(context)?;
        Ok(match order {
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
        })
    }

    /// Reads a signed 32-bit integer.
    #[inline]
    pub fn read_i32(&mut self, order: ByteOrder, context: &'static str) -> Result<i32, DecodeError> {
        let bytes = self.read_array::<4>(context)?;
        Ok(match order {
            ByteOrder::BigEndian => i32::from_be_bytes(bytes),
            ByteOrder::LittleEndian => i32::from_le_bytes(bytes),
        })
    }

    /// Reads an IEEE-754 double. NaN is accepted: it marks an empty point.
    #[inline]
    pub fn read_f64(&mut self, order: ByteOrder, context: &'static str) -> Result<f64, DecodeError> {
        let bytes = self.read_array::<8>(context)?;
        Ok(match order {
            ByteOrder::BigEndian => f64::from_be_bytes(bytes),
            ByteOrder::LittleEndian => f64::from_le_bytes(bytes),
        })
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes an unsigned 32-bit integer.
    #[inline]
    pub fn write_u32(&mut self, value: u32, order: ByteOrder) {
        match order {
            ByteOrder::BigEndian => self.buf.extend_from_slice(&value.to_be_bytes()),
            ByteOrder::LittleEndian => self.buf.extend_from_slice(&value.to_le_bytes()),
        }
    }

    /// Writes a signed 32-bit integer.
    #[inline]
    pub fn write_i32(&mut self, value: i32, order: ByteOrder) {
        match order {
            ByteOrder::BigEndian => self.buf.extend_from_slice(&value.to_be_bytes()),
            ByteOrder::LittleEndian => self.buf.extend_from_slice(&value.to_le_bytes()),
        }
    }

    /// Writes an IEEE-754 double, bit for bit.
    #[inline]
    pub fn write_f64(&mut self, value: f64, order: ByteOrder) {
        match order {
            ByteOrder::BigEndian => self.buf.extend_from_slice(&value.to_be_bytes()),
            ByteOrder::LittleEndian => self.buf.extend_from_slice(&value.to_le_bytes()),
        }
    }
}
