// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 cursor for reading serialized message data.
//!
//! ROS1 data is little-endian and tightly packed, so the cursor only tracks
//! an offset. Every read is bounds-checked and fails with
//! [`CodecError::TruncatedBuffer`] without advancing.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robowire::encoding::ros1::Ros1Cursor;
//!
//! let data = [0x2A, 0x00, 0x00, 0x00];
//! let mut cursor = Ros1Cursor::new(&data);
//! assert_eq!(cursor.read_u32()?, 42);
//! assert_eq!(cursor.position(), 4);
//! # Ok(())
//! # }
//! ```

use byteorder::{ByteOrder, LittleEndian};

use super::{CodecOptions, MAX_SEQUENCE_LENGTH};
use crate::core::{CodecError, Result as CoreResult};

/// Cursor over a ROS1-encoded byte slice.
#[derive(Debug, Clone)]
pub struct Ros1Cursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Largest length prefix accepted
    max_sequence_length: usize,
}

impl<'a> Ros1Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_offset(data, 0)
    }

    /// Create a cursor at `offset` within `data`.
    pub fn with_offset(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            offset,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }

    /// Apply decoding options to this cursor.
    pub fn with_options(mut self, options: &CodecOptions) -> Self {
        self.max_sequence_length = options.max_sequence_length;
        self
    }

    /// Get the current position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Take the next `count` bytes.
    fn take(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::truncated(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> CoreResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> CoreResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a bool. Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> CoreResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a u16 value.
    pub fn read_u16(&mut self) -> CoreResult<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Read an i16 value.
    pub fn read_i16(&mut self) -> CoreResult<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> CoreResult<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> CoreResult<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Read a u64 value.
    pub fn read_u64(&mut self) -> CoreResult<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    /// Read an i64 value.
    pub fn read_i64(&mut self) -> CoreResult<i64> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    /// Read an f32 value.
    pub fn read_f32(&mut self) -> CoreResult<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    /// Read an f64 value.
    pub fn read_f64(&mut self) -> CoreResult<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        self.take(count)
    }

    /// Read a `uint32` length prefix and check it against the configured limit.
    ///
    /// The limit is checked before any caller allocates for the elements.
    pub fn read_length(&mut self) -> CoreResult<usize> {
        let position = self.offset;
        let len = self.read_u32()? as usize;
        if len > self.max_sequence_length {
            self.offset = position;
            return Err(CodecError::length_exceeded(
                len,
                self.max_sequence_length,
                position,
            ));
        }
        Ok(len)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> CoreResult<String> {
        let start = self.offset;
        let len = self.read_length()?;
        let bytes = match self.take(len) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.offset = start;
                return Err(e);
            }
        };
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            Err(e) => {
                self.offset = start;
                Err(CodecError::encoding("string", format!("invalid UTF-8: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0xFF];
        let mut cursor = Ros1Cursor::new(&data);
        assert_eq!(cursor.read_u32().unwrap(), 0x0403_0201);
        assert_eq!(cursor.read_i8().unwrap(), -1);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_past_end() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = Ros1Cursor::new(&data);
        let err = cursor.read_i32().unwrap_err();
        assert_eq!(err, CodecError::truncated(4, 3, 0));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_with_offset() {
        let data = [0xAA, 0x05, 0x00];
        let mut cursor = Ros1Cursor::with_offset(&data, 1);
        assert_eq!(cursor.read_u16().unwrap(), 5);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_read_string() {
        let data = [0x02, 0x00, 0x00, 0x00, b'h', b'i'];
        let mut cursor = Ros1Cursor::new(&data);
        assert_eq!(cursor.read_string().unwrap(), "hi");
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_read_string_length_past_end() {
        let data = [0x05, 0x00, 0x00, 0x00, b'h', b'i'];
        let mut cursor = Ros1Cursor::new(&data);
        let err = cursor.read_string().unwrap_err();
        assert_eq!(err, CodecError::truncated(5, 2, 4));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_read_string_invalid_utf8() {
        let data = [0x01, 0x00, 0x00, 0x00, 0xFF];
        let mut cursor = Ros1Cursor::new(&data);
        assert!(matches!(
            cursor.read_string().unwrap_err(),
            CodecError::Encoding { .. }
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_length_limit() {
        let data = 100u32.to_le_bytes();
        let options = CodecOptions::new().with_max_sequence_length(10);
        let mut cursor = Ros1Cursor::new(&data).with_options(&options);
        assert_eq!(
            cursor.read_length().unwrap_err(),
            CodecError::length_exceeded(100, 10, 0)
        );
    }
}
