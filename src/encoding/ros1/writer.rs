// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 writer for serializing into a caller-supplied buffer.
//!
//! The buffer is sized up front from the calculated message size, so the
//! writer never grows it. Writing past the end fails with
//! [`CodecError::TruncatedBuffer`].
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robowire::encoding::ros1::Ros1Writer;
//!
//! let mut buf = [0u8; 9];
//! let mut writer = Ros1Writer::new(&mut buf);
//! writer.write_u32(42)?;
//! writer.write_string("hello")?;
//! assert_eq!(writer.position(), 9);
//! # Ok(())
//! # }
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, Result as CoreResult};

use super::{CodecOptions, MAX_SEQUENCE_LENGTH};

/// Little-endian writer over a mutable byte slice.
#[derive(Debug)]
pub struct Ros1Writer<'a> {
    /// Output buffer
    buf: &'a mut [u8],
    /// Current write position
    offset: usize,
    /// Largest length prefix written, matching what the cursor accepts
    max_sequence_length: usize,
}

impl<'a> Ros1Writer<'a> {
    /// Create a writer at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self::with_offset(buf, 0)
    }

    /// Create a writer at `offset` within `buf`.
    pub fn with_offset(buf: &'a mut [u8], offset: usize) -> Self {
        Self {
            buf,
            offset,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }

    /// Apply encoding options to this writer.
    pub fn with_options(mut self, options: &CodecOptions) -> Self {
        self.max_sequence_length = options.max_sequence_length;
        self
    }

    /// Get the current write position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining writable bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    /// Reserve the next `count` bytes for writing.
    fn reserve(&mut self, count: usize) -> CoreResult<&mut [u8]> {
        if count > self.remaining() {
            return Err(CodecError::truncated(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&mut self.buf[start..start + count])
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, value: u8) -> CoreResult<()> {
        self.reserve(1)?[0] = value;
        Ok(())
    }

    /// Write a signed byte.
    pub fn write_i8(&mut self, value: i8) -> CoreResult<()> {
        self.write_u8(value as u8)
    }

    /// Write a bool as `0x01` or `0x00`.
    pub fn write_bool(&mut self, value: bool) -> CoreResult<()> {
        self.write_u8(u8::from(value))
    }

    /// Write a u16 value.
    pub fn write_u16(&mut self, value: u16) -> CoreResult<()> {
        LittleEndian::write_u16(self.reserve(2)?, value);
        Ok(())
    }

    /// Write an i16 value.
    pub fn write_i16(&mut self, value: i16) -> CoreResult<()> {
        LittleEndian::write_i16(self.reserve(2)?, value);
        Ok(())
    }

    /// Write a u32 value.
    pub fn write_u32(&mut self, value: u32) -> CoreResult<()> {
        LittleEndian::write_u32(self.reserve(4)?, value);
        Ok(())
    }

    /// Write an i32 value.
    pub fn write_i32(&mut self, value: i32) -> CoreResult<()> {
        LittleEndian::write_i32(self.reserve(4)?, value);
        Ok(())
    }

    /// Write a u64 value.
    pub fn write_u64(&mut self, value: u64) -> CoreResult<()> {
        LittleEndian::write_u64(self.reserve(8)?, value);
        Ok(())
    }

    /// Write an i64 value.
    pub fn write_i64(&mut self, value: i64) -> CoreResult<()> {
        LittleEndian::write_i64(self.reserve(8)?, value);
        Ok(())
    }

    /// Write an f32 value.
    pub fn write_f32(&mut self, value: f32) -> CoreResult<()> {
        LittleEndian::write_f32(self.reserve(4)?, value);
        Ok(())
    }

    /// Write an f64 value.
    pub fn write_f64(&mut self, value: f64) -> CoreResult<()> {
        LittleEndian::write_f64(self.reserve(8)?, value);
        Ok(())
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Write a `uint32` length or count prefix.
    ///
    /// Lengths above the configured limit are rejected so that everything
    /// written can be read back with the same options.
    pub fn write_length(&mut self, len: usize) -> CoreResult<()> {
        if len > self.max_sequence_length {
            return Err(CodecError::length_exceeded(
                len,
                self.max_sequence_length,
                self.offset,
            ));
        }
        let len = u32::try_from(len).map_err(|_| {
            CodecError::encoding("uint32", format!("length {len} does not fit a uint32 prefix"))
        })?;
        self.write_u32(len)
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> CoreResult<()> {
        self.write_length(value.len())?;
        self.write_bytes(value.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_little_endian() {
        let mut buf = [0u8; 6];
        let mut writer = Ros1Writer::new(&mut buf);
        writer.write_i32(-2).unwrap();
        writer.write_u16(0x0102).unwrap();
        assert_eq!(writer.position(), 6);
        assert_eq!(buf, [0xFE, 0xFF, 0xFF, 0xFF, 0x02, 0x01]);
    }

    #[test]
    fn test_write_bool() {
        let mut buf = [0xAAu8; 2];
        let mut writer = Ros1Writer::new(&mut buf);
        writer.write_bool(true).unwrap();
        writer.write_bool(false).unwrap();
        assert_eq!(buf, [0x01, 0x00]);
    }

    #[test]
    fn test_write_string() {
        let mut buf = [0u8; 7];
        let mut writer = Ros1Writer::with_offset(&mut buf, 1);
        writer.write_string("ok").unwrap();
        assert_eq!(writer.position(), 7);
        assert_eq!(buf, [0, 2, 0, 0, 0, b'o', b'k']);
    }

    #[test]
    fn test_write_length_limit() {
        let mut buf = [0u8; 8];
        let options = CodecOptions::new().with_max_sequence_length(3);
        let mut writer = Ros1Writer::with_offset(&mut buf, 2).with_options(&options);
        writer.write_length(3).unwrap();
        let err = writer.write_string("long").unwrap_err();
        assert_eq!(err, CodecError::length_exceeded(4, 3, 6));
        assert_eq!(writer.position(), 6);
    }

    #[test]
    fn test_write_past_end() {
        let mut buf = [0u8; 3];
        let mut writer = Ros1Writer::new(&mut buf);
        let err = writer.write_f32(1.0).unwrap_err();
        assert_eq!(err, CodecError::truncated(4, 3, 0));
        assert_eq!(writer.position(), 0);
    }
}
