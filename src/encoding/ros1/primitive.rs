// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed ROS1 scalars.
//!
//! [`WireScalar`] ties a Rust type to its ROS1 primitive tag, its wire
//! representation, and its conversion from and to [`CodecValue`]. Generated
//! message types call the free functions in this module directly; the
//! dynamic engine dispatches on [`PrimitiveType`] to the same impls.

use serde::{Deserialize, Serialize};

use super::calculator::Ros1Calculator;
use super::cursor::Ros1Cursor;
use super::writer::Ros1Writer;
use super::LENGTH_PREFIX_SIZE;
use crate::core::{CodecError, CodecValue, PrimitiveType, Result as CoreResult};

/// ROS1 `time`: unsigned seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Time {
    /// Seconds
    pub secs: u32,
    /// Nanoseconds
    pub nsecs: u32,
}

/// ROS1 `duration`: signed seconds and nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Duration {
    /// Seconds
    pub secs: i32,
    /// Nanoseconds
    pub nsecs: i32,
}

impl Time {
    /// Create a time value.
    pub const fn new(secs: u32, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }
}

impl Duration {
    /// Create a duration value.
    pub const fn new(secs: i32, nsecs: i32) -> Self {
        Self { secs, nsecs }
    }
}

/// A Rust type with a ROS1 primitive wire representation.
pub trait WireScalar: Sized {
    /// Primitive tag this type encodes as.
    const TYPE: PrimitiveType;

    /// Write this value at the writer's position.
    fn write(&self, writer: &mut Ros1Writer<'_>) -> CoreResult<()>;

    /// Read a value at the cursor's position.
    fn read(cursor: &mut Ros1Cursor<'_>) -> CoreResult<Self>;

    /// Encoded size in bytes.
    fn wire_size(&self) -> usize {
        Self::TYPE.size().unwrap_or(0)
    }

    /// Convert a dynamic value, range-checking integers into this width.
    fn from_value(value: &CodecValue) -> CoreResult<Self>;

    /// Convert into a dynamic value.
    fn to_value(&self) -> CodecValue;
}

fn mismatch(ty: PrimitiveType, value: &CodecValue) -> CodecError {
    CodecError::encoding(
        ty.as_str(),
        format!("expected {ty}, got {}", value.type_name()),
    )
}

impl WireScalar for bool {
    const TYPE: PrimitiveType = PrimitiveType::Bool;

    fn write(&self, writer: &mut Ros1Writer<'_>) -> CoreResult<()> {
        writer.write_bool(*self)
    }

    fn read(cursor: &mut Ros1Cursor<'_>) -> CoreResult<Self> {
        cursor.read_bool()
    }

    fn from_value(value: &CodecValue) -> CoreResult<Self> {
        value.as_bool().ok_or_else(|| mismatch(Self::TYPE, value))
    }

    fn to_value(&self) -> CodecValue {
        CodecValue::Bool(*self)
    }
}

macro_rules! impl_int_scalar {
    ($t:ty, $tag:ident, $read:ident, $write:ident) => {
        impl WireScalar for $t {
            const TYPE: PrimitiveType = PrimitiveType::$tag;

            fn write(&self, writer: &mut Ros1Writer<'_>) -> CoreResult<()> {
                writer.$write(*self)
            }

            fn read(cursor: &mut Ros1Cursor<'_>) -> CoreResult<Self> {
                cursor.$read()
            }

            fn from_value(value: &CodecValue) -> CoreResult<Self> {
                let n = value.as_i128().ok_or_else(|| mismatch(Self::TYPE, value))?;
                <$t>::try_from(n).map_err(|_| {
                    CodecError::encoding(
                        Self::TYPE.as_str(),
                        format!(
                            "value {n} out of range [{}, {}]",
                            <$t>::MIN,
                            <$t>::MAX
                        ),
                    )
                })
            }

            fn to_value(&self) -> CodecValue {
                CodecValue::$tag(*self)
            }
        }
    };
}

impl_int_scalar!(i8, Int8, read_i8, write_i8);
impl_int_scalar!(i16, Int16, read_i16, write_i16);
impl_int_scalar!(i32, Int32, read_i32, write_i32);
impl_int_scalar!(i64, Int64, read_i64, write_i64);
impl_int_scalar!(u8, UInt8, read_u8, write_u8);
impl_int_scalar!(u16, UInt16, read_u16, write_u16);
impl_int_scalar!(u32, UInt32, read_u32, write_u32);
impl_int_scalar!(u64, UInt64, read_u64, write_u64);

impl WireScalar for f32 {
    const TYPE: PrimitiveType = PrimitiveType::Float32;

    fn write(&self, writer: &mut Ros1Writer<'_>) -> CoreResult<()> {
        writer.write_f32(*self)
    }

    fn read(cursor: &mut Ros1Cursor<'_>) -> CoreResult<Self> {
        cursor.read_f32()
    }

    fn from_value(value: &CodecValue) -> CoreResult<Self> {
        match value {
            CodecValue::Float32(v) => Ok(*v),
            other => {
                let v = other.as_f64().ok_or_else(|| mismatch(Self::TYPE, value))?;
                // NaN and infinities carry over; finite values must fit.
                if v.is_finite() && v.abs() > f64::from(f32::MAX) {
                    return Err(CodecError::encoding(
                        Self::TYPE.as_str(),
                        format!("value {v} out of range for float32"),
                    ));
                }
                Ok(v as f32)
            }
        }
    }

    fn to_value(&self) -> CodecValue {
        CodecValue::Float32(*self)
    }
}

impl WireScalar for f64 {
    const TYPE: PrimitiveType = PrimitiveType::Float64;

    fn write(&self, writer: &mut Ros1Writer<'_>) -> CoreResult<()> {
        writer.write_f64(*self)
    }

    fn read(cursor: &mut Ros1Cursor<'_>) -> CoreResult<Self> {
        cursor.read_f64()
    }

    fn from_value(value: &CodecValue) -> CoreResult<Self> {
        value.as_f64().ok_or_else(|| mismatch(Self::TYPE, value))
    }

    fn to_value(&self) -> CodecValue {
        CodecValue::Float64(*self)
    }
}

impl WireScalar for String {
    const TYPE: PrimitiveType = PrimitiveType::String;

    fn write(&self, writer: &mut Ros1Writer<'_>) -> CoreResult<()> {
        writer.write_string(self)
    }

    fn read(cursor: &mut Ros1Cursor<'_>) -> CoreResult<Self> {
        cursor.read_string()
    }

    fn wire_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.len()
    }

    fn from_value(value: &CodecValue) -> CoreResult<Self> {
        match value {
            CodecValue::String(s) => Ok(s.clone()),
            CodecValue::Bytes(b) => String::from_utf8(b.clone())
                .map_err(|e| CodecError::encoding("string", format!("invalid UTF-8: {e}"))),
            other => Err(mismatch(Self::TYPE, other)),
        }
    }

    fn to_value(&self) -> CodecValue {
        CodecValue::String(self.clone())
    }
}

/// Pull a `secs`/`nsecs` pair out of a `{secs, nsecs}` struct value.
fn struct_pair(ty: PrimitiveType, value: &CodecValue) -> CoreResult<(i128, i128)> {
    let fields = value.as_struct().ok_or_else(|| mismatch(ty, value))?;
    let part = |name: &str| {
        fields
            .get(name)
            .and_then(CodecValue::as_i128)
            .ok_or_else(|| CodecError::encoding(ty.as_str(), format!("missing integer '{name}'")))
    };
    Ok((part("secs")?, part("nsecs")?))
}

fn narrow<T: TryFrom<i128>>(ty: PrimitiveType, name: &str, n: i128) -> CoreResult<T> {
    T::try_from(n)
        .map_err(|_| CodecError::encoding(ty.as_str(), format!("{name} {n} out of range")))
}

impl WireScalar for Time {
    const TYPE: PrimitiveType = PrimitiveType::Time;

    fn write(&self, writer: &mut Ros1Writer<'_>) -> CoreResult<()> {
        writer.write_u32(self.secs)?;
        writer.write_u32(self.nsecs)
    }

    fn read(cursor: &mut Ros1Cursor<'_>) -> CoreResult<Self> {
        let start = cursor.clone();
        match (cursor.read_u32(), cursor.read_u32()) {
            (Ok(secs), Ok(nsecs)) => Ok(Self { secs, nsecs }),
            (Err(e), _) | (_, Err(e)) => {
                *cursor = start;
                Err(e)
            }
        }
    }

    fn from_value(value: &CodecValue) -> CoreResult<Self> {
        match value {
            CodecValue::Time { secs, nsecs } => Ok(Self::new(*secs, *nsecs)),
            other => {
                let (secs, nsecs) = struct_pair(Self::TYPE, other)?;
                Ok(Self::new(
                    narrow(Self::TYPE, "secs", secs)?,
                    narrow(Self::TYPE, "nsecs", nsecs)?,
                ))
            }
        }
    }

    fn to_value(&self) -> CodecValue {
        CodecValue::from_ros1_time(self.secs, self.nsecs)
    }
}

impl WireScalar for Duration {
    const TYPE: PrimitiveType = PrimitiveType::Duration;

    fn write(&self, writer: &mut Ros1Writer<'_>) -> CoreResult<()> {
        writer.write_i32(self.secs)?;
        writer.write_i32(self.nsecs)
    }

    fn read(cursor: &mut Ros1Cursor<'_>) -> CoreResult<Self> {
        let start = cursor.clone();
        match (cursor.read_i32(), cursor.read_i32()) {
            (Ok(secs), Ok(nsecs)) => Ok(Self { secs, nsecs }),
            (Err(e), _) | (_, Err(e)) => {
                *cursor = start;
                Err(e)
            }
        }
    }

    fn from_value(value: &CodecValue) -> CoreResult<Self> {
        match value {
            CodecValue::Duration { secs, nsecs } => Ok(Self::new(*secs, *nsecs)),
            other => {
                let (secs, nsecs) = struct_pair(Self::TYPE, other)?;
                Ok(Self::new(
                    narrow(Self::TYPE, "secs", secs)?,
                    narrow(Self::TYPE, "nsecs", nsecs)?,
                ))
            }
        }
    }

    fn to_value(&self) -> CodecValue {
        CodecValue::from_ros1_duration(self.secs, self.nsecs)
    }
}

/// Encode one value at `offset`, returning the offset after it.
pub fn encode_value<T: WireScalar>(
    value: &T,
    buffer: &mut [u8],
    offset: usize,
) -> CoreResult<usize> {
    let mut writer = Ros1Writer::with_offset(buffer, offset);
    value.write(&mut writer)?;
    Ok(writer.position())
}

/// Decode one value at `offset`, returning it with the offset after it.
pub fn decode_value<T: WireScalar>(buffer: &[u8], offset: usize) -> CoreResult<(T, usize)> {
    let mut cursor = Ros1Cursor::with_offset(buffer, offset);
    let value = T::read(&mut cursor)?;
    Ok((value, cursor.position()))
}

/// Encode a sequence.
///
/// `fixed_length: None` writes a count prefix; `Some(n)` requires exactly `n`
/// elements and writes no prefix.
pub fn encode_array<T: WireScalar>(
    values: &[T],
    buffer: &mut [u8],
    offset: usize,
    fixed_length: Option<usize>,
) -> CoreResult<usize> {
    let mut writer = Ros1Writer::with_offset(buffer, offset);
    write_array(values, &mut writer, fixed_length)?;
    Ok(writer.position())
}

/// Write a sequence at the writer's position.
pub fn write_array<T: WireScalar>(
    values: &[T],
    writer: &mut Ros1Writer<'_>,
    fixed_length: Option<usize>,
) -> CoreResult<()> {
    match fixed_length {
        Some(n) if values.len() != n => return Err(CodecError::length_mismatch(n, values.len())),
        Some(_) => {}
        None => writer.write_length(values.len())?,
    }
    for value in values {
        value.write(writer)?;
    }
    Ok(())
}

/// Decode a sequence, mirroring [`encode_array`].
pub fn decode_array<T: WireScalar>(
    buffer: &[u8],
    offset: usize,
    fixed_length: Option<usize>,
) -> CoreResult<(Vec<T>, usize)> {
    let mut cursor = Ros1Cursor::with_offset(buffer, offset);
    let values = read_array(&mut cursor, fixed_length)?;
    Ok((values, cursor.position()))
}

/// Read a sequence at the cursor's position.
pub fn read_array<T: WireScalar>(
    cursor: &mut Ros1Cursor<'_>,
    fixed_length: Option<usize>,
) -> CoreResult<Vec<T>> {
    let len = match fixed_length {
        Some(n) => n,
        None => cursor.read_length()?,
    };
    // Fixed-size elements that cannot all fit are rejected before allocating.
    if let Some(size) = T::TYPE.size() {
        let needed = len.saturating_mul(size);
        if needed > cursor.remaining() {
            return Err(CodecError::truncated(
                needed,
                cursor.remaining(),
                cursor.position() as u64,
            ));
        }
    }
    let mut values = Vec::with_capacity(len.min(1024));
    for _ in 0..len {
        values.push(T::read(cursor)?);
    }
    Ok(values)
}

/// Encoded size of one value.
pub fn value_size<T: WireScalar>(value: &T) -> usize {
    value.wire_size()
}

/// Encoded size of a sequence; fixed arrays have no count prefix.
pub fn array_size<T: WireScalar>(values: &[T], fixed_length: Option<usize>) -> usize {
    let mut calc = Ros1Calculator::new();
    if fixed_length.is_none() {
        calc.sequence_length();
    }
    match T::TYPE.size() {
        Some(size) => calc.bytes(values.len() * size),
        None => values.iter().map(T::wire_size).fold(calc.size(), |acc, n| acc + n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_i32() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_value(&-7i32, &mut buf, 0).unwrap(), 4);
        assert_eq!(buf, (-7i32).to_le_bytes());
        assert_eq!(decode_value::<i32>(&buf, 0).unwrap(), (-7, 4));
    }

    #[test]
    fn test_int_range_check() {
        assert_eq!(i8::from_value(&CodecValue::Int64(-128)).unwrap(), -128);
        let err = i8::from_value(&CodecValue::Int64(128)).unwrap_err();
        assert!(matches!(err, CodecError::Encoding { ref type_name, .. } if type_name == "int8"));
        assert!(u16::from_value(&CodecValue::Int32(-1)).is_err());
        assert!(u64::from_value(&CodecValue::UInt64(u64::MAX)).is_ok());
        assert!(i32::from_value(&CodecValue::Float64(1.0)).is_err());
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(f32::from_value(&CodecValue::Float64(1.5)).unwrap(), 1.5);
        assert_eq!(f64::from_value(&CodecValue::Int8(3)).unwrap(), 3.0);
        assert!(f64::from_value(&CodecValue::Bool(true)).is_err());
    }

    #[test]
    fn test_bool_strict() {
        assert!(bool::from_value(&CodecValue::Bool(true)).unwrap());
        assert!(bool::from_value(&CodecValue::Int8(1)).is_err());
    }

    #[test]
    fn test_string_from_bytes() {
        let s = String::from_value(&CodecValue::Bytes(b"abc".to_vec())).unwrap();
        assert_eq!(s, "abc");
        assert!(String::from_value(&CodecValue::Bytes(vec![0xFF])).is_err());
        assert_eq!(s.wire_size(), 7);
    }

    #[test]
    fn test_time_wire_layout() {
        let mut buf = [0u8; 8];
        encode_value(&Time::new(1, 2), &mut buf, 0).unwrap();
        assert_eq!(buf, [1, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(decode_value::<Time>(&buf, 0).unwrap(), (Time::new(1, 2), 8));
    }

    #[test]
    fn test_duration_negative() {
        let mut buf = [0u8; 8];
        encode_value(&Duration::new(-1, -5), &mut buf, 0).unwrap();
        assert_eq!(
            decode_value::<Duration>(&buf, 0).unwrap(),
            (Duration::new(-1, -5), 8)
        );
    }

    #[test]
    fn test_time_from_struct_value() {
        let mut fields = crate::core::DecodedMessage::new();
        fields.insert("secs".to_string(), CodecValue::Int64(10));
        fields.insert("nsecs".to_string(), CodecValue::Int64(20));
        let t = Time::from_value(&CodecValue::Struct(fields.clone())).unwrap();
        assert_eq!(t, Time::new(10, 20));

        fields.insert("secs".to_string(), CodecValue::Int64(-1));
        assert!(Time::from_value(&CodecValue::Struct(fields)).is_err());
    }

    #[test]
    fn test_time_truncated_does_not_advance() {
        let buf = [0u8; 6];
        let mut cursor = Ros1Cursor::new(&buf);
        assert!(Time::read(&mut cursor).is_err());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_unbounded_array() {
        let values = vec![1i8, -2, 3];
        let size = array_size(&values, None);
        assert_eq!(size, 7);
        let mut buf = vec![0u8; size];
        assert_eq!(encode_array(&values, &mut buf, 0, None).unwrap(), 7);
        assert_eq!(buf, [3, 0, 0, 0, 1, 0xFE, 3]);
        assert_eq!(decode_array::<i8>(&buf, 0, None).unwrap(), (values, 7));
    }

    #[test]
    fn test_fixed_array_mismatch() {
        let mut buf = [0u8; 12];
        let err = encode_array(&[1i32, 2], &mut buf, 0, Some(3)).unwrap_err();
        assert_eq!(err, CodecError::length_mismatch(3, 2));
    }

    #[test]
    fn test_string_array_size() {
        let values = vec!["a".to_string(), "bc".to_string()];
        assert_eq!(array_size(&values, None), 4 + 5 + 6);
        assert_eq!(array_size(&values, Some(2)), 11);
    }

    #[test]
    fn test_decode_array_count_past_end() {
        let buf = 1000u32.to_le_bytes();
        let err = decode_array::<u16>(&buf, 0, None).unwrap_err();
        assert_eq!(err, CodecError::truncated(2000, 0, 4));
    }
}
