// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dynamic ROS1 codec engine.
//!
//! Encodes and decodes [`CodecValue`]s described by a [`PrimitiveType`] tag.
//! Every operation takes a buffer and an offset and returns the offset just
//! past the bytes it consumed or produced, so sequential calls thread a
//! single cursor through a message.
//!
//! The engine is stateless. Each tag dispatches to the typed
//! [`WireScalar`] impl, which keeps the dynamic and generated paths on the
//! same wire code.

use super::calculator::Ros1Calculator;
use super::cursor::Ros1Cursor;
use super::primitive::{Duration, Time, WireScalar};
use super::writer::Ros1Writer;
use super::LENGTH_PREFIX_SIZE;
use crate::core::{CodecError, CodecValue, PrimitiveType, Result as CoreResult};
use crate::schema::FieldType;

/// Run `$body` with `$T` bound to the Rust type of primitive tag `$ty`.
macro_rules! with_scalar_type {
    ($ty:expr, $T:ident => $body:expr) => {
        match $ty {
            PrimitiveType::Bool => {
                type $T = bool;
                $body
            }
            PrimitiveType::Int8 => {
                type $T = i8;
                $body
            }
            PrimitiveType::Int16 => {
                type $T = i16;
                $body
            }
            PrimitiveType::Int32 => {
                type $T = i32;
                $body
            }
            PrimitiveType::Int64 => {
                type $T = i64;
                $body
            }
            PrimitiveType::UInt8 => {
                type $T = u8;
                $body
            }
            PrimitiveType::UInt16 => {
                type $T = u16;
                $body
            }
            PrimitiveType::UInt32 => {
                type $T = u32;
                $body
            }
            PrimitiveType::UInt64 => {
                type $T = u64;
                $body
            }
            PrimitiveType::Float32 => {
                type $T = f32;
                $body
            }
            PrimitiveType::Float64 => {
                type $T = f64;
                $body
            }
            PrimitiveType::String => {
                type $T = String;
                $body
            }
            PrimitiveType::Time => {
                type $T = Time;
                $body
            }
            PrimitiveType::Duration => {
                type $T = Duration;
                $body
            }
        }
    };
}

/// Encode one scalar at `offset`, returning the offset after it.
///
/// Fails with [`CodecError::Encoding`] when `value` is not representable as
/// `ty`, and with [`CodecError::TruncatedBuffer`] when `buffer` is too small.
pub fn encode_scalar(
    ty: PrimitiveType,
    value: &CodecValue,
    buffer: &mut [u8],
    offset: usize,
) -> CoreResult<usize> {
    let mut writer = Ros1Writer::with_offset(buffer, offset);
    write_scalar(ty, value, &mut writer)?;
    Ok(writer.position())
}

/// Decode one scalar at `offset`, returning it with the offset after it.
pub fn decode_scalar(
    ty: PrimitiveType,
    buffer: &[u8],
    offset: usize,
) -> CoreResult<(CodecValue, usize)> {
    let mut cursor = Ros1Cursor::with_offset(buffer, offset);
    let value = read_scalar(ty, &mut cursor)?;
    Ok((value, cursor.position()))
}

/// Encode a sequence of scalars at `offset`.
///
/// `fixed_length: None` writes a `uint32` count prefix followed by the
/// elements. `Some(n)` writes exactly `n` elements with no prefix and fails
/// with [`CodecError::LengthMismatch`] for any other count.
pub fn encode_array(
    element_type: PrimitiveType,
    values: &[CodecValue],
    buffer: &mut [u8],
    offset: usize,
    fixed_length: Option<usize>,
) -> CoreResult<usize> {
    let mut writer = Ros1Writer::with_offset(buffer, offset);
    write_array(element_type, values, &mut writer, fixed_length)?;
    Ok(writer.position())
}

/// Decode a sequence of scalars at `offset`, mirroring [`encode_array`].
pub fn decode_array(
    element_type: PrimitiveType,
    buffer: &[u8],
    offset: usize,
    fixed_length: Option<usize>,
) -> CoreResult<(Vec<CodecValue>, usize)> {
    let mut cursor = Ros1Cursor::with_offset(buffer, offset);
    let values = read_array(element_type, &mut cursor, fixed_length)?;
    Ok((values, cursor.position()))
}

/// Exact encoded size of `value` as `field_type`, without writing.
///
/// Nested message types need a schema to be measured; use
/// [`Ros1Codec::encoded_size`](super::Ros1Codec::encoded_size) for those.
pub fn measure_size(value: &CodecValue, field_type: &FieldType) -> CoreResult<usize> {
    match field_type {
        FieldType::Primitive(ty) => scalar_size(*ty, value),
        FieldType::Array { base_type, size } => {
            let mut calc = Ros1Calculator::new();
            if size.is_none() {
                calc.sequence_length();
            }
            if let (CodecValue::Bytes(bytes), Some(_)) = (value, byte_element(base_type)) {
                check_fixed_length(*size, bytes.len())?;
                return Ok(calc.bytes(bytes.len()));
            }
            let values = value.as_array().ok_or_else(|| {
                CodecError::encoding(
                    field_type.display_name(),
                    format!("expected array, got {}", value.type_name()),
                )
            })?;
            check_fixed_length(*size, values.len())?;
            for element in values {
                calc.bytes(measure_size(element, base_type)?);
            }
            Ok(calc.size())
        }
        FieldType::Nested(name) => Err(CodecError::unsupported(format!(
            "measuring nested type '{name}' without a schema"
        ))),
    }
}

/// Write one scalar at the writer's position.
pub fn write_scalar(
    ty: PrimitiveType,
    value: &CodecValue,
    writer: &mut Ros1Writer<'_>,
) -> CoreResult<()> {
    with_scalar_type!(ty, T => {
        let typed = T::from_value(value)?;
        typed.write(writer)
    })
}

/// Read one scalar at the cursor's position.
pub fn read_scalar(ty: PrimitiveType, cursor: &mut Ros1Cursor<'_>) -> CoreResult<CodecValue> {
    with_scalar_type!(ty, T => T::read(cursor).map(|v| v.to_value()))
}

/// Encoded size of one scalar.
pub fn scalar_size(ty: PrimitiveType, value: &CodecValue) -> CoreResult<usize> {
    if let Some(size) = ty.size() {
        return Ok(size);
    }
    match value {
        CodecValue::String(s) => Ok(LENGTH_PREFIX_SIZE + s.len()),
        other => Ok(String::from_value(other)?.wire_size()),
    }
}

/// Write a sequence of scalars at the writer's position.
pub fn write_array(
    element_type: PrimitiveType,
    values: &[CodecValue],
    writer: &mut Ros1Writer<'_>,
    fixed_length: Option<usize>,
) -> CoreResult<()> {
    check_fixed_length(fixed_length, values.len())?;
    if fixed_length.is_none() {
        writer.write_length(values.len())?;
    }
    for value in values {
        write_scalar(element_type, value, writer)?;
    }
    Ok(())
}

/// Write raw bytes as an `int8`/`uint8` sequence.
pub fn write_byte_array(
    bytes: &[u8],
    writer: &mut Ros1Writer<'_>,
    fixed_length: Option<usize>,
) -> CoreResult<()> {
    check_fixed_length(fixed_length, bytes.len())?;
    if fixed_length.is_none() {
        writer.write_length(bytes.len())?;
    }
    writer.write_bytes(bytes)
}

/// Read a sequence of scalars at the cursor's position.
pub fn read_array(
    element_type: PrimitiveType,
    cursor: &mut Ros1Cursor<'_>,
    fixed_length: Option<usize>,
) -> CoreResult<Vec<CodecValue>> {
    let len = match fixed_length {
        Some(n) => n,
        None => cursor.read_length()?,
    };
    if let Some(size) = element_type.size() {
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
        values.push(read_scalar(element_type, cursor)?);
    }
    Ok(values)
}

/// Read raw bytes of an `int8`/`uint8` sequence.
pub fn read_byte_array(
    cursor: &mut Ros1Cursor<'_>,
    fixed_length: Option<usize>,
) -> CoreResult<Vec<u8>> {
    let len = match fixed_length {
        Some(n) => n,
        None => cursor.read_length()?,
    };
    Ok(cursor.read_bytes(len)?.to_vec())
}

/// The primitive tag of a one-byte integer element type.
pub(crate) fn byte_element(field_type: &FieldType) -> Option<PrimitiveType> {
    match field_type {
        FieldType::Primitive(p @ (PrimitiveType::Int8 | PrimitiveType::UInt8)) => Some(*p),
        _ => None,
    }
}

fn check_fixed_length(fixed_length: Option<usize>, actual: usize) -> CoreResult<()> {
    match fixed_length {
        Some(expected) if expected != actual => Err(CodecError::length_mismatch(expected, actual)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_scalar_advances_offset() {
        let mut buf = [0u8; 6];
        let offset =
            encode_scalar(PrimitiveType::UInt16, &CodecValue::UInt16(0xBEEF), &mut buf, 0).unwrap();
        let offset =
            encode_scalar(PrimitiveType::Int32, &CodecValue::Int64(-1), &mut buf, offset).unwrap();
        assert_eq!(offset, 6);
        assert_eq!(buf, [0xEF, 0xBE, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_decode_scalar() {
        let buf = [0x00, 0x01];
        assert_eq!(
            decode_scalar(PrimitiveType::Bool, &buf, 1).unwrap(),
            (CodecValue::Bool(true), 2)
        );
    }

    #[test]
    fn test_encode_scalar_out_of_range() {
        let mut buf = [0u8; 1];
        let err =
            encode_scalar(PrimitiveType::UInt8, &CodecValue::Int32(256), &mut buf, 0).unwrap_err();
        assert!(matches!(err, CodecError::Encoding { .. }));
    }

    #[test]
    fn test_encode_scalar_wrong_kind() {
        let mut buf = [0u8; 8];
        let err = encode_scalar(
            PrimitiveType::Int32,
            &CodecValue::String("1".to_string()),
            &mut buf,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Encoding { .. }));
    }

    #[test]
    fn test_string_scalar() {
        let value = CodecValue::String("héllo".to_string());
        let size = scalar_size(PrimitiveType::String, &value).unwrap();
        assert_eq!(size, 4 + "héllo".len());
        let mut buf = vec![0u8; size];
        assert_eq!(encode_scalar(PrimitiveType::String, &value, &mut buf, 0).unwrap(), size);
        assert_eq!(decode_scalar(PrimitiveType::String, &buf, 0).unwrap(), (value, size));
    }

    #[test]
    fn test_array_fixed_no_prefix() {
        let values = vec![CodecValue::Int32(1), CodecValue::Int32(2), CodecValue::Int32(3)];
        let mut buf = [0u8; 12];
        assert_eq!(encode_array(PrimitiveType::Int32, &values, &mut buf, 0, Some(3)).unwrap(), 12);
        assert_eq!(&buf[..4], &[1, 0, 0, 0]);
        assert_eq!(
            decode_array(PrimitiveType::Int32, &buf, 0, Some(3)).unwrap(),
            (values, 12)
        );
    }

    #[test]
    fn test_array_fixed_mismatch() {
        let values = vec![CodecValue::Int32(1), CodecValue::Int32(2)];
        let mut buf = [0u8; 12];
        let err = encode_array(PrimitiveType::Int32, &values, &mut buf, 0, Some(3)).unwrap_err();
        assert_eq!(err, CodecError::length_mismatch(3, 2));
    }

    #[test]
    fn test_measure_size() {
        let strings = CodecValue::Array(vec![
            CodecValue::String("ab".to_string()),
            CodecValue::String(String::new()),
        ]);
        let ty = FieldType::Array {
            base_type: Box::new(FieldType::Primitive(PrimitiveType::String)),
            size: None,
        };
        assert_eq!(measure_size(&strings, &ty).unwrap(), 4 + 6 + 4);

        let bytes = CodecValue::Bytes(vec![1, 2, 3]);
        let ty = FieldType::Array {
            base_type: Box::new(FieldType::Primitive(PrimitiveType::UInt8)),
            size: Some(3),
        };
        assert_eq!(measure_size(&bytes, &ty).unwrap(), 3);

        let err =
            measure_size(&CodecValue::Null, &FieldType::Nested("pkg/T".to_string())).unwrap_err();
        assert!(matches!(err, CodecError::Unsupported { .. }));
    }

    #[test]
    fn test_byte_array_round_trip() {
        let mut buf = [0u8; 7];
        let mut writer = Ros1Writer::new(&mut buf);
        write_byte_array(&[9, 8, 7], &mut writer, None).unwrap();
        assert_eq!(writer.position(), 7);

        let mut cursor = Ros1Cursor::new(&buf);
        assert_eq!(read_byte_array(&mut cursor, None).unwrap(), vec![9, 8, 7]);
        assert!(cursor.is_at_end());
    }
}
