// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Traits implemented by generated ROS1 message and service types.
//!
//! A generated message is a plain struct whose fields map onto the `.msg`
//! definition in order. It implements [`Encodable`] and [`Decodable`] by
//! calling the typed helpers in [`encoding::ros1::primitive`], and
//! [`RosMessage`] to carry its datatype, md5sum and definition and to bridge
//! to the dynamic [`DecodedMessage`] form.
//!
//! [`encoding::ros1::primitive`]: crate::encoding::ros1::primitive

use std::fmt::Debug;

use crate::core::{CodecError, CodecValue, DecodedMessage, PrimitiveType, Result};
use crate::encoding::ros1::{resolve_defaults, DefaultTable, WireScalar};
use crate::schema::{parse_schema, parse_service, MessageSchema, ServiceSchema};

/// A value that can be written in ROS1 wire format.
pub trait Encodable {
    /// Exact number of bytes [`encode`](Self::encode) writes.
    fn encoded_len(&self) -> usize;

    /// Write at `offset`, returning the offset just past the written bytes.
    ///
    /// Fails with [`CodecError::TruncatedBuffer`] if `buffer` is too small.
    fn encode(&self, buffer: &mut [u8], offset: usize) -> Result<usize>;

    /// Serialize into a new buffer of exactly [`encoded_len`](Self::encoded_len) bytes.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.encoded_len()];
        self.encode(&mut buffer, 0)?;
        Ok(buffer)
    }
}

/// A value that can be read from ROS1 wire format.
pub trait Decodable: Sized {
    /// Read at `offset`, returning the value and the offset just past it.
    fn decode(buffer: &[u8], offset: usize) -> Result<(Self, usize)>;

    /// Deserialize from the start of `buffer`. Trailing bytes are ignored.
    fn from_bytes(buffer: &[u8]) -> Result<Self> {
        let (value, end) = Self::decode(buffer, 0)?;
        if end < buffer.len() {
            tracing::debug!(
                consumed = end,
                trailing = buffer.len() - end,
                "ignoring trailing bytes after message"
            );
        }
        Ok(value)
    }
}

/// A generated ROS1 message type.
pub trait RosMessage: Encodable + Decodable + Default + Clone + Debug + PartialEq {
    /// Fully qualified datatype, e.g. `papouch_ros/WriteIORequest`.
    const DATATYPE: &'static str;

    /// md5sum of the message definition.
    const MD5SUM: &'static str;

    /// `.msg` definition text.
    const DEFINITION: &'static str;

    /// Ordered per-field defaults.
    fn defaults() -> DefaultTable;

    /// Convert into the dynamic representation.
    fn to_value(&self) -> DecodedMessage;

    /// Build from a complete dynamic message.
    ///
    /// Every field must be present and non-null.
    fn from_value(message: &DecodedMessage) -> Result<Self>;

    /// Build from a partial message, filling missing fields with defaults.
    fn resolve(partial: &DecodedMessage) -> Result<Self> {
        Self::from_value(&resolve_defaults(partial, &Self::defaults()))
    }

    /// Parse [`DEFINITION`](Self::DEFINITION) into a schema.
    fn schema() -> Result<MessageSchema> {
        parse_schema(Self::DATATYPE, Self::DEFINITION)
    }
}

/// A generated ROS1 service: a request and response message pair.
pub trait RosService {
    /// Request message.
    type Request: RosMessage;

    /// Response message.
    type Response: RosMessage;

    /// Fully qualified service datatype, e.g. `papouch_ros/WriteIO`.
    const DATATYPE: &'static str;

    /// md5sum of the combined request and response definitions.
    const MD5SUM: &'static str;

    /// Parse the request and response definitions into a service schema.
    fn schema() -> Result<ServiceSchema> {
        let definition = format!(
            "{}\n---\n{}",
            <Self::Request as RosMessage>::DEFINITION,
            <Self::Response as RosMessage>::DEFINITION
        );
        parse_service(Self::DATATYPE, &definition)
    }
}

fn required<'m>(message: &'m DecodedMessage, datatype: &str, name: &str) -> Result<&'m CodecValue> {
    match message.get(name) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(CodecError::encoding(
            datatype,
            format!("missing field '{datatype}.{name}'"),
        )),
    }
}

/// Read scalar field `name` of `datatype` out of a dynamic message.
pub fn scalar_field<T: WireScalar>(
    message: &DecodedMessage,
    datatype: &str,
    name: &str,
) -> Result<T> {
    T::from_value(required(message, datatype, name)?)
}

/// Read sequence field `name` of `datatype` out of a dynamic message.
///
/// `int8`/`uint8` sequences also accept [`CodecValue::Bytes`].
pub fn array_field<T: WireScalar>(
    message: &DecodedMessage,
    datatype: &str,
    name: &str,
) -> Result<Vec<T>> {
    match required(message, datatype, name)? {
        CodecValue::Array(values) => values.iter().map(T::from_value).collect(),
        CodecValue::Bytes(bytes) if T::TYPE == PrimitiveType::UInt8 => bytes
            .iter()
            .map(|b| T::from_value(&CodecValue::UInt8(*b)))
            .collect(),
        CodecValue::Bytes(bytes) if T::TYPE == PrimitiveType::Int8 => bytes
            .iter()
            .map(|b| T::from_value(&CodecValue::Int8(*b as i8)))
            .collect(),
        other => Err(CodecError::encoding(
            T::TYPE.as_str(),
            format!("field '{datatype}.{name}': expected array, got {}", other.type_name()),
        )),
    }
}

/// Convert a typed sequence into its dynamic form.
///
/// `uint8` sequences become [`CodecValue::Bytes`], matching the dynamic codec.
pub fn array_value<T: WireScalar>(values: &[T]) -> CodecValue {
    if T::TYPE == PrimitiveType::UInt8 {
        let bytes = values
            .iter()
            .filter_map(|v| match v.to_value() {
                CodecValue::UInt8(b) => Some(b),
                _ => None,
            })
            .collect();
        return CodecValue::Bytes(bytes);
    }
    CodecValue::Array(values.iter().map(WireScalar::to_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(entries: &[(&str, CodecValue)]) -> DecodedMessage {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_scalar_field() {
        let m = msg(&[("retval", CodecValue::Bool(true))]);
        assert!(scalar_field::<bool>(&m, "pkg/T", "retval").unwrap());
        let err = scalar_field::<bool>(&m, "pkg/T", "other").unwrap_err();
        assert!(
            matches!(err, CodecError::Encoding { ref reason, .. } if reason.contains("pkg/T.other"))
        );
    }

    #[test]
    fn test_array_field_accepts_bytes() {
        let m = msg(&[("data", CodecValue::Bytes(vec![0xFF, 1]))]);
        assert_eq!(array_field::<i8>(&m, "pkg/T", "data").unwrap(), vec![-1, 1]);
        assert_eq!(array_field::<u8>(&m, "pkg/T", "data").unwrap(), vec![255, 1]);
        assert!(array_field::<i32>(&m, "pkg/T", "data").is_err());
    }

    #[test]
    fn test_array_field_range_checked() {
        let m = msg(&[("xs", CodecValue::Array(vec![CodecValue::Int64(200)]))]);
        assert!(array_field::<i8>(&m, "pkg/T", "xs").is_err());
    }

    #[test]
    fn test_array_value() {
        assert_eq!(array_value(&[1u8, 2]), CodecValue::Bytes(vec![1, 2]));
        assert_eq!(
            array_value(&[-1i8]),
            CodecValue::Array(vec![CodecValue::Int8(-1)])
        );
    }
}
