// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! Provides the dynamic value representation the codec engine reads and
//! writes, plus the primitive type tags of the ROS1 wire format. All variants
//! are serde-serializable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Type alias for decoded message as field name -> value mapping.
pub type DecodedMessage = HashMap<String, CodecValue>;

/// Dynamic value of one message field.
///
/// Scalars map one-to-one onto ROS1 primitive types. `Time` and `Duration`
/// keep the raw `secs`/`nsecs` pair so that values round-trip bit-exactly,
/// even when `nsecs` is not normalized.
///
/// `Null` marks a field that is present but undefined; default resolution
/// treats it exactly like a missing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodecValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Raw bytes, accepted for uint8[]/int8[] payloads
    Bytes(Vec<u8>),

    /// ROS1 time: unsigned seconds and nanoseconds since the epoch
    Time { secs: u32, nsecs: u32 },

    /// ROS1 duration: signed seconds and nanoseconds
    Duration { secs: i32, nsecs: i32 },

    // Array of values
    Array(Vec<CodecValue>),

    // Nested message
    Struct(DecodedMessage),

    // Undefined value
    Null,
}

impl CodecValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CodecValue::Null)
    }

    /// Widen any integer value to i128 for range checking.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            CodecValue::Int8(v) => Some(*v as i128),
            CodecValue::Int16(v) => Some(*v as i128),
            CodecValue::Int32(v) => Some(*v as i128),
            CodecValue::Int64(v) => Some(*v as i128),
            CodecValue::UInt8(v) => Some(*v as i128),
            CodecValue::UInt16(v) => Some(*v as i128),
            CodecValue::UInt32(v) => Some(*v as i128),
            CodecValue::UInt64(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Float32(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            other => other.as_i128().map(|v| v as f64),
        }
    }

    /// Try to get the inner bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CodecValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Bool(_) => "bool",
            CodecValue::Int8(_) => "int8",
            CodecValue::Int16(_) => "int16",
            CodecValue::Int32(_) => "int32",
            CodecValue::Int64(_) => "int64",
            CodecValue::UInt8(_) => "uint8",
            CodecValue::UInt16(_) => "uint16",
            CodecValue::UInt32(_) => "uint32",
            CodecValue::UInt64(_) => "uint64",
            CodecValue::Float32(_) => "float32",
            CodecValue::Float64(_) => "float64",
            CodecValue::String(_) => "string",
            CodecValue::Bytes(_) => "bytes",
            CodecValue::Time { .. } => "time",
            CodecValue::Duration { .. } => "duration",
            CodecValue::Array(_) => "array",
            CodecValue::Struct(_) => "struct",
            CodecValue::Null => "null",
        }
    }

    /// Create a time value from ROS1 `secs`/`nsecs`.
    pub fn from_ros1_time(secs: u32, nsecs: u32) -> Self {
        CodecValue::Time { secs, nsecs }
    }

    /// Create a duration value from ROS1 `secs`/`nsecs`.
    pub fn from_ros1_duration(secs: i32, nsecs: i32) -> Self {
        CodecValue::Duration { secs, nsecs }
    }
}

impl fmt::Display for CodecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecValue::Bool(v) => write!(f, "{v}"),
            CodecValue::Int8(v) => write!(f, "{v}"),
            CodecValue::Int16(v) => write!(f, "{v}"),
            CodecValue::Int32(v) => write!(f, "{v}"),
            CodecValue::Int64(v) => write!(f, "{v}"),
            CodecValue::UInt8(v) => write!(f, "{v}"),
            CodecValue::UInt16(v) => write!(f, "{v}"),
            CodecValue::UInt32(v) => write!(f, "{v}"),
            CodecValue::UInt64(v) => write!(f, "{v}"),
            CodecValue::Float32(v) => write!(f, "{v}"),
            CodecValue::Float64(v) => write!(f, "{v}"),
            CodecValue::String(v) => write!(f, "\"{v}\""),
            CodecValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            CodecValue::Time { secs, nsecs } => write!(f, "Time({secs}.{nsecs:09})"),
            CodecValue::Duration { secs, nsecs } => write!(f, "Duration({secs}s {nsecs}ns)"),
            CodecValue::Array(v) => write!(f, "[{} elements]", v.len()),
            CodecValue::Struct(v) => write!(f, "{{{} fields}}", v.len()),
            CodecValue::Null => write!(f, "null"),
        }
    }
}

// =============================================================================
// Primitive Type Enum
// =============================================================================

/// Primitive type tags of the ROS1 wire format.
///
/// `byte` and `char` are parsed as aliases of `Int8` and `UInt8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Length-prefixed UTF-8 string
    String,
    /// ROS1 time (secs: uint32, nsecs: uint32)
    Time,
    /// ROS1 duration (secs: int32, nsecs: int32)
    Duration,
}

impl PrimitiveType {
    /// Get the size in bytes for this primitive type, if fixed.
    pub const fn size(self) -> Option<usize> {
        match self {
            PrimitiveType::Bool | PrimitiveType::Int8 | PrimitiveType::UInt8 => Some(1),
            PrimitiveType::Int16 | PrimitiveType::UInt16 => Some(2),
            PrimitiveType::Int32 | PrimitiveType::UInt32 | PrimitiveType::Float32 => Some(4),
            PrimitiveType::Int64 | PrimitiveType::UInt64 | PrimitiveType::Float64 => Some(8),
            PrimitiveType::Time | PrimitiveType::Duration => Some(8),
            PrimitiveType::String => None,
        }
    }

    /// Parse a primitive type from its `.msg` keyword.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(PrimitiveType::Bool),
            "int8" | "byte" => Some(PrimitiveType::Int8),
            "int16" => Some(PrimitiveType::Int16),
            "int32" => Some(PrimitiveType::Int32),
            "int64" => Some(PrimitiveType::Int64),
            "uint8" | "char" => Some(PrimitiveType::UInt8),
            "uint16" => Some(PrimitiveType::UInt16),
            "uint32" => Some(PrimitiveType::UInt32),
            "uint64" => Some(PrimitiveType::UInt64),
            "float32" => Some(PrimitiveType::Float32),
            "float64" => Some(PrimitiveType::Float64),
            "string" => Some(PrimitiveType::String),
            "time" => Some(PrimitiveType::Time),
            "duration" => Some(PrimitiveType::Duration),
            _ => None,
        }
    }

    /// The zero value used when a field of this type has no explicit value.
    pub fn default_value(self) -> CodecValue {
        match self {
            PrimitiveType::Bool => CodecValue::Bool(false),
            PrimitiveType::Int8 => CodecValue::Int8(0),
            PrimitiveType::Int16 => CodecValue::Int16(0),
            PrimitiveType::Int32 => CodecValue::Int32(0),
            PrimitiveType::Int64 => CodecValue::Int64(0),
            PrimitiveType::UInt8 => CodecValue::UInt8(0),
            PrimitiveType::UInt16 => CodecValue::UInt16(0),
            PrimitiveType::UInt32 => CodecValue::UInt32(0),
            PrimitiveType::UInt64 => CodecValue::UInt64(0),
            PrimitiveType::Float32 => CodecValue::Float32(0.0),
            PrimitiveType::Float64 => CodecValue::Float64(0.0),
            PrimitiveType::String => CodecValue::String(String::new()),
            PrimitiveType::Time => CodecValue::Time { secs: 0, nsecs: 0 },
            PrimitiveType::Duration => CodecValue::Duration { secs: 0, nsecs: 0 },
        }
    }

    /// The `.msg` keyword for this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
            PrimitiveType::String => "string",
            PrimitiveType::Time => "time",
            PrimitiveType::Duration => "duration",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(CodecValue::Null.is_null());
        assert!(!CodecValue::Bool(false).is_null());
        assert_eq!(CodecValue::Bool(true).as_bool(), Some(true));
        assert_eq!(CodecValue::Int8(1).as_bool(), None);
        assert_eq!(CodecValue::String("a".to_string()).as_str(), Some("a"));
        assert!(CodecValue::Array(vec![]).as_array().is_some());
        assert!(CodecValue::Bytes(vec![1]).as_array().is_none());
    }

    #[test]
    fn test_as_i128_widening() {
        assert_eq!(CodecValue::UInt64(u64::MAX).as_i128(), Some(u64::MAX as i128));
        assert_eq!(CodecValue::Int8(-5).as_i128(), Some(-5));
        assert_eq!(CodecValue::Float32(1.0).as_i128(), None);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(CodecValue::Int32(42).as_f64(), Some(42.0));
        assert_eq!(CodecValue::Float32(2.5).as_f64(), Some(2.5));
        assert_eq!(CodecValue::String("x".to_string()).as_f64(), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(CodecValue::Bool(true).type_name(), "bool");
        assert_eq!(CodecValue::UInt64(0).type_name(), "uint64");
        assert_eq!(CodecValue::from_ros1_time(0, 0).type_name(), "time");
        assert_eq!(CodecValue::Struct(HashMap::new()).type_name(), "struct");
        assert_eq!(CodecValue::Null.type_name(), "null");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CodecValue::Int32(42)), "42");
        assert_eq!(format!("{}", CodecValue::String("a".to_string())), "\"a\"");
        assert_eq!(format!("{}", CodecValue::from_ros1_time(3, 5)), "Time(3.000000005)");
        assert_eq!(format!("{}", CodecValue::Array(vec![])), "[0 elements]");
    }

    #[test]
    fn test_primitive_type_size() {
        assert_eq!(PrimitiveType::Bool.size(), Some(1));
        assert_eq!(PrimitiveType::Int16.size(), Some(2));
        assert_eq!(PrimitiveType::Float32.size(), Some(4));
        assert_eq!(PrimitiveType::UInt64.size(), Some(8));
        assert_eq!(PrimitiveType::Time.size(), Some(8));
        assert_eq!(PrimitiveType::String.size(), None);
    }

    #[test]
    fn test_primitive_type_aliases() {
        assert_eq!(PrimitiveType::try_from_str("byte"), Some(PrimitiveType::Int8));
        assert_eq!(PrimitiveType::try_from_str("char"), Some(PrimitiveType::UInt8));
        assert_eq!(
            PrimitiveType::try_from_str("duration"),
            Some(PrimitiveType::Duration)
        );
        assert_eq!(PrimitiveType::try_from_str("float"), None);
        assert_eq!(PrimitiveType::try_from_str("wstring"), None);
    }

    #[test]
    fn test_primitive_default_value() {
        assert_eq!(PrimitiveType::Bool.default_value(), CodecValue::Bool(false));
        assert_eq!(
            PrimitiveType::String.default_value(),
            CodecValue::String(String::new())
        );
        assert_eq!(
            PrimitiveType::Time.default_value(),
            CodecValue::from_ros1_time(0, 0)
        );
    }

    #[test]
    fn test_primitive_display_round_trip() {
        for ty in [
            PrimitiveType::Bool,
            PrimitiveType::Int64,
            PrimitiveType::UInt16,
            PrimitiveType::Float64,
            PrimitiveType::String,
            PrimitiveType::Duration,
        ] {
            assert_eq!(PrimitiveType::try_from_str(&ty.to_string()), Some(ty));
        }
    }

    #[test]
    fn test_serialization() {
        let value = CodecValue::from_ros1_time(10, 20);
        let json = serde_json::to_string(&value).unwrap();
        let decoded: CodecValue = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, value);
    }
}
