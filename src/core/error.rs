// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robowire.
//!
//! Every codec operation either returns its value and advanced cursor, or one
//! of the variants below. The three wire-level failures are:
//! - [`CodecError::Encoding`] - a value is not representable in its declared type
//! - [`CodecError::TruncatedBuffer`] - fewer bytes remain than the type requires
//! - [`CodecError::LengthMismatch`] - a fixed-length array has the wrong element count
//!
//! The remaining variants cover schema parsing and lookup.

use std::fmt;

/// Errors that can occur while encoding, decoding or parsing schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Value out of range or invalid for the declared wire type
    Encoding {
        /// Declared wire type (e.g. "int8", "string")
        type_name: String,
        /// Why the value could not be represented
        reason: String,
    },

    /// Not enough bytes left in the buffer
    TruncatedBuffer {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Fixed-length array element count differs from the schema
    LengthMismatch {
        /// Length declared by the schema
        expected: usize,
        /// Number of elements supplied
        actual: usize,
    },

    /// Sequence or string length prefix exceeds the configured limit
    LengthExceeded {
        /// Length that was read
        length: usize,
        /// Configured maximum
        limit: usize,
        /// Position of the length prefix
        position: usize,
    },

    /// Parse error in schema text
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Invalid schema structure
    InvalidSchema {
        /// Schema name or identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Type not found in a schema or registry
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Unsupported type or feature
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create an encoding error for a value that does not fit its wire type.
    pub fn encoding(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::Encoding {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a truncated buffer error.
    pub fn truncated(requested: usize, available: usize, cursor_pos: u64) -> Self {
        CodecError::TruncatedBuffer {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a fixed-length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        CodecError::LengthMismatch { expected, actual }
    }

    /// Create a length exceeded error.
    pub fn length_exceeded(length: usize, limit: usize, position: usize) -> Self {
        CodecError::LengthExceeded {
            length,
            limit,
            position,
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Whether this error came from the wire layer rather than schema handling.
    pub fn is_wire_error(&self) -> bool {
        matches!(
            self,
            CodecError::Encoding { .. }
                | CodecError::TruncatedBuffer { .. }
                | CodecError::LengthMismatch { .. }
                | CodecError::LengthExceeded { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::Encoding { type_name, reason } => {
                vec![("type", type_name.clone()), ("reason", reason.clone())]
            }
            CodecError::TruncatedBuffer {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::LengthMismatch { expected, actual } => vec![
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            CodecError::LengthExceeded {
                length,
                limit,
                position,
            } => vec![
                ("length", length.to_string()),
                ("limit", limit.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::Unsupported { feature } => vec![("feature", feature.clone())],
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Encoding { type_name, reason } => {
                write!(f, "Cannot encode value as '{type_name}': {reason}")
            }
            CodecError::TruncatedBuffer {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Truncated buffer: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::LengthMismatch { expected, actual } => write!(
                f,
                "Fixed-length array mismatch: expected {expected} elements, got {actual}"
            ),
            CodecError::LengthExceeded {
                length,
                limit,
                position,
            } => write!(
                f,
                "Length {length} at position {position} exceeds the limit of {limit}"
            ),
            CodecError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => {
                write!(f, "Invalid schema '{schema_name}': {reason}")
            }
            CodecError::TypeNotFound { type_name } => {
                write!(f, "Type not found: '{type_name}'")
            }
            CodecError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type for robowire operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error() {
        let err = CodecError::encoding("int8", "value 300 out of range");
        assert!(matches!(err, CodecError::Encoding { .. }));
        assert_eq!(
            err.to_string(),
            "Cannot encode value as 'int8': value 300 out of range"
        );
    }

    #[test]
    fn test_truncated_error() {
        let err = CodecError::truncated(4, 3, 0);
        assert!(matches!(err, CodecError::TruncatedBuffer { .. }));
        assert_eq!(
            err.to_string(),
            "Truncated buffer: requested 4 bytes at position 0, but only 3 bytes available"
        );
    }

    #[test]
    fn test_length_mismatch_error() {
        let err = CodecError::length_mismatch(3, 2);
        assert_eq!(
            err.to_string(),
            "Fixed-length array mismatch: expected 3 elements, got 2"
        );
    }

    #[test]
    fn test_length_exceeded_error() {
        let err = CodecError::length_exceeded(1000, 500, 8);
        assert_eq!(
            err.to_string(),
            "Length 1000 at position 8 exceeds the limit of 500"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = CodecError::parse("msg schema", "unexpected token");
        assert_eq!(
            err.to_string(),
            "Parse error in msg schema: unexpected token"
        );
    }

    #[test]
    fn test_type_not_found_error() {
        let err = CodecError::type_not_found("pkg/Missing");
        assert_eq!(err.to_string(), "Type not found: 'pkg/Missing'");
    }

    #[test]
    fn test_is_wire_error() {
        assert!(CodecError::truncated(1, 0, 0).is_wire_error());
        assert!(CodecError::length_mismatch(3, 2).is_wire_error());
        assert!(CodecError::encoding("bool", "not a bool").is_wire_error());
        assert!(!CodecError::type_not_found("x").is_wire_error());
        assert!(!CodecError::Other("x".to_string()).is_wire_error());
    }

    #[test]
    fn test_log_fields_truncated() {
        let err = CodecError::truncated(100, 50, 10);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("requested", "100".to_string()));
        assert_eq!(fields[1], ("available", "50".to_string()));
        assert_eq!(fields[2], ("cursor", "10".to_string()));
    }

    #[test]
    fn test_log_fields_length_mismatch() {
        let fields = CodecError::length_mismatch(3, 2).log_fields();
        assert_eq!(fields[0], ("expected", "3".to_string()));
        assert_eq!(fields[1], ("actual", "2".to_string()));
    }

    #[test]
    fn test_log_fields_encoding() {
        let fields = CodecError::encoding("uint8", "negative").log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "type");
        assert_eq!(fields[1].1, "negative");
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::parse("Context", "message");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
