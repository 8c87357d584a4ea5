// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 wire format module.
//!
//! Provides encoding, decoding, and size calculation for ROS1 serialized
//! messages. The format is little-endian with no alignment or padding:
//!
//! | Type | Encoding |
//! |---|---|
//! | `bool` | 1 byte, `0x00` or `0x01` |
//! | `int8`..`int64`, `uint8`..`uint64` | 1/2/4/8 bytes, two's complement |
//! | `float32`, `float64` | IEEE-754, 4/8 bytes |
//! | `string` | `uint32` byte length + UTF-8 bytes, no terminator |
//! | `time` | `uint32` secs + `uint32` nsecs |
//! | `duration` | `int32` secs + `int32` nsecs |
//! | `T[]` | `uint32` element count + elements |
//! | `T[N]` | exactly N elements, no prefix |

pub mod calculator;
pub mod cursor;
pub mod defaults;
pub mod engine;
pub mod message;
pub mod primitive;
pub mod writer;

pub use calculator::Ros1Calculator;
pub use cursor::Ros1Cursor;
pub use defaults::{resolve_defaults, DefaultTable};
pub use engine::{decode_array, decode_scalar, encode_array, encode_scalar, measure_size};
pub use message::Ros1Codec;
pub use primitive::{Duration, Time, WireScalar};
pub use writer::Ros1Writer;

/// Size of a string length or sequence count prefix.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Maximum allowed sequence or string length to prevent OOM attacks.
pub const MAX_SEQUENCE_LENGTH: usize = 10_000_000;

/// Options controlling ROS1 encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Largest element count or string byte length in a length prefix
    pub max_sequence_length: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }
}

impl CodecOptions {
    /// Create options with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum sequence length.
    pub fn with_max_sequence_length(mut self, max_sequence_length: usize) -> Self {
        self.max_sequence_length = max_sequence_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_options_default() {
        assert_eq!(CodecOptions::default().max_sequence_length, 10_000_000);
    }

    #[test]
    fn test_codec_options_builder() {
        let options = CodecOptions::new().with_max_sequence_length(16);
        assert_eq!(options.max_sequence_length, 16);
    }
}
