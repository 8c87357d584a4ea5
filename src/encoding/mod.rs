// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding implementations.
//!
//! - [`ros1`] - ROS1 wire format engine, typed scalars and schema-driven codec
//! - [`json`] - JSON conversion for decoded messages

pub mod json;
pub mod ros1;

pub use json::JsonDecoder;
pub use ros1::{CodecOptions, DefaultTable, Ros1Codec};
