// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robowire
//!
//! ROS1 message wire codec.
//!
//! The library serializes ROS1 primitive values, strings and arrays into the
//! little-endian ROS1 wire format and back, and builds on that to encode
//! whole messages and services:
//! - **Wire engine** in [`encoding::ros1`] for scalars, strings and arrays
//! - **Schema parsing** of `.msg` and `.srv` definitions in [`schema`]
//! - **Dynamic codec** [`Ros1Codec`] driven by a parsed schema
//! - **Generated types** in [`msgs`] implementing [`RosMessage`] and [`RosService`]
//!
//! ## Example: Generated service types
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robowire::msgs::papouch_ros::WriteIORequest;
//! use robowire::{Decodable, Encodable};
//!
//! let request = WriteIORequest { channel: vec![1, 2], state: vec![1, 0] };
//! let bytes = request.to_bytes()?;
//! assert_eq!(bytes.len(), 12);
//! assert_eq!(WriteIORequest::from_bytes(&bytes)?, request);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Schema-driven codec
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robowire::schema::parse_schema;
//! use robowire::{CodecValue, DecodedMessage, Ros1Codec};
//!
//! let schema = parse_schema("pkg/Point", "float64 x\nfloat64 y")?;
//! let codec = Ros1Codec::new();
//!
//! let mut partial = DecodedMessage::new();
//! partial.insert("x".to_string(), CodecValue::Float64(1.5));
//! let message = codec.resolve(&schema, &partial)?;
//!
//! let bytes = codec.encode(&schema, &message)?;
//! assert_eq!(bytes.len(), 16);
//! assert_eq!(codec.decode(&schema, &bytes)?, message);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, CodecValue, DecodedMessage, PrimitiveType, Result, TypeRegistry};

// Encoding/decoding
pub mod encoding;

pub use encoding::ros1::{CodecOptions, DefaultTable, Ros1Codec};

// Schema parsing
pub mod schema;

// Message traits for generated types
pub mod message;

pub use message::{Decodable, Encodable, RosMessage, RosService};

// Generated message and service types
pub mod msgs;
