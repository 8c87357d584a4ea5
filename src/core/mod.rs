// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout robowire.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error taxonomy for the wire layer and schema handling
//! - [`CodecValue`] - Dynamic field value representation
//! - [`PrimitiveType`] - ROS1 primitive type tags
//! - [`TypeRegistry`] - Schema registry keyed by datatype

pub mod error;
pub mod registry;
pub mod value;

pub use error::{CodecError, Result};
pub use registry::TypeRegistry;
pub use value::{CodecValue, DecodedMessage, PrimitiveType};
