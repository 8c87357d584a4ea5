// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON module.
//!
//! Converts between JSON text and decoded messages.

pub mod decoder;

pub use decoder::JsonDecoder;
