// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use robowire::{CodecValue, DecodedMessage};

/// Get the path to a test fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Read a test fixture file to a string
pub fn fixture_text(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {:?}: {e}", path))
}

/// Build a decoded message from `(name, value)` pairs
pub fn message(entries: &[(&str, CodecValue)]) -> DecodedMessage {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Build a string value
pub fn string(s: &str) -> CodecValue {
    CodecValue::String(s.to_string())
}

/// Extract a nested message field, panicking with context if absent
pub fn nested<'m>(message: &'m DecodedMessage, field: &str) -> &'m DecodedMessage {
    message
        .get(field)
        .and_then(CodecValue::as_struct)
        .unwrap_or_else(|| panic!("Field '{field}' is not a nested message: {message:?}"))
}
