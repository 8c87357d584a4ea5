// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Default resolution for partially specified messages.

use crate::core::{CodecValue, DecodedMessage};

/// Ordered `(field name, default value)` pairs for one message type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultTable {
    entries: Vec<(String, CodecValue)>,
}

impl DefaultTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing the value of an existing name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: CodecValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: CodecValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up the default for `name`.
    pub fn get(&self, name: &str) -> Option<&CodecValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CodecValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// The fully defaulted message.
    pub fn into_message(self) -> DecodedMessage {
        self.entries.into_iter().collect()
    }
}

impl FromIterator<(String, CodecValue)> for DefaultTable {
    fn from_iter<I: IntoIterator<Item = (String, CodecValue)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

/// Fill every field of `defaults` from `partial`, falling back to the default.
///
/// A partial value of [`CodecValue::Null`] counts as absent. Keys in
/// `partial` that the table does not name are dropped.
pub fn resolve_defaults(partial: &DecodedMessage, defaults: &DefaultTable) -> DecodedMessage {
    defaults
        .iter()
        .map(|(name, default)| {
            let value = match partial.get(name) {
                Some(v) if !v.is_null() => v.clone(),
                _ => default.clone(),
            };
            (name.to_string(), value)
        })
        .collect()
}
