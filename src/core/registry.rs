// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Thread-safe registry for parsed schemas keyed by ROS datatype.
//!
//! Generated bindings look message types up by their datatype string
//! (e.g. `papouch_ros/WriteIORequest`); this registry provides that lookup
//! for dynamically parsed schemas.

use super::error::{CodecError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe registry for parsed schemas.
///
/// Uses RwLock for concurrent read access with exclusive write access.
pub struct TypeRegistry<T> {
    inner: RwLock<HashMap<String, T>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> CodecError {
    CodecError::Other(format!("Registry lock poisoned: {e}"))
}

impl<T> TypeRegistry<T> {
    /// Create a new empty type registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a schema under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, schema: T) -> Result<()> {
        let name = name.into();
        let mut inner = self.inner.write().map_err(poisoned)?;
        if inner.insert(name.clone(), schema).is_some() {
            tracing::debug!(datatype = %name, "replaced registered schema");
        }
        Ok(())
    }

    /// Get a schema by name.
    pub fn get(&self, name: &str) -> Result<Option<T>>
    where
        T: Clone,
    {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.get(name).cloned())
    }

    /// Get a schema by name, failing with `TypeNotFound` when absent.
    pub fn require(&self, name: &str) -> Result<T>
    where
        T: Clone,
    {
        self.get(name)?
            .ok_or_else(|| CodecError::type_not_found(name))
    }

    /// Check if a schema is registered.
    pub fn contains(&self, name: &str) -> Result<bool> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.contains_key(name))
    }

    /// Get all registered schema names, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut names: Vec<String> = inner.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Remove a schema from the registry.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.remove(name).is_some())
    }

    /// Get the number of registered schemas.
    pub fn len(&self) -> Result<usize> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.len())
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
