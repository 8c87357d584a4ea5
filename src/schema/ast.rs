// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AST types for parsed ROS1 .msg and .srv schemas.

use std::collections::HashMap;

use crate::core::{CodecError, CodecValue, DecodedMessage, Result};
use crate::encoding::ros1::defaults::DefaultTable;
use crate::encoding::ros1::MAX_SEQUENCE_LENGTH;

pub use crate::core::PrimitiveType;

/// Nested types deeper than this are treated as a cyclic schema.
const MAX_NESTING_DEPTH: usize = 64;

/// A parsed ROS message schema.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSchema {
    /// Schema name (e.g., "papouch_ros/WriteIORequest")
    pub name: String,
    /// Package name (e.g., "papouch_ros")
    pub package: Option<String>,
    /// All types defined in this schema (main type + nested types)
    pub types: HashMap<String, MessageType>,
}

/// A message type definition with its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageType {
    /// Type name including package if available
    pub name: String,
    /// Ordered list of fields
    pub fields: Vec<Field>,
    /// Constants declared in the definition
    pub constants: Vec<Constant>,
}

/// A field in a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type
    pub type_name: FieldType,
}

/// A constant declaration (`int8 MODE_AUTO=1`).
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    /// Constant name
    pub name: String,
    /// Declared type
    pub type_name: PrimitiveType,
    /// Parsed value
    pub value: CodecValue,
}

/// Field type - can be primitive, array, or nested message.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Primitive type
    Primitive(PrimitiveType),
    /// Array type
    Array {
        /// Base type (element type)
        base_type: Box<FieldType>,
        /// Array size (None = unbounded, Some(N) = fixed)
        size: Option<usize>,
    },
    /// Nested message type
    Nested(String),
}

/// A parsed `.srv` definition: request and response schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSchema {
    /// Service datatype (e.g., "papouch_ros/WriteIO")
    pub name: String,
    /// Request schema, named `<name>Request`
    pub request: MessageSchema,
    /// Response schema, named `<name>Response`
    pub response: MessageSchema,
}

impl FieldType {
    /// Check if this is a primitive type or an array of primitives.
    pub fn is_primitive(&self) -> bool {
        match self {
            FieldType::Primitive(_) => true,
            FieldType::Array { base_type, .. } => base_type.is_primitive(),
            FieldType::Nested(_) => false,
        }
    }

    /// Render the type the way it is written in a `.msg` file.
    pub fn display_name(&self) -> String {
        match self {
            FieldType::Primitive(p) => p.to_string(),
            FieldType::Array {
                base_type,
                size: Some(n),
            } => format!("{}[{n}]", base_type.display_name()),
            FieldType::Array {
                base_type,
                size: None,
            } => format!("{}[]", base_type.display_name()),
            FieldType::Nested(name) => name.clone(),
        }
    }
}

impl MessageSchema {
    /// Create an empty schema.
    pub fn new(name: String) -> Self {
        Self {
            package: extract_package(&name),
            name,
            types: HashMap::new(),
        }
    }

    /// Register a type in this schema.
    pub fn add_type(&mut self, msg_type: MessageType) {
        self.types.insert(msg_type.name.clone(), msg_type);
    }

    /// Look up a type by exact name.
    pub fn get_type(&self, name: &str) -> Option<&MessageType> {
        self.types.get(name)
    }

    /// The top-level type this schema describes.
    pub fn root_type(&self) -> Result<&MessageType> {
        self.get_type(&self.name)
            .ok_or_else(|| CodecError::type_not_found(&self.name))
    }

    /// Resolve a nested type reference made from inside `parent`.
    ///
    /// Bare names (`Point`) are looked up in the parent's package first, then
    /// as given. Qualified names must match exactly.
    pub fn resolve_nested(&self, parent: &str, name: &str) -> Result<&MessageType> {
        if !name.contains('/') {
            if let Some(pkg) = extract_package(parent) {
                if let Some(t) = self.types.get(&format!("{pkg}/{name}")) {
                    return Ok(t);
                }
            }
        }
        self.types
            .get(name)
            .ok_or_else(|| CodecError::type_not_found(name))
    }

    /// Encoded size of `type_name` when it contains no variable-length fields.
    pub fn fixed_size(&self, type_name: &str) -> Option<usize> {
        let msg_type = self.types.get(type_name)?;
        self.fixed_size_of_type(msg_type, 0)
    }

    fn fixed_size_of_type(&self, msg_type: &MessageType, depth: usize) -> Option<usize> {
        if depth > MAX_NESTING_DEPTH {
            return None;
        }
        msg_type.fields.iter().try_fold(0usize, |acc, field| {
            let size = self.fixed_size_of_field(&msg_type.name, &field.type_name, depth)?;
            acc.checked_add(size)
        })
    }

    fn fixed_size_of_field(
        &self,
        parent: &str,
        field_type: &FieldType,
        depth: usize,
    ) -> Option<usize> {
        match field_type {
            FieldType::Primitive(p) => p.size(),
            FieldType::Array {
                base_type,
                size: Some(n),
            } => n.checked_mul(self.fixed_size_of_field(parent, base_type, depth)?),
            FieldType::Array { size: None, .. } => None,
            FieldType::Nested(name) => {
                let nested = self.resolve_nested(parent, name).ok()?;
                self.fixed_size_of_type(nested, depth + 1)
            }
        }
    }

    /// Build the ordered default table for `type_name`.
    ///
    /// Defaults are `false`, zero, the empty string, zero time/duration, the
    /// empty sequence for unbounded arrays, `N` default elements for fixed
    /// arrays, and the nested default table for nested messages.
    pub fn default_table(&self, type_name: &str) -> Result<DefaultTable> {
        let msg_type = self
            .types
            .get(type_name)
            .ok_or_else(|| CodecError::type_not_found(type_name))?;
        self.default_table_of_type(msg_type, 0)
    }

    fn default_table_of_type(&self, msg_type: &MessageType, depth: usize) -> Result<DefaultTable> {
        if depth > MAX_NESTING_DEPTH {
            return Err(CodecError::invalid_schema(
                &msg_type.name,
                "nested types form a cycle",
            ));
        }
        let mut table = DefaultTable::new();
        for field in &msg_type.fields {
            let value = self.default_value(&msg_type.name, &field.type_name, depth)?;
            table.insert(field.name.clone(), value);
        }
        Ok(table)
    }

    fn default_value(
        &self,
        parent: &str,
        field_type: &FieldType,
        depth: usize,
    ) -> Result<CodecValue> {
        match field_type {
            FieldType::Primitive(p) => Ok(p.default_value()),
            FieldType::Array { size: None, .. } => Ok(CodecValue::Array(Vec::new())),
            FieldType::Array {
                base_type,
                size: Some(n),
            } => {
                if *n > MAX_SEQUENCE_LENGTH {
                    return Err(CodecError::length_exceeded(*n, MAX_SEQUENCE_LENGTH, 0));
                }
                let element = self.default_value(parent, base_type, depth)?;
                Ok(CodecValue::Array(vec![element; *n]))
            }
            FieldType::Nested(name) => {
                let nested = self.resolve_nested(parent, name)?;
                let table = self.default_table_of_type(nested, depth + 1)?;
                Ok(CodecValue::Struct(table.into_message()))
            }
        }
    }
}

impl MessageType {
    /// Create a new message type.
    pub fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Add a field to this message type.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a constant by name.
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name == name)
    }

    /// Collect constants into a message map.
    pub fn constants_as_message(&self) -> DecodedMessage {
        self.constants
            .iter()
            .map(|c| (c.name.clone(), c.value.clone()))
            .collect()
    }
}

/// Extract package name from a fully-qualified type name.
pub(crate) fn extract_package(name: &str) -> Option<String> {
    name.split_once('/').map(|(pkg, _)| pkg.to_string())
}
