// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven ROS1 message codec.
//!
//! Walks a parsed [`MessageSchema`] in field order and hands every field to
//! the [`engine`](super::engine). `uint8[]` fields decode to
//! [`CodecValue::Bytes`]; every other sequence decodes to
//! [`CodecValue::Array`].
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robowire::encoding::ros1::Ros1Codec;
//! use robowire::schema::parse_schema;
//!
//! let schema = parse_schema("pkg/Status", "bool retval")?;
//! let codec = Ros1Codec::new();
//! let msg = codec.decode(&schema, &[0x01])?;
//! assert_eq!(codec.encode(&schema, &msg)?, vec![0x01]);
//! # Ok(())
//! # }
//! ```

use super::calculator::Ros1Calculator;
use super::cursor::Ros1Cursor;
use super::defaults::resolve_defaults;
use super::engine::{self, byte_element};
use super::writer::Ros1Writer;
use super::CodecOptions;
use crate::core::{CodecError, CodecValue, DecodedMessage, PrimitiveType, Result as CoreResult};
use crate::schema::{FieldType, MessageSchema, MessageType};

/// Nesting deeper than this is reported as a cyclic schema.
const MAX_NESTING_DEPTH: usize = 64;

/// ROS1 codec driven by a parsed schema.
#[derive(Debug, Clone, Default)]
pub struct Ros1Codec {
    options: CodecOptions,
}

impl Ros1Codec {
    /// Create a codec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit options.
    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Decode the schema's root type from the start of `data`.
    ///
    /// Bytes after the message are ignored.
    pub fn decode(&self, schema: &MessageSchema, data: &[u8]) -> CoreResult<DecodedMessage> {
        let (message, end) = self.decode_at(schema, &schema.name, data, 0)?;
        if end < data.len() {
            tracing::debug!(
                type_name = %schema.name,
                consumed = end,
                trailing = data.len() - end,
                "ignoring trailing bytes after message"
            );
        }
        Ok(message)
    }

    /// Decode `type_name` at `offset`, returning the message and the offset after it.
    pub fn decode_at(
        &self,
        schema: &MessageSchema,
        type_name: &str,
        data: &[u8],
        offset: usize,
    ) -> CoreResult<(DecodedMessage, usize)> {
        let msg_type = schema
            .get_type(type_name)
            .ok_or_else(|| CodecError::type_not_found(type_name))?;
        let mut cursor = Ros1Cursor::with_offset(data, offset).with_options(&self.options);
        let message = self.read_message(schema, msg_type, &mut cursor, 0)?;
        Ok((message, cursor.position()))
    }

    /// Encode a complete message of the schema's root type.
    ///
    /// Every field must be present and non-null; call [`resolve`](Self::resolve)
    /// first to fill in defaults.
    pub fn encode(&self, schema: &MessageSchema, message: &DecodedMessage) -> CoreResult<Vec<u8>> {
        let size = self.encoded_size(schema, message)?;
        let mut buffer = vec![0u8; size];
        self.encode_into(schema, message, &mut buffer, 0)?;
        Ok(buffer)
    }

    /// Encode into `buffer` at `offset`, returning the offset after the message.
    pub fn encode_into(
        &self,
        schema: &MessageSchema,
        message: &DecodedMessage,
        buffer: &mut [u8],
        offset: usize,
    ) -> CoreResult<usize> {
        let msg_type = schema.root_type()?;
        let mut writer = Ros1Writer::with_offset(buffer, offset).with_options(&self.options);
        self.write_message(schema, msg_type, message, &mut writer, 0)?;
        Ok(writer.position())
    }

    /// Exact encoded size of a message of the schema's root type.
    pub fn encoded_size(
        &self,
        schema: &MessageSchema,
        message: &DecodedMessage,
    ) -> CoreResult<usize> {
        let msg_type = schema.root_type()?;
        let mut calc = Ros1Calculator::new();
        self.size_message(schema, msg_type, message, &mut calc, 0)?;
        Ok(calc.size())
    }

    /// Fill in defaults for every field of the root type, including nested messages.
    ///
    /// Unknown keys are dropped and `Null` counts as missing.
    pub fn resolve(
        &self,
        schema: &MessageSchema,
        partial: &DecodedMessage,
    ) -> CoreResult<DecodedMessage> {
        let msg_type = schema.root_type()?;
        self.resolve_message(schema, msg_type, partial, 0)
    }

    fn check_depth(msg_type: &MessageType, depth: usize) -> CoreResult<()> {
        if depth > MAX_NESTING_DEPTH {
            return Err(CodecError::invalid_schema(
                &msg_type.name,
                format!("nesting deeper than {MAX_NESTING_DEPTH} levels"),
            ));
        }
        Ok(())
    }

    fn read_message(
        &self,
        schema: &MessageSchema,
        msg_type: &MessageType,
        cursor: &mut Ros1Cursor<'_>,
        depth: usize,
    ) -> CoreResult<DecodedMessage> {
        Self::check_depth(msg_type, depth)?;
        let mut message = DecodedMessage::with_capacity(msg_type.fields.len());
        for field in &msg_type.fields {
            let value = self.read_field(schema, &msg_type.name, &field.type_name, cursor, depth)?;
            message.insert(field.name.clone(), value);
        }
        Ok(message)
    }

    fn read_field(
        &self,
        schema: &MessageSchema,
        parent: &str,
        field_type: &FieldType,
        cursor: &mut Ros1Cursor<'_>,
        depth: usize,
    ) -> CoreResult<CodecValue> {
        match field_type {
            FieldType::Primitive(ty) => engine::read_scalar(*ty, cursor),
            FieldType::Array { base_type, size } => {
                if byte_element(base_type) == Some(PrimitiveType::UInt8) {
                    return engine::read_byte_array(cursor, *size).map(CodecValue::Bytes);
                }
                if let FieldType::Primitive(ty) = base_type.as_ref() {
                    return engine::read_array(*ty, cursor, *size).map(CodecValue::Array);
                }
                let len = match size {
                    Some(n) => *n,
                    None => cursor.read_length()?,
                };
                let mut values = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    values.push(self.read_field(schema, parent, base_type, cursor, depth)?);
                }
                Ok(CodecValue::Array(values))
            }
            FieldType::Nested(name) => {
                let nested = schema.resolve_nested(parent, name)?;
                self.read_message(schema, nested, cursor, depth + 1)
                    .map(CodecValue::Struct)
            }
        }
    }

    fn write_message(
        &self,
        schema: &MessageSchema,
        msg_type: &MessageType,
        message: &DecodedMessage,
        writer: &mut Ros1Writer<'_>,
        depth: usize,
    ) -> CoreResult<()> {
        Self::check_depth(msg_type, depth)?;
        for field in &msg_type.fields {
            let value = required_field(msg_type, &field.name, &field.type_name, message)?;
            self.write_field(schema, &msg_type.name, &field.type_name, value, writer, depth)?;
        }
        Ok(())
    }

    fn write_field(
        &self,
        schema: &MessageSchema,
        parent: &str,
        field_type: &FieldType,
        value: &CodecValue,
        writer: &mut Ros1Writer<'_>,
        depth: usize,
    ) -> CoreResult<()> {
        match field_type {
            FieldType::Primitive(ty) => engine::write_scalar(*ty, value, writer),
            FieldType::Array { base_type, size } => {
                if let (CodecValue::Bytes(bytes), Some(_)) = (value, byte_element(base_type)) {
                    return engine::write_byte_array(bytes, writer, *size);
                }
                let values = expect_array(field_type, value)?;
                if let FieldType::Primitive(ty) = base_type.as_ref() {
                    return engine::write_array(*ty, values, writer, *size);
                }
                match size {
                    Some(n) if *n != values.len() => {
                        return Err(CodecError::length_mismatch(*n, values.len()));
                    }
                    Some(_) => {}
                    None => writer.write_length(values.len())?,
                }
                for element in values {
                    self.write_field(schema, parent, base_type, element, writer, depth)?;
                }
                Ok(())
            }
            FieldType::Nested(name) => {
                let nested = schema.resolve_nested(parent, name)?;
                let fields = expect_struct(name, value)?;
                self.write_message(schema, nested, fields, writer, depth + 1)
            }
        }
    }

    fn size_message(
        &self,
        schema: &MessageSchema,
        msg_type: &MessageType,
        message: &DecodedMessage,
        calc: &mut Ros1Calculator,
        depth: usize,
    ) -> CoreResult<()> {
        Self::check_depth(msg_type, depth)?;
        for field in &msg_type.fields {
            let value = required_field(msg_type, &field.name, &field.type_name, message)?;
            self.size_field(schema, &msg_type.name, &field.type_name, value, calc, depth)?;
        }
        Ok(())
    }

    fn size_field(
        &self,
        schema: &MessageSchema,
        parent: &str,
        field_type: &FieldType,
        value: &CodecValue,
        calc: &mut Ros1Calculator,
        depth: usize,
    ) -> CoreResult<()> {
        if field_type.is_primitive() {
            calc.bytes(engine::measure_size(value, field_type)?);
            return Ok(());
        }
        match field_type {
            FieldType::Array { base_type, size } => {
                let values = expect_array(field_type, value)?;
                match size {
                    Some(n) if *n != values.len() => {
                        return Err(CodecError::length_mismatch(*n, values.len()));
                    }
                    Some(_) => {}
                    None => {
                        calc.sequence_length();
                    }
                }
                for element in values {
                    self.size_field(schema, parent, base_type, element, calc, depth)?;
                }
                Ok(())
            }
            FieldType::Nested(name) => {
                let nested = schema.resolve_nested(parent, name)?;
                let fields = expect_struct(name, value)?;
                self.size_message(schema, nested, fields, calc, depth + 1)
            }
            FieldType::Primitive(_) => Ok(()),
        }
    }

    fn resolve_message(
        &self,
        schema: &MessageSchema,
        msg_type: &MessageType,
        partial: &DecodedMessage,
        depth: usize,
    ) -> CoreResult<DecodedMessage> {
        Self::check_depth(msg_type, depth)?;
        let defaults = schema.default_table(&msg_type.name)?;
        let mut resolved = resolve_defaults(partial, &defaults);

        for field in &msg_type.fields {
            let Some(value) = partial.get(&field.name).filter(|v| !v.is_null()) else {
                continue;
            };
            let nested_value = match (&field.type_name, value) {
                (FieldType::Nested(name), CodecValue::Struct(inner)) => {
                    let nested = schema.resolve_nested(&msg_type.name, name)?;
                    CodecValue::Struct(self.resolve_message(schema, nested, inner, depth + 1)?)
                }
                (FieldType::Array { base_type, .. }, CodecValue::Array(items)) => {
                    let FieldType::Nested(name) = base_type.as_ref() else {
                        continue;
                    };
                    let nested = schema.resolve_nested(&msg_type.name, name)?;
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(match item {
                            CodecValue::Struct(inner) => CodecValue::Struct(
                                self.resolve_message(schema, nested, inner, depth + 1)?,
                            ),
                            CodecValue::Null => CodecValue::Struct(
                                schema.default_table(&nested.name)?.into_message(),
                            ),
                            other => other.clone(),
                        });
                    }
                    CodecValue::Array(out)
                }
                _ => continue,
            };
            resolved.insert(field.name.clone(), nested_value);
        }

        Ok(resolved)
    }
}

fn required_field<'m>(
    msg_type: &MessageType,
    name: &str,
    field_type: &FieldType,
    message: &'m DecodedMessage,
) -> CoreResult<&'m CodecValue> {
    match message.get(name) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(CodecError::encoding(
            field_type.display_name(),
            format!("missing field '{}.{name}'", msg_type.name),
        )),
    }
}

fn expect_array<'v>(field_type: &FieldType, value: &'v CodecValue) -> CoreResult<&'v [CodecValue]> {
    value.as_array().ok_or_else(|| {
        CodecError::encoding(
            field_type.display_name(),
            format!("expected array, got {}", value.type_name()),
        )
    })
}

fn expect_struct<'v>(type_name: &str, value: &'v CodecValue) -> CoreResult<&'v DecodedMessage> {
    value.as_struct().ok_or_else(|| {
        CodecError::encoding(
            type_name,
            format!("expected message, got {}", value.type_name()),
        )
    })
}
