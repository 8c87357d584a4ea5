// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MSG format parser using Pest.
//!
//! This module handles parsing of ROS1 .msg format files.
//!
//! The format supports:
//! - Simple field lists (root message)
//! - Dependency blocks with "MSG: TypeName" headers
//! - Array types: T[] (dynamic) or T[n] (fixed)
//! - Nested types: package/MessageName or bare MessageName
//! - Constants: `type NAME=value`
//! - Comments (# style)

use crate::core::{CodecError, CodecValue, Result};
use crate::encoding::ros1::MAX_SEQUENCE_LENGTH;
use crate::schema::ast::{Constant, Field, FieldType, MessageSchema, MessageType, PrimitiveType};
use crate::schema::builtin_types::{self, HEADER_TYPE};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

/// Pest parser for ROS .msg schema files.
#[derive(Parser)]
#[grammar = "schema/parser/msg_parser/msg.pest"] // Path relative to src/ directory
pub struct MsgParser;

/// Parse a ROS1 .msg definition, optionally followed by `MSG:` dependency blocks.
///
/// The root type is registered under `name`. `std_msgs/Header` is added when
/// the definition does not carry its own copy.
pub fn parse(name: &str, definition: &str) -> Result<MessageSchema> {
    let pairs = MsgParser::parse(Rule::schema, definition)
        .map_err(|e| CodecError::parse("msg schema", format!("{e}")))?;

    let mut schema = MessageSchema::new(name.to_string());

    for pair in pairs {
        // schema = SOI ~ root_msg ~ (separator ~ dependency_msg)* ~ EOI
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::root_msg => {
                    let msg_type = parse_body(name, item.into_inner())?;
                    schema.add_type(msg_type);
                }
                Rule::dependency_msg => {
                    let mut inner = item.into_inner();
                    let type_name = inner
                        .next()
                        .and_then(|header| header.into_inner().next())
                        .map(|t| t.as_str().to_string())
                        .ok_or_else(|| CodecError::parse("msg schema", "missing MSG: type name"))?;
                    let msg_type = parse_body(&type_name, inner)?;
                    schema.add_type(msg_type);
                }
                _ => {}
            }
        }
    }

    builtin_types::add_missing(&mut schema);
    Ok(schema)
}

/// Collect field and constant lines into a message type.
fn parse_body<'a>(
    type_name: &str,
    lines: impl Iterator<Item = Pair<'a, Rule>>,
) -> Result<MessageType> {
    let mut msg_type = MessageType::new(type_name.to_string());
    for line in lines {
        match line.as_rule() {
            Rule::field_line => msg_type.add_field(parse_field(line)?),
            Rule::constant_line => {
                if let Some(constant) = parse_constant(type_name, line)? {
                    msg_type.constants.push(constant);
                }
            }
            _ => {}
        }
    }
    Ok(msg_type)
}

/// field_line = type_spec ~ ident
fn parse_field(pair: Pair<Rule>) -> Result<Field> {
    let mut inner = pair.into_inner();
    let (type_spec, ident) = match (inner.next(), inner.next()) {
        (Some(t), Some(i)) => (t, i),
        _ => return Err(CodecError::parse("msg field", "incomplete field declaration")),
    };

    let mut base_name = "";
    let mut is_array = false;
    let mut array_size = None;
    for part in type_spec.into_inner() {
        match part.as_rule() {
            Rule::type_name => base_name = part.as_str(),
            Rule::array_suffix => {
                is_array = true;
                if let Some(size) = part.into_inner().next() {
                    let text = size.as_str();
                    let n = text.parse::<usize>().map_err(|e| {
                        CodecError::parse("msg field", format!("bad array size '{text}': {e}"))
                    })?;
                    if n > MAX_SEQUENCE_LENGTH {
                        return Err(CodecError::parse(
                            "msg field",
                            format!("array size {n} exceeds the limit of {MAX_SEQUENCE_LENGTH}"),
                        ));
                    }
                    array_size = Some(n);
                }
            }
            _ => {}
        }
    }

    Ok(Field {
        name: ident.as_str().to_string(),
        type_name: build_field_type(base_name, is_array, array_size),
    })
}

/// Build a FieldType from a base type string and array info.
fn build_field_type(base_type_str: &str, is_array: bool, array_size: Option<usize>) -> FieldType {
    let base = if let Some(prim) = PrimitiveType::try_from_str(base_type_str) {
        FieldType::Primitive(prim)
    } else if base_type_str == "Header" {
        FieldType::Nested(HEADER_TYPE.to_string())
    } else {
        FieldType::Nested(base_type_str.to_string())
    };

    if is_array {
        FieldType::Array {
            base_type: Box::new(base),
            size: array_size,
        }
    } else {
        base
    }
}

/// constant_line = type_name ~ ident ~ constant_value
///
/// Returns `None` for constants whose type cannot carry a constant.
fn parse_constant(owner: &str, pair: Pair<Rule>) -> Result<Option<Constant>> {
    let mut inner = pair.into_inner();
    let (type_name, ident, raw) = match (inner.next(), inner.next(), inner.next()) {
        (Some(t), Some(i), Some(v)) => (t.as_str(), i.as_str(), v.as_str()),
        _ => return Err(CodecError::parse("msg constant", "incomplete constant declaration")),
    };

    let prim = match PrimitiveType::try_from_str(type_name) {
        Some(p) if !matches!(p, PrimitiveType::Time | PrimitiveType::Duration) => p,
        _ => {
            tracing::warn!(
                owner = %owner,
                constant = %ident,
                type_name = %type_name,
                "ignoring constant of non-constant type"
            );
            return Ok(None);
        }
    };

    let value = parse_constant_value(prim, raw).map_err(|reason| {
        CodecError::parse(format!("constant {owner}.{ident}"), reason)
    })?;

    Ok(Some(Constant {
        name: ident.to_string(),
        type_name: prim,
        value,
    }))
}

/// Interpret the raw text after `=` as a value of `prim`.
///
/// String constants take the whole rest of the line; other types drop a
/// trailing `#` comment.
fn parse_constant_value(prim: PrimitiveType, raw: &str) -> std::result::Result<CodecValue, String> {
    if prim == PrimitiveType::String {
        return Ok(CodecValue::String(raw.trim().to_string()));
    }

    let text = raw.split('#').next().unwrap_or("").trim();
    let bad = |e: &dyn std::fmt::Display| format!("invalid {prim} value '{text}': {e}");

    let value = match prim {
        PrimitiveType::Bool => match text {
            "true" | "True" | "1" => CodecValue::Bool(true),
            "false" | "False" | "0" => CodecValue::Bool(false),
            _ => return Err(format!("invalid bool value '{text}'")),
        },
        PrimitiveType::Int8 => CodecValue::Int8(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::Int16 => CodecValue::Int16(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::Int32 => CodecValue::Int32(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::Int64 => CodecValue::Int64(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::UInt8 => CodecValue::UInt8(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::UInt16 => CodecValue::UInt16(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::UInt32 => CodecValue::UInt32(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::UInt64 => CodecValue::UInt64(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::Float32 => CodecValue::Float32(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::Float64 => CodecValue::Float64(text.parse().map_err(|e| bad(&e))?),
        PrimitiveType::String | PrimitiveType::Time | PrimitiveType::Duration => {
            return Err(format!("{prim} cannot be a constant"));
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_field() {
        let schema = parse("TestMsg", "int32 value").unwrap();
        let msg_type = schema.get_type("TestMsg").unwrap();

        assert_eq!(msg_type.fields.len(), 1);
        assert_eq!(msg_type.fields[0].name, "value");
    }

    #[test]
    fn test_parse_multiple_fields() {
        let schema = parse("TestMsg", "int32 x\nint32 y\n").unwrap();
        let msg_type = schema.get_type("TestMsg").unwrap();

        assert_eq!(msg_type.fields.len(), 2);
        assert_eq!(msg_type.fields[0].name, "x");
        assert_eq!(msg_type.fields[1].name, "y");
    }

    #[test]
    fn test_parse_empty_definition() {
        let schema = parse("pkg/Empty", "").unwrap();
        assert!(schema.get_type("pkg/Empty").unwrap().fields.is_empty());
    }

    #[test]
    fn test_parse_dynamic_array() {
        let schema = parse("TestMsg", "int8[] channel").unwrap();
        let msg_type = schema.get_type("TestMsg").unwrap();

        match &msg_type.fields[0].type_name {
            FieldType::Array { base_type, size } => {
                assert!(size.is_none(), "Expected dynamic array");
                assert_eq!(**base_type, FieldType::Primitive(PrimitiveType::Int8));
            }
            _ => panic!("Expected Array type"),
        }
    }

    #[test]
    fn test_parse_fixed_array() {
        let schema = parse("TestMsg", "float32[3] position").unwrap();
        let msg_type = schema.get_type("TestMsg").unwrap();

        match &msg_type.fields[0].type_name {
            FieldType::Array { size, .. } => assert_eq!(*size, Some(3)),
            _ => panic!("Expected Array type"),
        }
    }

    #[test]
    fn test_parse_byte_and_char_aliases() {
        let schema = parse("TestMsg", "byte a\nchar b").unwrap();
        let msg_type = schema.get_type("TestMsg").unwrap();
        assert_eq!(
            msg_type.fields[0].type_name,
            FieldType::Primitive(PrimitiveType::Int8)
        );
        assert_eq!(
            msg_type.fields[1].type_name,
            FieldType::Primitive(PrimitiveType::UInt8)
        );
    }

    #[test]
    fn test_bare_header_maps_to_std_msgs() {
        let schema = parse("pkg/Stamped", "Header header\nfloat64 data").unwrap();
        let msg_type = schema.get_type("pkg/Stamped").unwrap();
        assert_eq!(
            msg_type.fields[0].type_name,
            FieldType::Nested("std_msgs/Header".to_string())
        );
        assert!(schema.get_type("std_msgs/Header").is_some());
    }

    #[test]
    fn test_parse_with_comments_and_indentation() {
        let def = "# leading comment\n  int32 value  # trailing\n\n\tstring name\n# end";
        let schema = parse("TestMsg", def).unwrap();
        let msg_type = schema.get_type("TestMsg").unwrap();

        assert_eq!(msg_type.fields.len(), 2);
        assert_eq!(msg_type.fields[0].name, "value");
        assert_eq!(msg_type.fields[1].name, "name");
    }

    #[test]
    fn test_parse_constants() {
        let def = "int8 MODE_AUTO=1 # automatic\nstring GREETING = hello # world\nint8 mode";
        let schema = parse("pkg/Mode", def).unwrap();
        let msg_type = schema.get_type("pkg/Mode").unwrap();

        assert_eq!(msg_type.fields.len(), 1);
        assert_eq!(msg_type.constants.len(), 2);
        assert_eq!(
            msg_type.constant("MODE_AUTO").unwrap().value,
            CodecValue::Int8(1)
        );
        assert_eq!(
            msg_type.constant("GREETING").unwrap().value,
            CodecValue::String("hello # world".to_string())
        );
    }

    #[test]
    fn test_constant_out_of_range() {
        let err = parse("pkg/Bad", "uint8 TOO_BIG=300").unwrap_err();
        assert!(matches!(err, CodecError::ParseError { .. }));
    }

    #[test]
    fn test_oversized_fixed_array_is_parse_error() {
        for def in ["int8[18446744073709551615] x", "uint64[4611686018427387904] x"] {
            let err = parse("pkg/Big", def).unwrap_err();
            assert!(matches!(err, CodecError::ParseError { .. }), "{def}: {err:?}");
        }
        assert!(parse("pkg/Big", "int8[99999999999999999999999] x").is_err());
        assert!(parse("pkg/Ok", "uint8[10000000] x").is_ok());
    }

    #[test]
    fn test_dependency_blocks() {
        let def = "geometry_msgs/Point position\n\
                   ================================================================================\n\
                   MSG: geometry_msgs/Point\n\
                   float64 x\n\
                   float64 y\n\
                   float64 z\n";
        let schema = parse("pkg/Pose", def).unwrap();

        let point = schema.get_type("geometry_msgs/Point").unwrap();
        assert_eq!(point.fields.len(), 3);
        assert_eq!(schema.fixed_size("pkg/Pose"), Some(24));
    }

    #[test]
    fn test_invalid_line_is_parse_error() {
        let err = parse("pkg/Bad", "int32").unwrap_err();
        assert!(matches!(err, CodecError::ParseError { .. }));
    }
}
