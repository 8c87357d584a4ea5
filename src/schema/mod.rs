// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parsing for ROS1 `.msg` and `.srv` definitions.

pub mod ast;
pub mod builtin_types;
pub mod parser;

pub use ast::{Constant, Field, FieldType, MessageSchema, MessageType, PrimitiveType, ServiceSchema};
pub use parser::{msg_parser, parse_schema, parse_service};

/// Schema file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// ROS .msg format
    Msg,
    /// ROS .srv format (request and response separated by `---`)
    Srv,
}

impl SchemaFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "msg" => Some(SchemaFormat::Msg),
            "srv" => Some(SchemaFormat::Srv),
            _ => None,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFormat::Msg => "msg",
            SchemaFormat::Srv => "srv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_format_parse() {
        assert_eq!(SchemaFormat::parse("msg"), Some(SchemaFormat::Msg));
        assert_eq!(SchemaFormat::parse("SRV"), Some(SchemaFormat::Srv));
        assert_eq!(SchemaFormat::parse("idl"), None);
        assert_eq!(SchemaFormat::parse(""), None);
    }

    #[test]
    fn test_schema_format_as_str() {
        assert_eq!(SchemaFormat::Msg.as_str(), "msg");
        assert_eq!(SchemaFormat::Srv.as_str(), "srv");
    }

    #[test]
    fn test_parse_schema_reexport() {
        let schema = parse_schema("test/Type", "int32 value");
        assert!(schema.is_ok());
    }
}
