// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parser implementations.

pub mod msg_parser;

use crate::core::Result;
use crate::schema::{MessageSchema, ServiceSchema};

/// Parse a `.msg` schema from a string.
///
/// # Arguments
///
/// * `name` - Message datatype (e.g. `pkg/Type`)
/// * `definition` - Schema definition string
///
/// # Returns
///
/// Parsed `MessageSchema`
pub fn parse_schema(name: &str, definition: &str) -> Result<MessageSchema> {
    msg_parser::parse(name, definition)
}

/// Parse a `.srv` schema from a string.
///
/// The definition is split on the first line consisting of `---`. The
/// request half is registered as `<name>Request` and the response half as
/// `<name>Response`. A definition without a separator has an empty response.
pub fn parse_service(name: &str, definition: &str) -> Result<ServiceSchema> {
    let (request_def, response_def) = split_service(definition);
    let request = msg_parser::parse(&format!("{name}Request"), &request_def)?;
    let response = msg_parser::parse(&format!("{name}Response"), &response_def)?;

    Ok(ServiceSchema {
        name: name.to_string(),
        request,
        response,
    })
}

fn split_service(definition: &str) -> (String, String) {
    let mut request = Vec::new();
    let mut response = Vec::new();
    let mut in_response = false;

    for line in definition.lines() {
        if !in_response && line.trim() == "---" {
            in_response = true;
            continue;
        }
        if in_response {
            response.push(line);
        } else {
            request.push(line);
        }
    }

    (request.join("\n"), response.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_service() {
        let (req, resp) = split_service("int8[] channel\nint8[] state\n---\nbool retval\n");
        assert_eq!(req, "int8[] channel\nint8[] state");
        assert_eq!(resp, "bool retval");
    }

    #[test]
    fn test_split_service_without_separator() {
        let (req, resp) = split_service("string a");
        assert_eq!(req, "string a");
        assert!(resp.is_empty());
    }

    #[test]
    fn test_parse_service_names() {
        let srv = parse_service("papouch_ros/WriteIO", "int8[] channel\n---\nbool retval").unwrap();
        assert_eq!(srv.request.name, "papouch_ros/WriteIORequest");
        assert_eq!(srv.response.name, "papouch_ros/WriteIOResponse");
        assert_eq!(srv.request.root_type().unwrap().fields.len(), 1);
        assert_eq!(srv.response.root_type().unwrap().fields[0].name, "retval");
    }
}
