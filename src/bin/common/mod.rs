// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::{anyhow, bail, Context as _};
use clap::ValueEnum;
use serde::Serialize;

use robowire::schema::{parse_schema, parse_service, MessageSchema, SchemaFormat, ServiceSchema};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Which half of a service to operate on.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Part {
    #[default]
    Request,
    Response,
}

/// A parsed definition file.
pub enum LoadedSchema {
    Message(MessageSchema),
    Service(ServiceSchema),
}

impl LoadedSchema {
    /// Schema to encode or decode with; `part` only applies to services.
    pub fn select(self, part: Part) -> MessageSchema {
        match self {
            LoadedSchema::Message(schema) => schema,
            LoadedSchema::Service(service) => match part {
                Part::Request => service.request,
                Part::Response => service.response,
            },
        }
    }
}

/// Derive a datatype from a definition path.
///
/// `pkg/srv/Name.srv` and `pkg/msg/Name.msg` become `pkg/Name`; any other
/// layout yields the bare file stem.
pub fn datatype_from_path(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Cannot derive a type name from {}", path.display()))?;

    let package = path
        .parent()
        .filter(|dir| matches!(dir.file_name().and_then(|n| n.to_str()), Some("msg" | "srv")))
        .and_then(|dir| dir.parent())
        .and_then(|pkg| pkg.file_name())
        .and_then(|n| n.to_str());

    Ok(match package {
        Some(pkg) => format!("{pkg}/{stem}"),
        None => stem.to_string(),
    })
}

/// Read and parse a `.msg` or `.srv` file.
pub fn load_schema(path: &Path, type_name: Option<&str>) -> Result<LoadedSchema> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let format = SchemaFormat::parse(extension)
        .ok_or_else(|| {
            anyhow!(
                "Unsupported definition file (expected .msg or .srv): {}",
                path.display()
            )
        })?;

    let definition = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let name = match type_name {
        Some(name) => name.to_string(),
        None => datatype_from_path(path)?,
    };

    Ok(match format {
        SchemaFormat::Msg => LoadedSchema::Message(parse_schema(&name, &definition)?),
        SchemaFormat::Srv => LoadedSchema::Service(parse_service(&name, &definition)?),
    })
}

/// Parse a hex payload, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    if digits.len() % 2 != 0 {
        bail!("Hex payload has an odd number of digits");
    }
    Ok(hex::decode(digits).context("Invalid hex payload")?)
}

/// Print `value` as pretty JSON, or run `human_fn` for text output.
pub fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce() -> Result<()>) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_from_path() {
        assert_eq!(
            datatype_from_path(Path::new("papouch_ros/srv/WriteIO.srv")).unwrap(),
            "papouch_ros/WriteIO"
        );
        assert_eq!(
            datatype_from_path(Path::new("fixtures/WriteIO.srv")).unwrap(),
            "WriteIO"
        );
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0x01 02\n0a").unwrap(), vec![1, 2, 10]);
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
        assert!(parse_hex("").unwrap().is_empty());
    }
}
