// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - inspect message and service definitions.

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::common::{load_schema, output_json_or, LoadedSchema, Result};
use robowire::encoding::JsonDecoder;
use robowire::schema::{MessageSchema, MessageType};

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// Show fields, constants and defaults of a .msg or .srv file
    Show {
        /// Definition file (.msg or .srv)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Datatype name (defaults to one derived from the file path)
        #[arg(short, long = "type", value_name = "NAME")]
        type_name: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::Show {
                input,
                type_name,
                json,
            } => cmd_show(input, type_name, json),
        }
    }
}

#[derive(Serialize)]
struct FieldDetail {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[derive(Serialize)]
struct ConstantDetail {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    value: serde_json::Value,
}

#[derive(Serialize)]
struct TypeDetail {
    name: String,
    fields: Vec<FieldDetail>,
    constants: Vec<ConstantDetail>,
}

#[derive(Serialize)]
struct SchemaDetail {
    name: String,
    /// Root type first, then dependencies sorted by name.
    types: Vec<TypeDetail>,
    defaults: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed_size: Option<usize>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ShowOutput {
    Message(SchemaDetail),
    Service {
        service: String,
        request: SchemaDetail,
        response: SchemaDetail,
    },
}

fn type_detail(json: &JsonDecoder, msg_type: &MessageType) -> Result<TypeDetail> {
    let constant_values = json.to_json_value(&msg_type.constants_as_message())?;
    Ok(TypeDetail {
        name: msg_type.name.clone(),
        fields: msg_type
            .fields
            .iter()
            .map(|f| FieldDetail {
                name: f.name.clone(),
                type_name: f.type_name.display_name(),
            })
            .collect(),
        constants: msg_type
            .constants
            .iter()
            .map(|c| ConstantDetail {
                name: c.name.clone(),
                type_name: c.type_name.to_string(),
                value: constant_values
                    .get(&c.name)
                    .cloned()
                    .unwrap_or(serde_json::Value::Null),
            })
            .collect(),
    })
}

fn schema_detail(schema: &MessageSchema) -> Result<SchemaDetail> {
    let json = JsonDecoder::new();
    let root = schema.root_type()?;

    let mut dependencies: Vec<&MessageType> = schema
        .types
        .values()
        .filter(|t| t.name != schema.name)
        .collect();
    dependencies.sort_by(|a, b| a.name.cmp(&b.name));

    let mut types = vec![type_detail(&json, root)?];
    for dep in dependencies {
        types.push(type_detail(&json, dep)?);
    }

    let defaults = schema.default_table(&schema.name)?.into_message();

    Ok(SchemaDetail {
        name: schema.name.clone(),
        types,
        defaults: json.to_json_value(&defaults)?,
        fixed_size: schema.fixed_size(&schema.name),
    })
}

fn print_detail(detail: &SchemaDetail) {
    println!("=== {} ===", detail.name);
    match detail.fixed_size {
        Some(size) => println!("Fixed size: {size} bytes"),
        None => println!("Fixed size: variable"),
    }
    for ty in &detail.types {
        println!();
        println!("{}:", ty.name);
        for constant in &ty.constants {
            println!("  {} {}={}", constant.type_name, constant.name, constant.value);
        }
        for field in &ty.fields {
            println!("  {} {}", field.type_name, field.name);
        }
        if ty.fields.is_empty() && ty.constants.is_empty() {
            println!("  (empty)");
        }
    }
    println!();
    println!("Defaults: {}", detail.defaults);
}

fn cmd_show(input: PathBuf, type_name: Option<String>, json: bool) -> Result<()> {
    let output = match load_schema(&input, type_name.as_deref())? {
        LoadedSchema::Message(schema) => ShowOutput::Message(schema_detail(&schema)?),
        LoadedSchema::Service(service) => ShowOutput::Service {
            service: service.name.clone(),
            request: schema_detail(&service.request)?,
            response: schema_detail(&service.response)?,
        },
    };

    output_json_or(json, &output, || {
        match &output {
            ShowOutput::Message(detail) => print_detail(detail),
            ShowOutput::Service {
                service,
                request,
                response,
            } => {
                println!("Service: {service}");
                println!();
                print_detail(request);
                println!();
                print_detail(response);
            }
        }
        Ok(())
    })
}
