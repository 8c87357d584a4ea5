// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - turn a hex payload into JSON.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Args;

use crate::common::{load_schema, parse_hex, Part, Result};
use robowire::encoding::JsonDecoder;
use robowire::{CodecError, CodecOptions, Ros1Codec};

/// Decode a ROS1 payload against a definition file.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Definition file (.msg or .srv)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Payload as hex digits
    #[arg(long, value_name = "HEX")]
    hex: String,

    /// Datatype name (defaults to one derived from the file path)
    #[arg(short, long = "type", value_name = "NAME")]
    type_name: Option<String>,

    /// Service half to decode
    #[arg(long, value_enum, default_value_t = Part::Request)]
    part: Part,

    /// Largest sequence count accepted from the payload
    #[arg(long, value_name = "N")]
    max_sequence_length: Option<usize>,

    /// Print compact JSON on a single line
    #[arg(long)]
    compact: bool,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.input, self.type_name.as_deref())?.select(self.part);
        let payload = parse_hex(&self.hex)?;

        let mut options = CodecOptions::default();
        if let Some(limit) = self.max_sequence_length {
            options = options.with_max_sequence_length(limit);
        }

        let message = Ros1Codec::with_options(options)
            .decode(&schema, &payload)
            .map_err(|e| describe_wire_error(&schema.name, e))?;
        println!("{}", JsonDecoder::new().encode(&message, !self.compact)?);
        Ok(())
    }
}

/// Attach the error's structured fields when the payload itself is at fault.
fn describe_wire_error(type_name: &str, error: CodecError) -> anyhow::Error {
    if !error.is_wire_error() {
        return error.into();
    }
    let fields: Vec<String> = error
        .log_fields()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    anyhow!("Payload does not decode as {type_name}: {error} [{}]", fields.join(", "))
}
