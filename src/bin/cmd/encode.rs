// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - turn a (partial) JSON object into a hex payload.

use std::path::PathBuf;

use clap::Args;

use crate::common::{load_schema, Part, Result};
use robowire::encoding::JsonDecoder;
use robowire::Ros1Codec;

/// Encode a JSON object against a definition file.
///
/// Fields missing from the object are filled with their defaults.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Definition file (.msg or .srv)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Message as a JSON object
    #[arg(long, value_name = "OBJ")]
    json: String,

    /// Datatype name (defaults to one derived from the file path)
    #[arg(short, long = "type", value_name = "NAME")]
    type_name: Option<String>,

    /// Service half to encode
    #[arg(long, value_enum, default_value_t = Part::Request)]
    part: Part,
}

impl EncodeCmd {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.input, self.type_name.as_deref())?.select(self.part);
        let partial = JsonDecoder::new().decode(&self.json)?;

        let codec = Ros1Codec::new();
        let message = codec.resolve(&schema, &partial)?;
        let bytes = codec.encode(&schema, &message)?;

        println!("{}", hex::encode(bytes));
        Ok(())
    }
}
