// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robowire CLI
//!
//! Command-line tool for ROS1 message definitions and payloads.
//!
//! ## Usage
//!
//! ```sh
//! # Show fields, constants and defaults
//! robowire schema show papouch_ros/srv/WriteIO.srv
//!
//! # Decode a payload to JSON
//! robowire decode papouch_ros/srv/WriteIO.srv --part response --hex 01
//!
//! # Encode a partial JSON object
//! robowire encode changeKinematicsConfig.srv --json '{"configuration": "cfg1"}'
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, EncodeCmd, SchemaCmd};
use common::Result;

/// Robowire - ROS1 message wire codec
///
/// Inspect .msg/.srv definitions and convert payloads between
/// ROS1 wire bytes and JSON.
#[derive(Parser, Clone)]
#[command(name = "robowire")]
#[command(about = "ROS1 message wire codec for .msg and .srv definitions", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Schema operations (show)
    #[command(subcommand)]
    Schema(SchemaCmd),

    /// Decode a hex payload to JSON
    Decode(DecodeCmd),

    /// Encode a JSON object to a hex payload
    Encode(EncodeCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schema(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(),
        Commands::Encode(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
