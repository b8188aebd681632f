// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # sigil
//!
//! Entry point for the `sigil` binary. Parses CLI arguments, initializes
//! logging and runs one subcommand:
//!
//! - `address`   print the address of a wallet account
//! - `sign`      sign a message with a wallet account
//! - `verify`    check a signature
//! - `version`   print build version information
//!
//! Results go to stdout as a single JSON object.
//!
//! ## Exit status
//!
//! | Status | Meaning                                          |
//! |--------|--------------------------------------------------|
//! | 0      | success; for `verify`, the signature is good     |
//! | 1      | `verify` ran and the signature is not good       |
//! | 2      | the command failed (bad seed, unreadable file)   |

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;

use cli::{Commands, SigilCli};
use commands::{EXIT_ERROR, EXIT_OK};

fn main() -> ExitCode {
    let cli = SigilCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);
    ExitCode::from(exit_status(run(cli.command)))
}

fn run(command: Commands) -> Result<u8> {
    match command {
        Commands::Address(args) => print_json(&commands::address(&args)?)?,
        Commands::Sign(args) => print_json(&commands::sign(&args)?)?,
        Commands::Verify(args) => {
            let outcome = commands::verify(&args)?;
            print_json(&outcome)?;
            return Ok(outcome.exit_status());
        }
        Commands::Version => print_version(),
    }
    Ok(EXIT_OK)
}

/// Report a failed command on stderr and map it to [`EXIT_ERROR`].
fn exit_status(result: Result<u8>) -> u8 {
    match result {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let line = serde_json::to_string(value).context("failed to encode output")?;
    println!("{}", line);
    Ok(())
}

fn print_version() {
    println!("sigil     {}", env!("CARGO_PKG_VERSION"));
    println!("signature {}", sigil_protocol::config::SIGNATURE_HEADER);
    println!("scheme    {}", sigil_protocol::config::SIGNING_ALGORITHM);
    println!("rustc     {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
