//! # CLI Interface
//!
//! Command-line argument structure for `sigil`, via `clap` derive.
//! Subcommands: `address`, `sign`, `verify` and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sigil_protocol::config::Network;

use crate::logging::LogFormat;

/// Sign and verify messages with sigil wallet addresses.
///
/// Results are printed to stdout as JSON; logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "sigil",
    about = "Sign and verify messages with sigil wallet addresses",
    version,
    propagate_version = true
)]
pub struct SigilCli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "SIGIL_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the address of a wallet account.
    Address(AddressArgs),
    /// Sign a message with a wallet account.
    Sign(SignArgs),
    /// Check a signature against a message and address.
    ///
    /// Exits with status 0 when the signature is good, 1 when it is not,
    /// and 2 when the check could not run.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

/// Where the wallet seed comes from.
#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    /// Seed phrase. Prefer `--seed-file` or the environment; command lines
    /// end up in shell history.
    #[arg(long, env = "SIGIL_SEED", hide_env_values = true)]
    pub seed: Option<String>,

    /// File holding the seed phrase. Takes precedence over `--seed`.
    #[arg(long)]
    pub seed_file: Option<PathBuf>,

    /// Account index within the wallet.
    #[arg(long, default_value_t = 0)]
    pub index: u32,

    /// Network of the wallet: mainnet, testnet or stagenet.
    #[arg(long, env = "SIGIL_NETWORK", default_value = "mainnet")]
    pub network: Network,
}

/// The message to sign or verify.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct MessageArgs {
    /// Message text, used as UTF-8 bytes. May be empty.
    #[arg(long)]
    pub message: Option<String>,

    /// File whose raw bytes are the message.
    #[arg(long)]
    pub message_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AddressArgs {
    #[command(flatten)]
    pub seed: SeedArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SignArgs {
    #[command(flatten)]
    pub seed: SeedArgs,

    #[command(flatten)]
    pub message: MessageArgs,
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// The signer's address.
    #[arg(long)]
    pub address: String,

    /// The `SigV1...` signature.
    #[arg(long)]
    pub signature: String,

    /// Only accept addresses of this network.
    #[arg(long)]
    pub network: Option<Network>,

    #[command(flatten)]
    pub message: MessageArgs,
}
