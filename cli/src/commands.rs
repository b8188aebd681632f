//! Subcommand implementations.
//!
//! Each command returns a serializable result instead of printing, so the
//! commands can be exercised without spawning the binary.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use zeroize::Zeroizing;

use sigil_protocol::identity::{IdentitySelector, SeedWallet};
use sigil_protocol::message::SignatureService;

use crate::cli::{AddressArgs, MessageArgs, SeedArgs, SignArgs, VerifyArgs};

/// Exit status of a command that ran to completion.
pub const EXIT_OK: u8 = 0;

/// Exit status of `verify` when the signature is not good.
pub const EXIT_NOT_GOOD: u8 = 1;

/// Exit status when a command could not run: unreadable files, bad seed,
/// missing arguments. Never used for a signature that is merely not good.
pub const EXIT_ERROR: u8 = 2;

#[derive(Debug, Serialize)]
pub struct AddressOutput {
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct SignOutput {
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub good: bool,
}

impl VerifyOutput {
    pub fn exit_status(&self) -> u8 {
        if self.good {
            EXIT_OK
        } else {
            EXIT_NOT_GOOD
        }
    }
}

/// Restore the wallet named by the seed arguments.
pub fn open_wallet(args: &SeedArgs) -> Result<SeedWallet> {
    let phrase = match (&args.seed_file, &args.seed) {
        (Some(path), _) => Zeroizing::new(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read seed file {}", path.display()))?,
        ),
        (None, Some(seed)) => Zeroizing::new(seed.clone()),
        (None, None) => {
            return Err(anyhow!(
                "no seed given; use --seed-file, --seed or SIGIL_SEED"
            ))
        }
    };

    let wallet = SeedWallet::restore(args.network, &phrase).context("invalid seed phrase")?;
    tracing::debug!(network = %args.network, index = args.index, "wallet opened");
    Ok(wallet)
}

/// The message bytes, from the command line or a file.
pub fn read_message(args: &MessageArgs) -> Result<Vec<u8>> {
    match (&args.message, &args.message_file) {
        (Some(text), _) => Ok(text.as_bytes().to_vec()),
        (None, Some(path)) => std::fs::read(path)
            .with_context(|| format!("failed to read message file {}", path.display())),
        (None, None) => Err(anyhow!("no message given; use --message or --message-file")),
    }
}

pub fn address(args: &AddressArgs) -> Result<AddressOutput> {
    let wallet = open_wallet(&args.seed)?;
    let address = wallet.address(args.seed.index)?;
    wallet.close();
    Ok(AddressOutput {
        address: address.to_string(),
    })
}

pub fn sign(args: &SignArgs) -> Result<SignOutput> {
    let wallet = open_wallet(&args.seed)?;
    let message = read_message(&args.message)?;

    let signature = SignatureService::new()
        .sign_with(&wallet, &IdentitySelector::Index(args.seed.index), &message)
        .context("signing failed")?;
    wallet.close();

    Ok(SignOutput {
        signature: signature.to_string(),
    })
}

/// Check a signature.
///
/// The address and signature are checked exactly as given; surrounding
/// whitespace makes them different strings and the answer `false`.
///
/// `Ok` carries the verdict, which maps to [`EXIT_OK`] or [`EXIT_NOT_GOOD`].
/// `Err` means the check never ran (for example an unreadable message file)
/// and maps to [`EXIT_ERROR`].
pub fn verify(args: &VerifyArgs) -> Result<VerifyOutput> {
    let message = read_message(&args.message)?;
    let service = match args.network {
        Some(network) => SignatureService::for_network(network),
        None => SignatureService::new(),
    };

    let good = match service.check(&message, &args.address, &args.signature) {
        Ok(()) => true,
        Err(reason) => {
            tracing::info!(%reason, "signature is not good");
            false
        }
    };
    Ok(VerifyOutput { good })
}
