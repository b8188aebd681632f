//! Message signature verification.
//!
//! [`check_signature`] and [`check_encoded`] report why a signature was
//! rejected; [`verify_message`] collapses every outcome to a `bool`. The
//! boolean form is total: malformed addresses, malformed signatures and
//! arbitrary garbage all yield `false`, never an error or a panic.
//!
//! Checks run cheapest first: signature length and header, then address
//! decoding, then the Ed25519 check.

use thiserror::Error;
use tracing::trace;

use super::envelope::{MessageSignature, SignatureFormatError};
use crate::config::Network;
use crate::crypto::hash::message_digest;
use crate::crypto::signatures;
use crate::identity::{Address, AddressError};

/// Why a signature was rejected.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("malformed address: {0}")]
    Address(#[from] AddressError),

    #[error("malformed signature: {0}")]
    Format(#[from] SignatureFormatError),

    #[error("address is not valid UTF-8")]
    AddressEncoding,

    /// Well-formed inputs, but the signature does not cover this message
    /// under this address.
    #[error("signature does not match message and address")]
    Mismatch,
}

/// Verify a parsed signature against a parsed address.
pub fn check_signature(
    message: &[u8],
    address: &Address,
    signature: &MessageSignature,
) -> Result<(), VerificationError> {
    let digest = message_digest(&address.to_string(), message);
    if signatures::verify(address.public_key(), &digest, signature.signature()) {
        Ok(())
    } else {
        Err(VerificationError::Mismatch)
    }
}

/// Parse and verify text inputs. With `network` set, addresses of other
/// networks are rejected.
pub fn check_encoded(
    message: &[u8],
    address: &str,
    signature: &str,
    network: Option<Network>,
) -> Result<(), VerificationError> {
    let signature = MessageSignature::parse(signature)?;
    let address = match network {
        Some(network) => Address::parse_for(address, network)?,
        None => Address::parse(address)?,
    };
    check_signature(message, &address, &signature)
}

/// Parse and verify inputs that may not be UTF-8.
pub fn check_encoded_bytes(
    message: &[u8],
    address: &[u8],
    signature: &[u8],
    network: Option<Network>,
) -> Result<(), VerificationError> {
    let signature = MessageSignature::parse_bytes(signature)?;
    let address = std::str::from_utf8(address).map_err(|_| VerificationError::AddressEncoding)?;
    let address = match network {
        Some(network) => Address::parse_for(address, network)?,
        None => Address::parse(address)?,
    };
    check_signature(message, &address, &signature)
}

/// Collapse a check to a verdict, tracing the reason for rejection.
pub(crate) fn verdict(result: Result<(), VerificationError>, message_len: usize) -> bool {
    match result {
        Ok(()) => true,
        Err(reason) => {
            trace!(message_len, %reason, "signature rejected");
            false
        }
    }
}

/// `true` exactly when `signature` was produced over `message` by the key
/// behind `address`. Any network is accepted.
pub fn verify_message(message: &[u8], address: &str, signature: &str) -> bool {
    verdict(check_encoded(message, address, signature, None), message.len())
}
