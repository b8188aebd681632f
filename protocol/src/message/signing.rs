//! Message signing.
//!
//! The signature covers [`message_digest`] of the canonical address string
//! and the message, never the raw message. Signing needs the identity's key;
//! a watch-only identity fails with [`SignError::KeyUnavailable`], which is
//! a configuration error and never worth retrying.

use thiserror::Error;
use tracing::debug;

use super::envelope::MessageSignature;
use crate::crypto::hash::message_digest;
use crate::crypto::signatures;
use crate::identity::{Address, Identity, ProviderError};

/// Why a message could not be signed.
#[derive(Debug, Error)]
pub enum SignError {
    /// The identity carries no usable private key.
    #[error("no signing key available for {address}")]
    KeyUnavailable { address: Address },

    /// The key provider could not resolve the identity.
    #[error("key provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Sign `message` as `identity`.
///
/// # Errors
///
/// [`SignError::KeyUnavailable`] when the identity is watch-only.
///
/// # Example
///
/// ```
/// use sigil_protocol::config::Network;
/// use sigil_protocol::crypto::Keypair;
/// use sigil_protocol::identity::Identity;
/// use sigil_protocol::message::{sign_message, verify_message};
///
/// let identity = Identity::from_keypair(Network::Mainnet, Keypair::generate());
/// let signature = sign_message(b"foo", &identity).unwrap();
/// let address = identity.address().to_string();
/// assert!(verify_message(b"foo", &address, &signature.to_string()));
/// ```
pub fn sign_message(message: &[u8], identity: &Identity) -> Result<MessageSignature, SignError> {
    let address = identity.address();
    let digest = message_digest(&address.to_string(), message);

    let signature = identity
        .with_signing_key(|keypair| signatures::sign(keypair, &digest))
        .ok_or(SignError::KeyUnavailable { address: *address })?;

    debug!(address = %address, message_len = message.len(), "signed message");
    Ok(MessageSignature::from_signature(signature))
}
