//! # SignatureService
//!
//! The two operations callers actually need:
//!
//! - [`sign`](SignatureService::sign): message and identity in, signature out.
//! - [`verify`](SignatureService::verify): message, claimed address and
//!   signature in, `bool` out.
//!
//! The service holds no keys and no mutable state. It is `Copy`, and any
//! number of threads may share one without locking. The only setting is an
//! optional network restriction for verifiers that should accept addresses
//! of a single network.

use tracing::debug;

use super::envelope::MessageSignature;
use super::signing::{sign_message, SignError};
use super::verification::{
    check_encoded, check_encoded_bytes, check_signature, verdict, VerificationError,
};
use crate::config::Network;
use crate::identity::{
    Address, AddressError, AsyncKeyProvider, Identity, IdentitySelector, KeyProvider,
};

/// Signs and verifies messages.
///
/// # Examples
///
/// ```
/// use sigil_protocol::config::Network;
/// use sigil_protocol::identity::SeedWallet;
/// use sigil_protocol::message::SignatureService;
///
/// let phrase = "abbey abbey abbey abbey abbey abbey abbey abbey abbey abbey abbey abbey";
/// let wallet = SeedWallet::restore(Network::Mainnet, phrase).unwrap();
/// let identity = wallet.identity(0).unwrap();
///
/// let service = SignatureService::new();
/// let signature = service.sign(b"foo", &identity).unwrap();
///
/// let address = identity.address().to_string();
/// assert!(service.verify(b"foo", &address, &signature.to_string()));
/// assert!(!service.verify(b"bar", &address, &signature.to_string()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureService {
    network: Option<Network>,
}

impl SignatureService {
    /// A service that accepts addresses of every network.
    pub fn new() -> Self {
        Self { network: None }
    }

    /// A service that treats addresses of any other network as invalid.
    pub fn for_network(network: Network) -> Self {
        Self {
            network: Some(network),
        }
    }

    /// The network restriction, if any.
    pub fn network(&self) -> Option<Network> {
        self.network
    }

    /// Sign `message` as `identity`.
    ///
    /// Fails only with [`SignError::KeyUnavailable`] for identities without
    /// a private key. Signing does not consult the network restriction.
    pub fn sign(&self, message: &[u8], identity: &Identity) -> Result<MessageSignature, SignError> {
        sign_message(message, identity)
    }

    /// Resolve an identity through `provider`, then sign.
    pub fn sign_with<P>(
        &self,
        provider: &P,
        selector: &IdentitySelector,
        message: &[u8],
    ) -> Result<MessageSignature, SignError>
    where
        P: KeyProvider + ?Sized,
    {
        let identity = provider.get_identity(selector)?;
        debug!(%selector, address = %identity.address(), "resolved signing identity");
        self.sign(message, &identity)
    }

    /// Resolve an identity through an async provider, then sign.
    pub async fn sign_with_async<P>(
        &self,
        provider: &P,
        selector: &IdentitySelector,
        message: &[u8],
    ) -> Result<MessageSignature, SignError>
    where
        P: AsyncKeyProvider + ?Sized,
    {
        let identity = provider.fetch_identity(selector).await?;
        debug!(%selector, address = %identity.address(), "resolved signing identity");
        self.sign(message, &identity)
    }

    /// Whether `signature` is a valid signature over `message` by `address`.
    ///
    /// Total over its inputs: malformed addresses or signatures, wrong
    /// networks and oversized input all return `false`.
    pub fn verify(&self, message: &[u8], address: &str, signature: &str) -> bool {
        verdict(self.check(message, address, signature), message.len())
    }

    /// [`verify`](Self::verify) over raw bytes. Non-UTF-8 input is `false`.
    pub fn verify_bytes(&self, message: &[u8], address: &[u8], signature: &[u8]) -> bool {
        verdict(
            check_encoded_bytes(message, address, signature, self.network),
            message.len(),
        )
    }

    /// [`verify`](Self::verify) for already-parsed values.
    pub fn verify_typed(
        &self,
        message: &[u8],
        address: &Address,
        signature: &MessageSignature,
    ) -> bool {
        let result = match self.network {
            Some(expected) if address.network() != expected => {
                Err(VerificationError::Address(AddressError::WrongNetwork {
                    expected,
                    got: address.network(),
                }))
            }
            _ => check_signature(message, address, signature),
        };
        verdict(result, message.len())
    }

    /// Like [`verify`](Self::verify), but says why a signature was rejected.
    pub fn check(
        &self,
        message: &[u8],
        address: &str,
        signature: &str,
    ) -> Result<(), VerificationError> {
        check_encoded(message, address, signature, self.network)
    }
}
