//! # Seed Wallet
//!
//! A [`SeedWallet`] is a wallet restored from a seed phrase. It derives one
//! identity per account index on first use and caches it. Lookups by address
//! scan the first [`ADDRESS_LOOKAHEAD`] indices, which is how a wallet finds
//! which of its accounts a verifier is asking about.
//!
//! ## Lifecycle
//!
//! ```text
//! restore ──> open ──close()──> closed
//! ```
//!
//! Closing drops the phrase and every cached key. A closed wallet answers
//! every request with [`ProviderError::Closed`]; restore a new one to keep
//! going.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::account::Identity;
use super::address::Address;
use super::provider::{IdentitySelector, KeyProvider, ProviderError};
use super::seed::{Blake3SeedDeriver, SeedDeriver, SeedError, SeedPhrase};
use crate::config::{Network, ADDRESS_LOOKAHEAD};
use crate::crypto::keys::Keypair;

struct WalletState {
    /// `None` once closed.
    phrase: Option<SeedPhrase>,
    cache: HashMap<u32, Identity>,
}

/// A deterministic wallet restored from a seed phrase.
///
/// # Examples
///
/// ```
/// use sigil_protocol::config::Network;
/// use sigil_protocol::identity::SeedWallet;
///
/// let phrase = "abbey abbey abbey abbey abbey abbey abbey abbey abbey abbey abbey abbey";
/// let a = SeedWallet::restore(Network::Mainnet, phrase).unwrap();
/// let b = SeedWallet::restore(Network::Mainnet, phrase).unwrap();
/// assert_eq!(a.address(0).unwrap(), b.address(0).unwrap());
/// ```
pub struct SeedWallet<D: SeedDeriver = Blake3SeedDeriver> {
    network: Network,
    deriver: D,
    state: RwLock<WalletState>,
}

impl SeedWallet<Blake3SeedDeriver> {
    /// Restore a wallet using the default derivation.
    pub fn restore(network: Network, phrase: &str) -> Result<Self, SeedError> {
        let phrase = SeedPhrase::parse(phrase)?;
        Ok(Self::restore_with(network, phrase, Blake3SeedDeriver))
    }
}

impl<D: SeedDeriver> SeedWallet<D> {
    /// Restore a wallet with a caller-supplied derivation.
    pub fn restore_with(network: Network, phrase: SeedPhrase, deriver: D) -> Self {
        info!(network = %network, words = phrase.word_count(), "wallet restored");
        Self {
            network,
            deriver,
            state: RwLock::new(WalletState {
                phrase: Some(phrase),
                cache: HashMap::new(),
            }),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// The phrase this wallet was restored from, normalized.
    pub fn seed_phrase(&self) -> Result<SeedPhrase, ProviderError> {
        self.state.read().phrase.clone().ok_or(ProviderError::Closed)
    }

    /// The identity at account `index`, deriving it on first use.
    pub fn identity(&self, index: u32) -> Result<Identity, ProviderError> {
        {
            let state = self.state.read();
            if state.phrase.is_none() {
                return Err(ProviderError::Closed);
            }
            if let Some(identity) = state.cache.get(&index) {
                return Ok(identity.clone());
            }
        }

        let mut state = self.state.write();
        let WalletState { phrase, cache } = &mut *state;
        let phrase = phrase.as_ref().ok_or(ProviderError::Closed)?;

        let identity = cache
            .entry(index)
            .or_insert_with(|| {
                let seed = self.deriver.derive(phrase, index);
                let identity = Identity::from_keypair(self.network, Keypair::from_seed(&seed));
                debug!(index, address = %identity.address(), "derived identity");
                identity
            })
            .clone();
        Ok(identity)
    }

    /// Address of account `index`.
    pub fn address(&self, index: u32) -> Result<Address, ProviderError> {
        self.identity(index).map(|id| *id.address())
    }

    /// Find the account owning `address` among the first
    /// [`ADDRESS_LOOKAHEAD`] indices.
    pub fn find(&self, address: &Address) -> Result<Identity, ProviderError> {
        let not_found = || ProviderError::NotFound(format!("address {}", address));
        if address.network() != self.network {
            return Err(not_found());
        }
        for index in 0..ADDRESS_LOOKAHEAD {
            let identity = self.identity(index)?;
            if identity.address() == address {
                return Ok(identity);
            }
        }
        Err(not_found())
    }

    /// Forget the phrase and all derived keys.
    pub fn close(&self) {
        let mut state = self.state.write();
        state.phrase = None;
        state.cache.clear();
        info!(network = %self.network, "wallet closed");
    }

    pub fn is_closed(&self) -> bool {
        self.state.read().phrase.is_none()
    }
}

impl<D: SeedDeriver> fmt::Debug for SeedWallet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Phrase and keys stay out; cached accounts are listed by index.
        let state = self.state.read();
        let mut cached: Vec<u32> = state.cache.keys().copied().collect();
        cached.sort_unstable();
        f.debug_struct("SeedWallet")
            .field("network", &self.network)
            .field("closed", &state.phrase.is_none())
            .field("cached", &cached)
            .finish()
    }
}

impl<D: SeedDeriver> KeyProvider for SeedWallet<D> {
    fn get_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError> {
        match selector {
            IdentitySelector::Index(index) => self.identity(*index),
            IdentitySelector::Address(address) => self.find(address),
        }
    }
}
