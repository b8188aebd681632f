//! # Key Providers
//!
//! Signing needs an [`Identity`]; where it comes from is somebody else's
//! problem. A [`KeyProvider`] resolves an [`IdentitySelector`] (account index
//! or address) to an identity. Seed-restored wallets, in-memory test stores
//! and hardware-backed keyrings all sit behind the same trait.
//!
//! Network-backed providers implement the async
//! [`AsyncKeyProvider`](super::remote::AsyncKeyProvider) instead.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::RwLock;
use thiserror::Error;

use super::account::Identity;
use super::address::Address;

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Which identity a caller wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySelector {
    /// The n-th identity of the provider (account index for seed wallets,
    /// insertion order for stores).
    Index(u32),
    /// The identity owning this address.
    Address(Address),
}

impl From<u32> for IdentitySelector {
    fn from(index: u32) -> Self {
        IdentitySelector::Index(index)
    }
}

impl From<Address> for IdentitySelector {
    fn from(address: Address) -> Self {
        IdentitySelector::Address(address)
    }
}

impl fmt::Display for IdentitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentitySelector::Index(i) => write!(f, "index {}", i),
            IdentitySelector::Address(a) => write!(f, "address {}", a),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while resolving an identity.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Nothing matches the selector.
    #[error("no identity for {0}")]
    NotFound(String),

    /// The provider has been closed and holds no keys.
    #[error("key provider is closed")]
    Closed,

    /// A remote provider did not answer within the configured timeout.
    #[error("key provider timed out after {0:?}")]
    Timeout(Duration),

    /// A remote provider could not be reached or answered with an error.
    #[error("key provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Whether trying again might succeed. Missing keys are configuration
    /// errors and never transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Timeout(_) | ProviderError::Unavailable(_))
    }
}

// ---------------------------------------------------------------------------
// KeyProvider
// ---------------------------------------------------------------------------

/// Synchronous identity lookup.
pub trait KeyProvider: Send + Sync {
    fn get_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError>;
}

impl<P: KeyProvider + ?Sized> KeyProvider for Arc<P> {
    fn get_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError> {
        (**self).get_identity(selector)
    }
}

impl<P: KeyProvider + ?Sized> KeyProvider for &P {
    fn get_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError> {
        (**self).get_identity(selector)
    }
}

// ---------------------------------------------------------------------------
// InMemoryKeyStore
// ---------------------------------------------------------------------------

/// Identities held in memory, keyed by address.
///
/// Index selectors resolve by insertion order. Safe to share across threads;
/// lookups by address never block each other.
#[derive(Default)]
pub struct InMemoryKeyStore {
    by_address: DashMap<Address, Identity>,
    order: RwLock<Vec<Address>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity and return its index. Re-inserting an address
    /// replaces the stored identity and keeps the original index.
    pub fn insert(&self, identity: Identity) -> u32 {
        let address = *identity.address();
        let mut order = self.order.write();
        let index = match order.iter().position(|a| *a == address) {
            Some(pos) => pos,
            None => {
                order.push(address);
                order.len() - 1
            }
        };
        self.by_address.insert(address, identity);
        index as u32
    }

    /// Remove an identity. Later indices shift down by one.
    pub fn remove(&self, address: &Address) -> Option<Identity> {
        let mut order = self.order.write();
        order.retain(|a| a != address);
        self.by_address.remove(address).map(|(_, id)| id)
    }

    pub fn len(&self) -> usize {
        self.order.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Addresses in index order.
    pub fn addresses(&self) -> Vec<Address> {
        self.order.read().clone()
    }
}

impl KeyProvider for InMemoryKeyStore {
    fn get_identity(&self, selector: &IdentitySelector) -> Result<Identity, ProviderError> {
        let address = match selector {
            IdentitySelector::Address(address) => *address,
            IdentitySelector::Index(index) => {
                let order = self.order.read();
                *order
                    .get(*index as usize)
                    .ok_or_else(|| ProviderError::NotFound(selector.to_string()))?
            }
        };

        self.by_address
            .get(&address)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ProviderError::NotFound(selector.to_string()))
    }
}
