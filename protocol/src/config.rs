//! # Protocol Configuration & Constants
//!
//! Every magic number in sigil lives here. Domain strings and the signature
//! header are part of the wire contract: changing any of them invalidates
//! every signature ever produced, so treat them as frozen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Network Prefixes
// ---------------------------------------------------------------------------

/// Bech32 human-readable prefixes, one per network.
pub const MAINNET_HRP: &str = "sigil";
pub const TESTNET_HRP: &str = "tsigil";
pub const STAGENET_HRP: &str = "ssigil";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// The only signing algorithm sigil speaks.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Ed25519 secret key length in bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes. Also the address payload length.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// BLAKE3 `derive_key` context for message digests.
pub const MESSAGE_DOMAIN: &str = "sigil 2026-01-01 message signature v1";

/// BLAKE3 `derive_key` context for seed-to-key derivation.
pub const SEED_DOMAIN: &str = "sigil 2026-01-01 deterministic wallet seed v1";

/// Prefix of every encoded message signature.
pub const SIGNATURE_HEADER: &str = "SigV1";

/// Upper bound on an encoded signature string.
///
/// 64 bytes of base58 is at most 88 characters; with the header that is 93.
/// Anything past this bound is rejected before base58 decoding so oversized
/// input costs nothing.
pub const MAX_ENCODED_SIGNATURE_LEN: usize = 96;

// ---------------------------------------------------------------------------
// Seed Phrases
// ---------------------------------------------------------------------------

/// Fewest words accepted in a seed phrase.
pub const MIN_SEED_WORDS: usize = 12;

/// Most words accepted in a seed phrase (24 data words plus a checksum word).
pub const MAX_SEED_WORDS: usize = 25;

/// Account indices a seed wallet searches when asked for an address.
pub const ADDRESS_LOOKAHEAD: u32 = 64;

// ---------------------------------------------------------------------------
// Key Provider Defaults
// ---------------------------------------------------------------------------

/// Per-attempt timeout when resolving an identity from a remote provider.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Total attempts (first try included) before a transient failure is final.
pub const DEFAULT_PROVIDER_ATTEMPTS: u32 = 3;

/// Pause between attempts.
pub const DEFAULT_PROVIDER_BACKOFF: Duration = Duration::from_millis(250);

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Error returned when a network name or prefix is not recognized.
#[derive(Debug, Error)]
#[error("unknown network: {0}")]
pub struct UnknownNetwork(pub String);

/// The network an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Stagenet,
}

impl Network {
    /// All networks, in declaration order.
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Stagenet];

    /// Bech32 human-readable prefix for addresses on this network.
    pub fn hrp(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_HRP,
            Network::Testnet => TESTNET_HRP,
            Network::Stagenet => STAGENET_HRP,
        }
    }

    /// Look up a network by its Bech32 prefix.
    pub fn from_hrp(hrp: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.hrp() == hrp)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Stagenet => "stagenet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "stagenet" | "stage" => Ok(Network::Stagenet),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProviderConfig
// ---------------------------------------------------------------------------

/// Timeout and retry policy for remote key providers.
///
/// Durations are stored as milliseconds so the struct reads naturally from
/// JSON or TOML config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Per-attempt timeout.
    pub timeout_ms: u64,
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff_ms: u64,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Attempts to make, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_PROVIDER_TIMEOUT.as_millis() as u64,
            max_attempts: DEFAULT_PROVIDER_ATTEMPTS,
            backoff_ms: DEFAULT_PROVIDER_BACKOFF.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hrps_are_distinct() {
        assert_ne!(MAINNET_HRP, TESTNET_HRP);
        assert_ne!(MAINNET_HRP, STAGENET_HRP);
        assert_ne!(TESTNET_HRP, STAGENET_HRP);
    }

    #[test]
    fn hrp_lookup_roundtrip() {
        for network in Network::ALL {
            assert_eq!(Network::from_hrp(network.hrp()), Some(network));
        }
        assert_eq!(Network::from_hrp("seal"), None);
    }

    #[test]
    fn network_parses_from_name() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(" stage ".parse::<Network>().unwrap(), Network::Stagenet);
        assert!("regtest".parse::<Network>().is_err());
    }

    #[test]
    fn network_display_parses_back() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }

    #[test]
    fn encoded_signature_bound_fits_header_and_payload() {
        // Base58 expands by log(256)/log(58) ~ 1.366, so 64 bytes <= 88 chars.
        assert!(MAX_ENCODED_SIGNATURE_LEN >= SIGNATURE_HEADER.len() + 88);
    }

    #[test]
    fn domains_are_distinct() {
        assert_ne!(MESSAGE_DOMAIN, SEED_DOMAIN);
    }

    #[test]
    fn provider_config_defaults() {
        let cfg = ProviderConfig::default();
        assert_eq!(cfg.timeout(), DEFAULT_PROVIDER_TIMEOUT);
        assert_eq!(cfg.attempts(), DEFAULT_PROVIDER_ATTEMPTS);
        assert_eq!(cfg.backoff(), DEFAULT_PROVIDER_BACKOFF);
    }

    #[test]
    fn provider_config_zero_attempts_means_one() {
        let cfg = ProviderConfig {
            max_attempts: 0,
            ..ProviderConfig::default()
        };
        assert_eq!(cfg.attempts(), 1);
    }

    #[test]
    fn provider_config_partial_json_fills_defaults() {
        let cfg: ProviderConfig = serde_json::from_str(r#"{"timeout_ms": 1500}"#).unwrap();
        assert_eq!(cfg.timeout_ms, 1500);
        assert_eq!(cfg.max_attempts, DEFAULT_PROVIDER_ATTEMPTS);
    }
}
