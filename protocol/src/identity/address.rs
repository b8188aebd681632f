//! # Addresses
//!
//! A sigil address is the Bech32 encoding of an Ed25519 public key under a
//! network-specific prefix:
//!
//! ```text
//! public_key (32 bytes)
//!     -> Bech32(hrp(network), public_key) -> sigil1qw508d6qe...
//! ```
//!
//! The key is embedded as-is (not hashed) because a verifier holds nothing
//! but the address: everything needed to check a signature has to be
//! recoverable from the string alone.
//!
//! Parsing is strict. The checksum must be classic Bech32, the prefix must
//! name a known network, the payload must be a valid Ed25519 point, and the
//! string must be the canonical encoding of that payload (no stray padding
//! bits). Bech32 itself rejects mixed-case input.

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{Network, VERIFYING_KEY_LENGTH};
use crate::crypto::keys::PublicKey;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while parsing an address.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Bad characters, mixed case, or checksum mismatch.
    #[error("bech32 decode error: {0}")]
    Bech32(String),

    /// The prefix does not belong to any known network.
    #[error("unknown address prefix '{0}'")]
    UnknownPrefix(String),

    /// The address is valid but for a different network.
    #[error("address is for {got}, expected {expected}")]
    WrongNetwork {
        /// The network the caller asked for.
        expected: Network,
        /// The network encoded in the address.
        got: Network,
    },

    /// The decoded payload has the wrong length.
    #[error("invalid address data length: expected {expected} bytes, got {got}")]
    InvalidDataLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },

    /// The payload is not a valid Ed25519 public key.
    #[error("address payload is not a valid public key")]
    InvalidPublicKey,

    /// The string decodes, but is not the canonical encoding of its payload.
    #[error("address is not canonically encoded")]
    NonCanonical,
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A network-qualified public key.
///
/// # Examples
///
/// ```
/// use sigil_protocol::config::Network;
/// use sigil_protocol::crypto::Keypair;
/// use sigil_protocol::identity::Address;
///
/// let kp = Keypair::generate();
/// let address = Address::new(Network::Mainnet, kp.public_key());
/// let encoded = address.to_string();
/// assert!(encoded.starts_with("sigil1"));
///
/// let parsed: Address = encoded.parse().unwrap();
/// assert_eq!(parsed, address);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    public_key: PublicKey,
}

impl Address {
    pub fn new(network: Network, public_key: PublicKey) -> Self {
        Self {
            network,
            public_key,
        }
    }

    /// Parse an address of any known network.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let checked = CheckedHrpstring::new::<Bech32>(s)
            .map_err(|e| AddressError::Bech32(e.to_string()))?;

        let prefix = checked.hrp().to_lowercase();
        let network =
            Network::from_hrp(&prefix).ok_or_else(|| AddressError::UnknownPrefix(prefix))?;

        let data: Vec<u8> = checked.byte_iter().collect();
        if data.len() != VERIFYING_KEY_LENGTH {
            return Err(AddressError::InvalidDataLength {
                expected: VERIFYING_KEY_LENGTH,
                got: data.len(),
            });
        }

        let public_key =
            PublicKey::try_from_slice(&data).map_err(|_| AddressError::InvalidPublicKey)?;
        let address = Self::new(network, public_key);

        // Non-zero padding bits survive the checksum but not a re-encode.
        if !address.to_string().eq_ignore_ascii_case(s) {
            return Err(AddressError::NonCanonical);
        }

        Ok(address)
    }

    /// Parse an address and require it to belong to `network`.
    pub fn parse_for(s: &str, network: Network) -> Result<Self, AddressError> {
        let address = Self::parse(s)?;
        if address.network != network {
            return Err(AddressError::WrongNetwork {
                expected: network,
                got: address.network,
            });
        }
        Ok(address)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hrp = Hrp::parse_unchecked(self.network.hrp());
        bech32::encode_to_fmt::<Bech32, _>(f, hrp, self.public_key.as_bytes())
            .map_err(|_| fmt::Error)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    fn mainnet_address() -> Address {
        Address::new(Network::Mainnet, Keypair::generate().public_key())
    }

    #[test]
    fn address_prefix_matches_network() {
        let pk = Keypair::generate().public_key();
        assert!(Address::new(Network::Mainnet, pk).to_string().starts_with("sigil1"));
        assert!(Address::new(Network::Testnet, pk).to_string().starts_with("tsigil1"));
        assert!(Address::new(Network::Stagenet, pk).to_string().starts_with("ssigil1"));
    }

    #[test]
    fn address_roundtrip() {
        for network in Network::ALL {
            let address = Address::new(network, Keypair::generate().public_key());
            let parsed = Address::parse(&address.to_string()).unwrap();
            assert_eq!(parsed, address);
            assert_eq!(parsed.network(), network);
        }
    }

    #[test]
    fn same_key_different_network_differs() {
        let pk = Keypair::generate().public_key();
        let main = Address::new(Network::Mainnet, pk);
        let test = Address::new(Network::Testnet, pk);
        assert_ne!(main, test);
        assert_ne!(main.to_string(), test.to_string());
    }

    #[test]
    fn deterministic_address_from_same_key() {
        let kp = Keypair::from_seed(&[7u8; 32]);
        let a1 = Address::new(Network::Mainnet, kp.public_key()).to_string();
        let a2 = Address::new(Network::Mainnet, kp.public_key()).to_string();
        assert_eq!(a1, a2);
    }

    #[test]
    fn uppercase_address_parses() {
        let address = mainnet_address();
        let upper = address.to_string().to_uppercase();
        assert_eq!(Address::parse(&upper).unwrap(), address);
    }

    #[test]
    fn mixed_case_rejected() {
        let mut s = mainnet_address().to_string();
        s.replace_range(0..1, "S");
        assert!(matches!(Address::parse(&s), Err(AddressError::Bech32(_))));
    }

    #[test]
    fn unknown_prefix_rejected() {
        let hrp = Hrp::parse("seal").unwrap();
        let pk = Keypair::generate().public_key();
        let encoded = bech32::encode::<Bech32>(hrp, pk.as_bytes()).unwrap();
        assert!(matches!(
            Address::parse(&encoded),
            Err(AddressError::UnknownPrefix(p)) if p == "seal"
        ));
    }

    #[test]
    fn wrong_payload_length_rejected() {
        let hrp = Hrp::parse("sigil").unwrap();
        let encoded = bech32::encode::<Bech32>(hrp, &[9u8; 20]).unwrap();
        assert!(matches!(
            Address::parse(&encoded),
            Err(AddressError::InvalidDataLength { expected: 32, got: 20 })
        ));
    }

    #[test]
    fn bech32m_checksum_rejected() {
        let hrp = Hrp::parse("sigil").unwrap();
        let pk = Keypair::generate().public_key();
        let encoded = bech32::encode::<bech32::Bech32m>(hrp, pk.as_bytes()).unwrap();
        assert!(matches!(Address::parse(&encoded), Err(AddressError::Bech32(_))));
    }

    #[test]
    fn every_single_character_mutation_rejected() {
        let s = mainnet_address().to_string();
        let data_start = s.rfind('1').unwrap() + 1;
        for i in data_start..s.len() {
            let original = s.as_bytes()[i];
            let replacement = if original == b'q' { 'p' } else { 'q' };
            let mut mutated = s.clone();
            mutated.replace_range(i..i + 1, &replacement.to_string());
            assert!(Address::parse(&mutated).is_err(), "mutation at {} accepted", i);
        }
    }

    #[test]
    fn appended_character_rejected() {
        let s = format!("{}q", mainnet_address());
        assert!(Address::parse(&s).is_err());
    }

    #[test]
    fn garbage_rejected() {
        for input in ["", "sigil1", "not an address", "sigil1!!!!", "\u{1F600}"] {
            assert!(Address::parse(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn parse_for_checks_network() {
        let address = mainnet_address();
        let s = address.to_string();
        assert!(Address::parse_for(&s, Network::Mainnet).is_ok());
        assert!(matches!(
            Address::parse_for(&s, Network::Testnet),
            Err(AddressError::WrongNetwork {
                expected: Network::Testnet,
                got: Network::Mainnet
            })
        ));
    }

    #[test]
    fn address_serde_json_roundtrip() {
        let address = mainnet_address();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address));
        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, address);
    }

    #[test]
    fn invalid_address_fails_deserialization() {
        assert!(serde_json::from_str::<Address>("\"sigil1nope\"").is_err());
    }
}
