//! Text encoding of message signatures.
//!
//! ```text
//! "SigV1" || base58(signature[64])
//! ```
//!
//! The header names the scheme so a future version can be told apart
//! without guessing. Parsing is strict and bounded: oversized input is
//! rejected before any decoding work, and the payload must decode to
//! exactly 64 bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{MAX_ENCODED_SIGNATURE_LEN, SIGNATURE_HEADER, SIGNATURE_LENGTH};
use crate::crypto::keys::Signature;

/// Why an encoded signature could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFormatError {
    #[error("encoded signature is {0} bytes, longer than any valid signature")]
    TooLong(usize),

    #[error("encoded signature is not valid UTF-8")]
    Encoding,

    #[error("encoded signature does not start with the SigV1 header")]
    MissingHeader,

    #[error("signature payload is not valid base58")]
    Base58,

    #[error("signature payload decodes to {0} bytes, expected 64")]
    InvalidLength(usize),
}

/// A signature over a message, as handed to a verifier.
///
/// # Examples
///
/// ```
/// use sigil_protocol::message::MessageSignature;
///
/// assert!("SigV1".parse::<MessageSignature>().is_err());
/// assert!("not a signature".parse::<MessageSignature>().is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MessageSignature {
    signature: Signature,
}

impl MessageSignature {
    /// Wrap a signature produced by a [`Keypair`](crate::crypto::Keypair),
    /// which is always 64 bytes.
    pub(crate) fn from_signature(signature: Signature) -> Self {
        Self { signature }
    }

    /// Build from raw signature bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self {
            signature: Signature::from_raw(bytes.to_vec()),
        }
    }

    /// Parse the `SigV1...` text form.
    pub fn parse(s: &str) -> Result<Self, SignatureFormatError> {
        if s.len() > MAX_ENCODED_SIGNATURE_LEN {
            return Err(SignatureFormatError::TooLong(s.len()));
        }
        let payload = s
            .strip_prefix(SIGNATURE_HEADER)
            .ok_or(SignatureFormatError::MissingHeader)?;

        let bytes = bs58::decode(payload)
            .into_vec()
            .map_err(|_| SignatureFormatError::Base58)?;
        let signature = Signature::try_from_slice(&bytes)
            .map_err(|_| SignatureFormatError::InvalidLength(bytes.len()))?;

        Ok(Self { signature })
    }

    /// Parse from bytes that may not be UTF-8.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, SignatureFormatError> {
        if bytes.len() > MAX_ENCODED_SIGNATURE_LEN {
            return Err(SignatureFormatError::TooLong(bytes.len()));
        }
        let s = std::str::from_utf8(bytes).map_err(|_| SignatureFormatError::Encoding)?;
        Self::parse(s)
    }

    /// The raw 64 signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.signature.as_bytes()
    }

    pub(crate) fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The `SigV1...` text form.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(MAX_ENCODED_SIGNATURE_LEN);
        out.push_str(SIGNATURE_HEADER);
        out.push_str(&bs58::encode(self.signature.as_bytes()).into_string());
        out
    }
}

impl fmt::Display for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageSignature({})", self.encode())
    }
}

impl FromStr for MessageSignature {
    type Err = SignatureFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MessageSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for MessageSignature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MessageSignature::parse(&s).map_err(serde::de::Error::custom)
    }
}
