//! # Seed Phrases and Deterministic Derivation
//!
//! Restoring a wallet means turning a list of words back into the same keys
//! every time. The word list is normalized (lowercase, single spaces) and the
//! mapping from words to key bytes is a [`SeedDeriver`], so a wallet backend
//! with its own derivation scheme can plug it in without touching signing.
//!
//! The default [`Blake3SeedDeriver`] computes, per account index:
//!
//! ```text
//! BLAKE3-derive_key(SEED_DOMAIN, le64(len(phrase)) || phrase || le32(index))
//! ```
//!
//! Seed bytes and the phrase itself live in `Zeroizing` buffers and are
//! wiped on drop.

use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{MAX_SEED_WORDS, MIN_SEED_WORDS, SEED_DOMAIN, SIGNING_KEY_LENGTH};
use crate::crypto::hash::absorb_prefixed;

/// Errors raised while parsing a seed phrase.
///
/// Messages never echo the offending word.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed phrase has {0} words, expected 12 to 25")]
    WordCount(usize),

    #[error("seed word {position} contains characters other than ASCII letters")]
    InvalidWord {
        /// 1-based position of the bad word.
        position: usize,
    },
}

/// A normalized seed phrase.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedPhrase {
    normalized: Zeroizing<String>,
    words: usize,
}

impl SeedPhrase {
    /// Normalize and validate a phrase.
    ///
    /// Words are split on any whitespace and lowercased. Each must be ASCII
    /// alphabetic; the count must be within [`MIN_SEED_WORDS`] and
    /// [`MAX_SEED_WORDS`].
    pub fn parse(phrase: &str) -> Result<Self, SeedError> {
        let mut normalized = Zeroizing::new(String::with_capacity(phrase.len()));
        let mut words = 0usize;

        for (i, word) in phrase.split_whitespace().enumerate() {
            if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
                return Err(SeedError::InvalidWord { position: i + 1 });
            }
            if words > 0 {
                normalized.push(' ');
            }
            normalized.extend(word.chars().map(|c| c.to_ascii_lowercase()));
            words += 1;
        }

        if !(MIN_SEED_WORDS..=MAX_SEED_WORDS).contains(&words) {
            return Err(SeedError::WordCount(words));
        }

        Ok(Self { normalized, words })
    }

    /// The normalized phrase. Secret; do not log.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn word_count(&self) -> usize {
        self.words
    }
}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedPhrase({} words, redacted)", self.words)
    }
}

/// Maps a seed phrase and account index to Ed25519 secret key bytes.
pub trait SeedDeriver: Send + Sync {
    fn derive(&self, phrase: &SeedPhrase, index: u32) -> Zeroizing<[u8; SIGNING_KEY_LENGTH]>;
}

/// Default derivation: domain-separated BLAKE3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3SeedDeriver;

impl SeedDeriver for Blake3SeedDeriver {
    fn derive(&self, phrase: &SeedPhrase, index: u32) -> Zeroizing<[u8; SIGNING_KEY_LENGTH]> {
        let mut hasher = blake3::Hasher::new_derive_key(SEED_DOMAIN);
        absorb_prefixed(&mut hasher, phrase.as_str().as_bytes());
        hasher.update(&index.to_le_bytes());
        Zeroizing::new(*hasher.finalize().as_bytes())
    }
}
