//! # Hashing Utilities
//!
//! BLAKE3 is the only hash function sigil uses. Every hash that feeds a
//! signature or a key is computed in `derive_key` mode with a context string
//! from [`crate::config`], so a digest computed for one purpose can never be
//! replayed as input for another.
//!
//! Variable-length fields are length-prefixed (little-endian `u64`) before
//! they are absorbed. Without the prefix, `("ab", "c")` and `("a", "bc")`
//! would hash identically.

use crate::config::MESSAGE_DOMAIN;

/// Digest that a message signature actually covers.
///
/// ```text
/// BLAKE3-derive_key(MESSAGE_DOMAIN,
///     le64(len(address)) || address || le64(len(message)) || message)
/// ```
///
/// `address` must be the canonical address string. Folding it into the
/// digest binds the signature to the address it was requested for.
///
/// # Example
///
/// ```
/// use sigil_protocol::crypto::message_digest;
///
/// let a = message_digest("sigil1abc", b"foo");
/// let b = message_digest("sigil1abc", b"bar");
/// assert_ne!(a, b);
/// ```
pub fn message_digest(address: &str, message: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(MESSAGE_DOMAIN);
    absorb_prefixed(&mut hasher, address.as_bytes());
    absorb_prefixed(&mut hasher, message);
    *hasher.finalize().as_bytes()
}

/// Absorb a length-prefixed field.
pub(crate) fn absorb_prefixed(hasher: &mut blake3::Hasher, field: &[u8]) {
    hasher.update(&(field.len() as u64).to_le_bytes());
    hasher.update(field);
}
