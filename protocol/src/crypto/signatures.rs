//! # Digital Signatures
//!
//! Ed25519 signing and strict verification over raw bytes.
//!
//! Message signing in [`crate::message`] hashes the message together with
//! the address first and then signs the digest through this module. Keeping
//! the primitive calls here gives one place to audit every signature the
//! crate produces.
//!
//! ## Strictness
//!
//! Verification uses `verify_strict`: non-canonical `s` values and
//! small-order `R` or `A` points are rejected, so a valid signature has
//! exactly one accepted encoding.

use super::keys::{Keypair, PublicKey, Signature};

/// Sign `message` with `keypair`. Deterministic (RFC 8032).
///
/// # Example
///
/// ```
/// use sigil_protocol::crypto::{Keypair, sign, verify};
///
/// let keypair = Keypair::generate();
/// let signature = sign(&keypair, b"payload");
/// assert!(verify(&keypair.public_key(), b"payload", &signature));
/// ```
pub fn sign(keypair: &Keypair, message: &[u8]) -> Signature {
    keypair.sign(message)
}

/// Verify a signature. `false` on any failure.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let kp = Keypair::generate();
        let sig = sign(&kp, b"hello, world");
        assert!(verify(&kp.public_key(), b"hello, world", &sig));
    }

    #[test]
    fn test_empty_message() {
        let kp = Keypair::generate();
        let sig = sign(&kp, b"");
        assert!(verify(&kp.public_key(), b"", &sig));
    }

    #[test]
    fn test_large_message() {
        let kp = Keypair::generate();
        let msg = vec![0xAB; 1_000_000];
        let sig = sign(&kp, &msg);
        assert!(verify(&kp.public_key(), &msg, &sig));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let kp = Keypair::generate();
        let mut sig = sign(&kp, b"msg").as_bytes().to_vec();
        sig[10] ^= 0x01;
        assert!(!verify(&kp.public_key(), b"msg", &Signature::from_raw(sig)));
    }

    #[test]
    fn test_non_canonical_scalar_rejected() {
        // Adding the group order L to `s` gives a value that lenient
        // verifiers accept; strict verification must not.
        const L: [u8; 32] = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ];
        let kp = Keypair::generate();
        let mut sig = sign(&kp, b"msg").as_bytes().to_vec();
        let mut carry = 0u16;
        for i in 0..32 {
            let sum = sig[32 + i] as u16 + L[i] as u16 + carry;
            sig[32 + i] = sum as u8;
            carry = sum >> 8;
        }
        assert!(!verify(&kp.public_key(), b"msg", &Signature::from_raw(sig)));
    }
}
