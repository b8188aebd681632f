use proptest::prelude::*;

use sigil_protocol::config::Network;
use sigil_protocol::crypto::Keypair;
use sigil_protocol::identity::Identity;
use sigil_protocol::message::SignatureService;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const BECH32_ALPHABET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

fn identity(seed: [u8; 32]) -> Identity {
    Identity::from_keypair(Network::Mainnet, Keypair::from_seed(&seed))
}

fn alphabet(chars: &str) -> impl Strategy<Value = char> {
    prop::sample::select(chars.chars().collect::<Vec<_>>())
}

/// Replace the character at `index % len` with `replacement`, or with the
/// alphabet's first character when they coincide.
fn mutate_char(s: &str, index: usize, replacement: char, fallback_alphabet: &str) -> String {
    let i = index % s.len();
    let original = s.as_bytes()[i] as char;
    let replacement = if replacement == original {
        fallback_alphabet
            .chars()
            .find(|&c| c != original)
            .unwrap_or('1')
    } else {
        replacement
    };
    let mut out = s.to_string();
    out.replace_range(i..i + 1, &replacement.to_string());
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signed_message_verifies(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let service = SignatureService::new();
        let id = identity(seed);
        let sig = service.sign(&message, &id).unwrap();
        prop_assert!(service.verify(&message, &id.address().to_string(), &sig.to_string()));
    }

    #[test]
    fn other_message_does_not_verify(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 0..128),
        other in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(message != other);
        let service = SignatureService::new();
        let id = identity(seed);
        let sig = service.sign(&message, &id).unwrap();
        prop_assert!(!service.verify(&other, &id.address().to_string(), &sig.to_string()));
    }

    #[test]
    fn message_bit_flip_does_not_verify(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 1..128),
        index in any::<usize>(),
        bit in 0u8..8,
    ) {
        let service = SignatureService::new();
        let id = identity(seed);
        let sig = service.sign(&message, &id).unwrap();

        let mut flipped = message.clone();
        let i = index % flipped.len();
        flipped[i] ^= 1 << bit;
        prop_assert!(!service.verify_typed(&flipped, id.address(), &sig));
    }

    #[test]
    fn other_identity_does_not_verify(
        seed in any::<[u8; 32]>(),
        other_seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(seed != other_seed);
        let service = SignatureService::new();
        let signer = identity(seed);
        let other = identity(other_seed);
        let sig = service.sign(&message, &signer).unwrap();
        prop_assert!(!service.verify(&message, &other.address().to_string(), &sig.to_string()));
    }

    #[test]
    fn signature_character_mutation_does_not_verify(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 0..64),
        index in any::<usize>(),
        replacement in alphabet(BASE58_ALPHABET),
    ) {
        let service = SignatureService::new();
        let id = identity(seed);
        let sig = service.sign(&message, &id).unwrap().to_string();
        let mutated = mutate_char(&sig, index, replacement, BASE58_ALPHABET);
        prop_assert_ne!(&mutated, &sig);
        prop_assert!(!service.verify(&message, &id.address().to_string(), &mutated));
    }

    #[test]
    fn address_character_mutation_does_not_verify(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 0..64),
        index in any::<usize>(),
        replacement in alphabet(BECH32_ALPHABET),
    ) {
        let service = SignatureService::new();
        let id = identity(seed);
        let sig = service.sign(&message, &id).unwrap().to_string();
        let address = id.address().to_string();
        let mutated = mutate_char(&address, index, replacement, BECH32_ALPHABET);
        prop_assert_ne!(&mutated, &address);
        prop_assert!(!service.verify(&message, &mutated, &sig));
    }

    #[test]
    fn appended_suffix_does_not_verify(
        seed in any::<[u8; 32]>(),
        suffix in "[1-9A-Za-z]{1,8}",
    ) {
        let service = SignatureService::new();
        let id = identity(seed);
        let sig = service.sign(b"foo", &id).unwrap().to_string();
        let tampered = format!("{}{}", sig, suffix);
        prop_assert!(!service.verify(b"foo", &id.address().to_string(), &tampered));
    }

    #[test]
    fn verify_is_total_over_strings(
        message in prop::collection::vec(any::<u8>(), 0..64),
        address in ".{0,128}",
        signature in ".{0,256}",
    ) {
        let service = SignatureService::new();
        prop_assert!(!service.verify(&message, &address, &signature));
        prop_assert!(service.check(&message, &address, &signature).is_err());
    }

    #[test]
    fn verify_is_total_over_bytes(
        message in prop::collection::vec(any::<u8>(), 0..64),
        address in prop::collection::vec(any::<u8>(), 0..128),
        signature in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assert!(!SignatureService::new().verify_bytes(&message, &address, &signature));
    }

    #[test]
    fn well_formed_but_unrelated_signature_does_not_verify(
        seed in any::<[u8; 32]>(),
        raw in prop::collection::vec(any::<u8>(), 64..=64),
    ) {
        let service = SignatureService::new();
        let id = identity(seed);
        let forged = format!("SigV1{}", bs58::encode(&raw).into_string());
        prop_assert!(!service.verify(b"foo", &id.address().to_string(), &forged));
    }
}
