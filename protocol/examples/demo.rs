//! Walkthrough of sigil message signing.
//!
//! Restores two wallets from seed phrases, signs a message with one of
//! them, and shows a verifier accepting the genuine signature and rejecting
//! every tampered variant. Output uses ANSI escape codes for color.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use sigil_protocol::config::Network;
use sigil_protocol::identity::{IdentitySelector, InMemoryKeyStore, SeedWallet};
use sigil_protocol::message::{SignError, SignatureService};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BG_BLUE: &str = "\x1b[44m";

const ALICE_SEED: &str = "velvet lymph giddy number token physics poetry unquoted nibs useful \
                          sabotage limits benches lifestyle eden nitrogen anvil fewest avoid \
                          batch vials washing fences goat unquoted";

const BOB_SEED: &str = "peeled mixture ionic radar utopia puddle buying illness nuns gadget \
                        river spout cavernous bounced paradise drunk looking cottage jump \
                        tequila melting went winter adjust spout";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!("{BG_BLUE}{BOLD}{WHITE}                                                              {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}    SIGIL  --  Message Signing Walkthrough                    {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}    Ed25519 + BLAKE3  |  SigV1 signatures                     {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}                                                              {RESET}");
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]================================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!("{CYAN}--------------------------------------------------------------{RESET}");
}

fn subsection(text: &str) {
    println!("{DIM}{CYAN}  >> {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.3} ms]{RESET}");
}

fn verdict(label: &str, good: bool, expected: bool) {
    let (color, word) = if good { (GREEN, "good") } else { (RED, "bad") };
    let mark = if good == expected { "[OK]" } else { "[UNEXPECTED]" };
    println!("  {color}{BOLD}{word:<4}{RESET}  {label}  {DIM}{mark}{RESET}");
    assert_eq!(good, expected, "{label}");
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let demo_start = Instant::now();
    let service = SignatureService::new();

    banner();

    // -----------------------------------------------------------------------
    // Step 1: Wallet restoration
    // -----------------------------------------------------------------------

    section(1, "Restore Wallets From Seed Phrases");
    subsection("Deriving account 0 of each wallet...");

    let t = Instant::now();
    let alice = SeedWallet::restore(Network::Mainnet, ALICE_SEED).expect("alice seed");
    let bob = SeedWallet::restore(Network::Mainnet, BOB_SEED).expect("bob seed");
    let alice_address = alice.address(0).expect("alice address").to_string();
    let bob_address = bob.address(0).expect("bob address").to_string();
    timing("restore x2", t.elapsed());

    println!();
    info("Alice", &alice_address);
    info("Bob  ", &bob_address);

    // -----------------------------------------------------------------------
    // Step 2: Signing and verification
    // -----------------------------------------------------------------------

    section(2, "Alice Signs, a Verifier Checks");
    for message in ["foo", ""] {
        let shown = if message.is_empty() { "(empty)" } else { message };
        subsection(&format!("Message: {shown}"));

        let t = Instant::now();
        let signature = service
            .sign_with(&alice, &IdentitySelector::Index(0), message.as_bytes())
            .expect("alice signs")
            .to_string();
        timing("sign", t.elapsed());
        info("Signature", &signature);

        let msg = message.as_bytes();
        verdict(
            "genuine message, Alice's address",
            service.verify(msg, &alice_address, &signature),
            true,
        );
        verdict(
            "genuine message, Bob's address",
            service.verify(msg, &bob_address, &signature),
            false,
        );
        verdict(
            "different message, Alice's address",
            service.verify(b"different", &alice_address, &signature),
            false,
        );
        verdict(
            "signature with a trailing 'x'",
            service.verify(msg, &alice_address, &format!("{signature}x")),
            false,
        );
        verdict(
            "garbage signature",
            service.verify(msg, &alice_address, "SigV1notreally"),
            false,
        );
    }

    // -----------------------------------------------------------------------
    // Step 3: Watch-only identities
    // -----------------------------------------------------------------------

    section(3, "Watch-Only Identities Cannot Sign");
    let store = InMemoryKeyStore::new();
    store.insert(alice.identity(0).expect("alice identity").into_watch_only());
    match service.sign_with(&store, &IdentitySelector::Index(0), b"foo") {
        Err(SignError::KeyUnavailable { address }) => {
            println!("  {BLUE}{BOLD}KeyUnavailable{RESET}  {DIM}{address}{RESET}");
        }
        other => panic!("expected KeyUnavailable, got {other:?}"),
    }

    alice.close();
    bob.close();

    println!();
    timing("total", demo_start.elapsed());
    println!();
}
