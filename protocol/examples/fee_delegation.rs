//! Terminal walkthrough of a fee-delegated, multisig value transfer.
//!
//! Three co-signers each sign a copy of the same raw transaction, the
//! copies are combined, a fee payer signs last, and every signer is
//! recovered from the final raw transaction.
//!
//! Run with:
//!   cargo run --example fee_delegation

use std::time::Instant;

use klay_protocol::config::CHAIN_ID_TESTNET;
use klay_protocol::crypto::keys::PrivateKey;
use klay_protocol::keyring::Keyring;
use klay_protocol::transaction::signing::{
    combine_signed_raw_transactions, sign, sign_as_fee_payer,
};
use klay_protocol::transaction::verification::{
    recover_fee_payer_public_keys, recover_public_keys,
};
use klay_protocol::transaction::types::U256;
use klay_protocol::transaction::{address_hex, Transaction, TransactionFields, TransactionType};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    let bar = "=".repeat(48);
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]{bar}{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

fn short(hex: &str) -> String {
    if hex.len() <= 24 {
        return hex.to_string();
    }
    format!("{}...{}", &hex[..14], &hex[hex.len() - 8..])
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    section(1, "Accounts");
    let keys: Vec<PrivateKey> = (0..3).map(|_| PrivateKey::generate()).collect();
    let account = PrivateKey::generate().address();
    let multisig = Keyring::multiple(account, keys.clone()).expect("non-empty key list");
    let fee_payer = Keyring::generate();
    info("sender (3 keys)", &address_hex(&account));
    info("fee payer", &address_hex(fee_payer.address()));

    section(2, "Build");
    let mut tx = TransactionFields::new(TransactionType::FeeDelegatedValueTransferMemoWithRatio)
        .from(address_hex(&account))
        .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
        .value(1_000_000_000_000_000_000u128)
        .gas(100_000u64)
        .nonce(0u64)
        .gas_price(25_000_000_000u64)
        .chain_id(CHAIN_ID_TESTNET)
        .input("0x6b6c6179")
        .fee_ratio(30u8)
        .build()
        .expect("valid fields");
    let unsigned = tx.raw_transaction().expect("encodable");
    info("unsigned", &short(&unsigned));

    section(3, "Co-signers sign their own copies");
    let t = Instant::now();
    let mut blobs = Vec::new();
    for index in 0..keys.len() {
        let mut copy = Transaction::decode_hex(&unsigned).expect("decodable");
        copy.set_chain_id_if_missing(U256::from(CHAIN_ID_TESTNET));
        sign(&mut copy, &multisig, Some(index)).expect("sign");
        blobs.push(copy.raw_transaction().expect("encodable"));
    }
    timing("sign x3", t.elapsed());

    section(4, "Combine");
    let combined = combine_signed_raw_transactions(&mut tx, &blobs).expect("compatible blobs");
    info("combined", &short(&combined));
    success(&format!("{} sender signatures", tx.signatures().len()));

    section(5, "Fee payer signs");
    sign_as_fee_payer(&mut tx, &fee_payer, None).expect("fee payer sign");
    info("raw", &short(&tx.raw_transaction().expect("encodable")));
    info("transactionHash", &tx.transaction_hash().expect("hash"));
    info("senderTxHash", &tx.sender_tx_hash().expect("hash"));

    section(6, "Recover");
    let t = Instant::now();
    let senders = recover_public_keys(&tx).expect("recover senders");
    let payers = recover_fee_payer_public_keys(&tx).expect("recover fee payer");
    timing("recover x4", t.elapsed());
    for (key, recovered) in keys.iter().zip(&senders) {
        assert_eq!(key.public_key(), *recovered);
    }
    assert_eq!(payers[0].address(), *fee_payer.address());
    success("every signer recovered from the raw transaction");
    println!();
}
