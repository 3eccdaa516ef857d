// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Klay Protocol: Transaction Core
//!
//! Client-side construction and cryptographic envelope of Klaytn-style
//! transactions: the part of an SDK that has to agree with the chain
//! byte-for-byte, or every hash, signature and recovered key downstream
//! quietly diverges.
//!
//! Nothing in here talks to a node. The values a node would normally
//! supply (nonce, gas price, chain id) come in through the [`fill`]
//! collaborator trait, which the caller awaits *before* encoding or
//! signing.
//!
//! ## Architecture
//!
//! - **config**: Type discriminators, sentinel values, and numeric bounds.
//! - **crypto**: Keccak-256, secp256k1 keys, `SignatureData`, recovery.
//! - **keyring**: Single, multiple, and role-based key holders.
//! - **transaction**: Field model, RLP codec, signing/combining engine,
//!   and public-key recovery.
//! - **fill**: Remote-fill collaborator for nonce, gas price, and chain id.
//!
//! ## Quick tour
//!
//! ```rust,no_run
//! use klay_protocol::keyring::Keyring;
//! use klay_protocol::transaction::{address_hex, TransactionFields, TransactionType};
//! use klay_protocol::transaction::signing::sign;
//!
//! let keyring = Keyring::generate();
//! let mut tx = TransactionFields::new(TransactionType::ValueTransferMemo)
//!     .from(address_hex(keyring.address()))
//!     .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
//!     .value(10u64)
//!     .gas(1_000_000u64)
//!     .nonce(0u64)
//!     .gas_price(25_000_000_000u64)
//!     .chain_id(1001u64)
//!     .input("0x68656c6c6f")
//!     .build()
//!     .unwrap();
//!
//! sign(&mut tx, &keyring, None).unwrap();
//! println!("{}", tx.raw_transaction().unwrap());
//! ```

pub mod config;
pub mod crypto;
pub mod fill;
pub mod keyring;
pub mod transaction;
