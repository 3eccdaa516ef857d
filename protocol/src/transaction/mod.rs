//! # Transaction Module
//!
//! Field model, canonical codec, signing engine, and recovery for the
//! value-transfer transaction family.
//!
//! ## Architecture
//!
//! ```text
//! types.rs          TransactionType, NumberInput, address/quantity parsing
//! rlp.rs            List encoder/decoder over alloy-rlp
//! builder.rs        TransactionFields config struct, validated Transaction
//! encoding.rs       Wire / signing / fee-payer layouts, hashes, decode
//! signing.rs        sign, sign_as_fee_payer, append, combine
//! verification.rs   Public-key recovery for both signer roles
//! error.rs          TransactionError
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: fill a [`TransactionFields`] and call `build`.
//! 2. **Fill**: await [`crate::fill::fill_transaction`] for anything still unset.
//! 3. **Sign**: senders via [`signing::sign`], then fee payers via
//!    [`signing::sign_as_fee_payer`], in any number of rounds.
//! 4. **Combine**: merge signatures collected elsewhere with
//!    [`signing::combine_signed_raw_transactions`].
//! 5. **Submit**: [`Transaction::raw_transaction`].
//!
//! Signature lists only grow. Scalar fields change only while unset.

pub mod builder;
pub mod encoding;
pub mod error;
pub mod rlp;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{Transaction, TransactionFields};
pub use error::TransactionError;
pub use signing::{
    append_signatures, combine_signed_raw_transactions, sign, sign_as_fee_payer, Signer,
};
pub use types::{
    address_hex, parse_address, quantity_hex, Address, NumberInput, TransactionType, U256,
};
pub use verification::{recover_fee_payer_public_keys, recover_public_keys};
