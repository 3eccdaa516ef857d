//! Public-key recovery for both signer roles.
//!
//! Recovery regenerates the role's signing hash from the transaction as it
//! stands, so it needs `chainId` even for a decoded transaction (the wire
//! form does not carry it). Keys come back in signature order; a caller
//! checking a multisig account matches them against its on-chain key set.

use tracing::trace;

use super::builder::Transaction;
use super::error::TransactionError;
use super::types::address_hex;
use crate::config::HASH_LENGTH;
use crate::crypto::keys::PublicKey;
use crate::crypto::signatures::{recover_public_key, SignatureData};

/// Recovers the key behind every sender signature, in list order.
pub fn recover_public_keys(tx: &Transaction) -> Result<Vec<PublicKey>, TransactionError> {
    let hash = tx.sender_signing_hash()?;
    recover_all(tx, &hash, &tx.signatures)
}

/// Recovers the key behind every fee-payer signature, in list order.
pub fn recover_fee_payer_public_keys(
    tx: &Transaction,
) -> Result<Vec<PublicKey>, TransactionError> {
    let hash = tx.fee_payer_signing_hash()?;
    recover_all(tx, &hash, &tx.fee_payer_signatures)
}

fn recover_all(
    tx: &Transaction,
    hash: &[u8; HASH_LENGTH],
    signatures: &[SignatureData],
) -> Result<Vec<PublicKey>, TransactionError> {
    let chain_id = tx
        .chain_id
        .as_ref()
        .ok_or_else(|| TransactionError::undefined("chainId"))?;

    signatures
        .iter()
        .map(|signature| -> Result<PublicKey, TransactionError> {
            let key = recover_public_key(hash, signature, chain_id)?;
            trace!(address = %address_hex(&key.address()), "recovered signer");
            Ok(key)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
