//! The signing and combining engine.
//!
//! Every operation here is check-then-mutate: hashes are computed and
//! signatures produced before anything on the transaction changes, so a
//! failed call leaves the transaction as it was.
//!
//! Signature lists follow one append rule. A list holding only the empty
//! placeholder is replaced by the incoming signatures; any other list is
//! extended in order, without de-duplication. Incoming placeholders are
//! skipped.

use tracing::{debug, warn};

use super::builder::Transaction;
use super::error::TransactionError;
use super::types::address_hex;
use crate::crypto::signatures::SignatureData;
use crate::keyring::{Keyring, Role};

/// Which signature list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signer {
    /// `signatures`, signed over the sender signing hash.
    Sender,
    /// `feePayerSignatures`, signed over the fee-payer signing hash.
    FeePayer,
}

impl Signer {
    fn role(self) -> Role {
        match self {
            Signer::Sender => Role::TransactionSign,
            Signer::FeePayer => Role::FeePayerSign,
        }
    }

    fn field(self) -> &'static str {
        match self {
            Signer::Sender => "from",
            Signer::FeePayer => "feePayer",
        }
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Signs as the sender with the keyring's `TransactionSign` keys.
///
/// With `index` only that key signs; without it every key signs, in order.
pub fn sign(
    tx: &mut Transaction,
    keyring: &Keyring,
    index: Option<usize>,
) -> Result<(), TransactionError> {
    sign_as(tx, keyring, index, Signer::Sender)
}

/// Signs as the fee payer with the keyring's `FeePayerSign` keys.
///
/// A transaction without a fee payer adopts the keyring's address first.
/// If signing then fails, the fee payer is unset again.
pub fn sign_as_fee_payer(
    tx: &mut Transaction,
    keyring: &Keyring,
    index: Option<usize>,
) -> Result<(), TransactionError> {
    sign_as(tx, keyring, index, Signer::FeePayer)
}

/// [`sign`] or [`sign_as_fee_payer`], selected by `signer`.
pub fn sign_as(
    tx: &mut Transaction,
    keyring: &Keyring,
    index: Option<usize>,
    signer: Signer,
) -> Result<(), TransactionError> {
    let adopted = if signer == Signer::FeePayer {
        tx.require_fee_delegation("fee payer signing")?;
        if tx.fee_payer.is_none() {
            tx.fee_payer = Some(*keyring.address());
            true
        } else {
            false
        }
    } else {
        false
    };

    match produce_signatures(tx, keyring, index, signer) {
        Ok(signatures) => {
            let tx_type = tx.tx_type;
            let target = match signer {
                Signer::Sender => &mut tx.signatures,
                Signer::FeePayer => &mut tx.fee_payer_signatures,
            };
            let added = merge_signatures(target, signatures);
            debug!(
                %tx_type,
                signer = ?signer,
                address = %address_hex(keyring.address()),
                added,
                total = target.len(),
                "signed transaction"
            );
            Ok(())
        }
        Err(err) => {
            if adopted {
                tx.fee_payer = None;
            }
            Err(err)
        }
    }
}

fn produce_signatures(
    tx: &Transaction,
    keyring: &Keyring,
    index: Option<usize>,
    signer: Signer,
) -> Result<Vec<SignatureData>, TransactionError> {
    let expected = match signer {
        Signer::Sender => Some(&tx.from),
        Signer::FeePayer => tx.fee_payer.as_ref(),
    };
    if expected != Some(keyring.address()) {
        return Err(TransactionError::AddressMismatch {
            role: signer.field(),
        });
    }

    let hash = match signer {
        Signer::Sender => tx.sender_signing_hash()?,
        Signer::FeePayer => tx.fee_payer_signing_hash()?,
    };
    // The signing hash above already required a chain id.
    let chain_id = tx
        .chain_id
        .as_ref()
        .ok_or_else(|| TransactionError::undefined("chainId"))?;

    match index {
        Some(i) => Ok(vec![keyring.sign(&hash, chain_id, signer.role(), i)?]),
        None => keyring.sign_all(&hash, chain_id, signer.role()),
    }
}

/// Signs as the sender with a raw private key or a KlaytnWalletKey.
pub fn sign_with_private_key(tx: &mut Transaction, key: &str) -> Result<(), TransactionError> {
    let keyring = Keyring::from_key_str(key)?;
    sign(tx, &keyring, Some(0))
}

/// Signs as the fee payer with a raw private key or a KlaytnWalletKey.
pub fn sign_as_fee_payer_with_private_key(
    tx: &mut Transaction,
    key: &str,
) -> Result<(), TransactionError> {
    let keyring = Keyring::from_key_str(key)?;
    sign_as_fee_payer(tx, &keyring, Some(0))
}

// ---------------------------------------------------------------------------
// Appending
// ---------------------------------------------------------------------------

/// Applies the append rule. Returns how many signatures were added.
pub(crate) fn merge_signatures(
    target: &mut Vec<SignatureData>,
    incoming: impl IntoIterator<Item = SignatureData>,
) -> usize {
    let incoming: Vec<SignatureData> = incoming.into_iter().filter(|s| !s.is_empty()).collect();
    if incoming.is_empty() {
        return 0;
    }
    if target.len() == 1 && target[0].is_empty() {
        target.clear();
    }
    let added = incoming.len();
    target.extend(incoming);
    added
}

/// Appends externally produced signatures to one of the lists.
///
/// Fee-payer signatures need a fee-delegated type and a defined `feePayer`.
pub fn append_signatures(
    tx: &mut Transaction,
    signatures: &[SignatureData],
    signer: Signer,
) -> Result<(), TransactionError> {
    let target = match signer {
        Signer::Sender => &mut tx.signatures,
        Signer::FeePayer => {
            tx.require_fee_delegation("fee payer signatures")?;
            let has_real = signatures.iter().any(|s| !s.is_empty());
            if has_real && tx.fee_payer.is_none() {
                return Err(TransactionError::fee_payer_without_address());
            }
            &mut tx.fee_payer_signatures
        }
    };
    let added = merge_signatures(target, signatures.iter().cloned());
    debug!(signer = ?signer, added, total = target.len(), "appended signatures");
    Ok(())
}

// ---------------------------------------------------------------------------
// Combining
// ---------------------------------------------------------------------------

/// Merges the signatures of raw transactions signed elsewhere into `tx` and
/// returns the merged raw transaction.
///
/// Blobs are processed in order. Each blob is decoded and compared against
/// `tx` before anything is merged; a blob that disagrees on a non-signature
/// field aborts the call with [`TransactionError::IncompatibleCombine`].
/// Blobs merged before the failing one stay merged.
///
/// Unset `nonce`, `gasPrice`, and `feePayer` are adopted from the blob.
pub fn combine_signed_raw_transactions<S: AsRef<str>>(
    tx: &mut Transaction,
    raw_transactions: &[S],
) -> Result<String, TransactionError> {
    for (position, raw) in raw_transactions.iter().enumerate() {
        let decoded = Transaction::decode_hex(raw.as_ref())?;

        if let Err(field) = check_compatible(tx, &decoded) {
            warn!(position, field, tx_type = %tx.tx_type, "rejected raw transaction in combine");
            return Err(TransactionError::IncompatibleCombine { field });
        }

        if tx.nonce.is_none() {
            tx.nonce = decoded.nonce;
        }
        if tx.gas_price.is_none() {
            tx.gas_price = decoded.gas_price;
        }
        if tx.fee_payer.is_none() {
            tx.fee_payer = decoded.fee_payer;
        }

        let added = merge_signatures(&mut tx.signatures, decoded.signatures);
        let added_fee_payer = if tx.tx_type.is_fee_delegated() {
            merge_signatures(&mut tx.fee_payer_signatures, decoded.fee_payer_signatures)
        } else {
            0
        };
        debug!(position, added, added_fee_payer, "combined raw transaction");
    }

    tx.raw_transaction()
}

/// Returns the first non-signature field on which `other` contradicts `tx`.
fn check_compatible(tx: &Transaction, other: &Transaction) -> Result<(), &'static str> {
    if tx.tx_type != other.tx_type {
        return Err("type");
    }
    if tx.from != other.from {
        return Err("from");
    }
    if tx.to != other.to {
        return Err("to");
    }
    if tx.value != other.value {
        return Err("value");
    }
    if tx.gas != other.gas {
        return Err("gas");
    }
    if tx.input != other.input {
        return Err("input");
    }
    if tx.fee_ratio != other.fee_ratio {
        return Err("feeRatio");
    }
    if conflicts(tx.nonce.as_ref(), other.nonce.as_ref()) {
        return Err("nonce");
    }
    if conflicts(tx.gas_price.as_ref(), other.gas_price.as_ref()) {
        return Err("gasPrice");
    }
    if conflicts(tx.fee_payer.as_ref(), other.fee_payer.as_ref()) {
        return Err("feePayer");
    }
    Ok(())
}

/// Both sides set and unequal.
fn conflicts<T: PartialEq>(local: Option<&T>, incoming: Option<&T>) -> bool {
    matches!((local, incoming), (Some(a), Some(b)) if a != b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
