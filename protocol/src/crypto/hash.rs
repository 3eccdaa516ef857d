//! # Hashing Utilities
//!
//! Keccak-256, the chain's state-transition hash. It is used for signing
//! hashes, transaction hashes, and address derivation.
//!
//! Note that this is the original Keccak submission, *not* the finalised
//! NIST SHA3-256. The two differ only in padding, which is exactly the kind
//! of difference that produces a perfectly valid, perfectly wrong hash.

use tiny_keccak::{Hasher, Keccak};

use crate::config::HASH_LENGTH;

/// Compute the Keccak-256 digest of `data`.
///
/// # Example
///
/// ```
/// use klay_protocol::crypto::keccak256;
///
/// let hash = keccak256(b"");
/// assert_eq!(hash[0], 0xc5);
/// ```
pub fn keccak256(data: &[u8]) -> [u8; HASH_LENGTH] {
    keccak256_concat(&[data])
}

/// Keccak-256 over several slices, without concatenating them first.
///
/// Typed transaction hashes feed the discriminator and the RLP body in
/// separately.
pub fn keccak256_concat(parts: &[&[u8]]) -> [u8; HASH_LENGTH] {
    let mut hasher = Keccak::v256();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; HASH_LENGTH];
    hasher.finalize(&mut output);
    output
}

/// [`keccak256_concat`] rendered as `0x`-prefixed lowercase hex.
pub fn keccak256_hex(parts: &[&[u8]]) -> String {
    format!("0x{}", hex::encode(keccak256_concat(parts)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
