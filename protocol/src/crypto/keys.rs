//! # Key Management
//!
//! secp256k1 private and public keys, and account address derivation.
//!
//! A [`PrivateKey`] signs 32-byte prehashes deterministically (RFC 6979) and
//! always returns a low-s signature with its recovery id. A [`PublicKey`] is
//! the 64-byte uncompressed point `x || y` without the SEC1 `0x04` tag,
//! which is the form both address derivation and recovery output use.
//!
//! Key bytes are never logged, and `Debug` never prints them.

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::hash::keccak256;
use crate::config::{HASH_LENGTH, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH};
use crate::transaction::types::{address_hex, hex_to_bytes, strip_hex_prefix, Address};

/// Errors that can occur during key operations.
///
/// Messages never include key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid private key: expected 32 bytes of hex forming a valid secp256k1 scalar")]
    InvalidPrivateKey,

    #[error("invalid public key: not a point on secp256k1")]
    InvalidPublicKey,

    #[error("invalid KlaytnWalletKey: {reason}")]
    InvalidWalletKey { reason: String },

    #[error("signing failed")]
    SigningFailed,
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 signing key.
///
/// Deliberately not `Serialize`; export goes through [`PrivateKey::to_hex`].
///
/// # Examples
///
/// ```
/// use klay_protocol::crypto::keys::PrivateKey;
/// use klay_protocol::transaction::address_hex;
///
/// let key = PrivateKey::from_hex(
///     "0x45a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8",
/// ).unwrap();
/// assert_eq!(
///     address_hex(&key.address()),
///     "0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b",
/// );
/// ```
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Generates a fresh key from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Builds a key from 32 raw bytes. Zero and values `>= n` are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidPrivateKey);
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Parses a 64-character hex key, `0x` prefix optional.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let body = strip_hex_prefix(s.trim());
        if body.len() != PRIVATE_KEY_LENGTH * 2 {
            return Err(KeyError::InvalidPrivateKey);
        }
        let bytes = hex::decode(body).map_err(|_| KeyError::InvalidPrivateKey)?;
        Self::from_bytes(&bytes)
    }

    /// `0x`-prefixed hex of the secret scalar. Handle with care.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signing_key.to_bytes()))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// The address this key controls when used as a coupled key.
    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// Signs a 32-byte prehash. Returns `(r || s, recovery_id)` with low s.
    pub fn sign_prehash(&self, hash: &[u8; HASH_LENGTH]) -> Result<([u8; 64], u8), KeyError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash)
            .map_err(|_| KeyError::SigningFailed)?;

        // k256 already produces low-s; normalising again is a no-op then.
        let (signature, recovery_id) = match signature.normalize_s() {
            Some(normalized) => (normalized, recovery_id.to_byte() ^ 1),
            None => (signature, recovery_id.to_byte()),
        };

        let mut out = [0u8; 64];
        out.copy_from_slice(&signature.to_bytes());
        Ok((out, recovery_id))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(address={})", address_hex(&self.address()))
    }
}

impl PartialEq for PrivateKey {
    /// Compared by public key, never by secret bytes.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for PrivateKey {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// An uncompressed secp256k1 public key, `x || y` (64 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        // Uncompressed SEC1 is 0x04 || x || y.
        bytes.copy_from_slice(&point.as_bytes()[1..]);
        Self { bytes }
    }

    /// Accepts 64-byte `x || y`, 65-byte SEC1 uncompressed, or 33-byte
    /// compressed keys. The point is validated.
    pub fn from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let verifying_key = match slice.len() {
            PUBLIC_KEY_LENGTH => {
                let mut sec1 = Vec::with_capacity(PUBLIC_KEY_LENGTH + 1);
                sec1.push(0x04);
                sec1.extend_from_slice(slice);
                VerifyingKey::from_sec1_bytes(&sec1)
            }
            _ => VerifyingKey::from_sec1_bytes(slice),
        }
        .map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self::from_verifying_key(&verifying_key))
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex_to_bytes(s).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// `keccak256(x || y)[12..]`.
    pub fn address(&self) -> Address {
        Address::from_slice(&keccak256(&self.bytes)[12..])
    }

    /// `0x`-prefixed hex of `x || y`.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
