//! # Cryptographic Primitives
//!
//! Everything that touches a key or a digest lives here:
//!
//! - **Keccak-256** for transaction hashes, signing hashes, and addresses.
//! - **secp256k1 ECDSA** for signatures, with RFC 6979 nonces and low-s.
//! - **Public-key recovery** from `(hash, v, r, s)`.
//!
//! Nothing here is hand-rolled. The curve arithmetic is `k256` and the
//! sponge is `tiny-keccak`; this module only fixes the byte layouts the
//! chain expects around them.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::keccak256;
pub use keys::{KeyError, PrivateKey, PublicKey};
pub use signatures::{recover_public_key, sign_hash, SignatureData, SignatureError};
