//! # Signatures
//!
//! [`SignatureData`] is one ECDSA signature as it travels on the wire:
//! `(v, r, s)` with a replay-protected `v = recovery_id + 35 + 2 * chainId`.
//!
//! The distinguished [`SignatureData::empty`] value `(0x01, 0, 0)` marks an
//! unsigned slot. It is a placeholder, never a signature, and recovery
//! refuses it.

use alloy_primitives::{B256, U256};
use alloy_rlp::{BufMut, Decodable, Encodable, Header};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::keys::{KeyError, PrivateKey, PublicKey};
use crate::config::{CHAIN_ID_V_OFFSET, EMPTY_SIGNATURE_V, HASH_LENGTH, SIGNATURE_COMPONENT_LENGTH};
use crate::transaction::rlp::{ListDecoder, ListEncoder, RlpError};
use crate::transaction::types::{bytes_to_hex, hex_to_bytes, quantity_hex};

/// Errors from building or recovering a signature.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("{component} is {len} bytes, at most 32 allowed")]
    ComponentTooLong { component: &'static str, len: usize },

    #[error("{component} is not valid hex")]
    InvalidHex { component: &'static str },

    #[error("v = {v} does not encode a recovery id for chain id {chain_id}")]
    InvalidRecoveryId { v: String, chain_id: String },

    #[error("the empty signature placeholder cannot be recovered")]
    EmptySignature,

    #[error("r and s do not form a valid signature for this hash")]
    InvalidComponents,

    #[error("chain id {0} is too large to derive v")]
    ChainIdTooLarge(String),
}

// ---------------------------------------------------------------------------
// SignatureData
// ---------------------------------------------------------------------------

/// One `(v, r, s)` triplet.
///
/// `r` and `s` are 32-byte big-endian integers. On the wire `v` is a
/// minimal integer and a zero `r` or `s` is the empty string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SignatureData {
    v: U256,
    r: B256,
    s: B256,
}

impl SignatureData {
    /// Builds a signature from big-endian byte strings.
    ///
    /// Leading zeros are ignored. `r` and `s` are left-padded to 32 bytes;
    /// any component longer than 32 significant bytes is rejected.
    pub fn new(v: &[u8], r: &[u8], s: &[u8]) -> Result<Self, SignatureError> {
        Ok(Self {
            v: U256::from_be_bytes(pad_component("v", v)?),
            r: B256::from(pad_component("r", r)?),
            s: B256::from(pad_component("s", s)?),
        })
    }

    /// Builds a signature from three hex strings (`0x` optional).
    pub fn from_hex(v: &str, r: &str, s: &str) -> Result<Self, SignatureError> {
        let v = hex_to_bytes(v).map_err(|_| SignatureError::InvalidHex { component: "v" })?;
        let r = hex_to_bytes(r).map_err(|_| SignatureError::InvalidHex { component: "r" })?;
        let s = hex_to_bytes(s).map_err(|_| SignatureError::InvalidHex { component: "s" })?;
        Self::new(&v, &r, &s)
    }

    /// The "not yet signed" placeholder: `v = 0x01`, `r = s = 0`.
    pub fn empty() -> Self {
        Self {
            v: U256::from(EMPTY_SIGNATURE_V),
            r: B256::ZERO,
            s: B256::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    pub fn v(&self) -> U256 {
        self.v
    }

    pub fn r(&self) -> &B256 {
        &self.r
    }

    pub fn s(&self) -> &B256 {
        &self.s
    }

    /// `v` as `u64`, if it fits.
    pub fn v_u64(&self) -> Option<u64> {
        u64::try_from(self.v).ok()
    }

    /// `r` as it appears on the wire: 32 bytes, or empty when zero.
    pub(crate) fn r_wire(&self) -> &[u8] {
        wire_component(&self.r)
    }

    /// `s` as it appears on the wire: 32 bytes, or empty when zero.
    pub(crate) fn s_wire(&self) -> &[u8] {
        wire_component(&self.s)
    }

    /// `[v, r, s]` as `0x` hex strings. `v` is padded to whole bytes
    /// (`0x0fea`), zero components render as `0x`.
    pub fn to_hex_triplet(&self) -> [String; 3] {
        let v = self.v.to_be_bytes::<32>();
        let v_start = v.iter().position(|&b| b != 0).unwrap_or(v.len());
        [
            bytes_to_hex(&v[v_start..]),
            bytes_to_hex(self.r_wire()),
            bytes_to_hex(self.s_wire()),
        ]
    }

    fn wire_list(&self) -> ListEncoder {
        let mut list = ListEncoder::new();
        list.item(&self.v).bytes(self.r_wire()).bytes(self.s_wire());
        list
    }
}

fn pad_component(
    component: &'static str,
    bytes: &[u8],
) -> Result<[u8; SIGNATURE_COMPONENT_LENGTH], SignatureError> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start..];
    if significant.len() > SIGNATURE_COMPONENT_LENGTH {
        return Err(SignatureError::ComponentTooLong {
            component,
            len: significant.len(),
        });
    }
    let mut out = [0u8; SIGNATURE_COMPONENT_LENGTH];
    out[SIGNATURE_COMPONENT_LENGTH - significant.len()..].copy_from_slice(significant);
    Ok(out)
}

fn wire_component(component: &B256) -> &[u8] {
    if component.is_zero() {
        &[]
    } else {
        component.as_slice()
    }
}

impl Default for SignatureData {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for SignatureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [v, r, s] = self.to_hex_triplet();
        write!(f, "SignatureData {{ v: {v}, r: {r}, s: {s} }}")
    }
}

impl fmt::Display for SignatureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [v, r, s] = self.to_hex_triplet();
        write!(f, "[{v}, {r}, {s}]")
    }
}

impl Serialize for SignatureData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_hex_triplet().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SignatureData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [v, r, s] = <[String; 3]>::deserialize(deserializer)?;
        Self::from_hex(&v, &r, &s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// RLP
// ---------------------------------------------------------------------------

/// `[v, r, s]`, with the empty placeholder encoding as `c3 01 80 80`.
impl Encodable for SignatureData {
    fn encode(&self, out: &mut dyn BufMut) {
        out.put_slice(&self.wire_list().finish());
    }

    fn length(&self) -> usize {
        let payload_length = self.v.length() + self.r_wire().length() + self.s_wire().length();
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl Decodable for SignatureData {
    fn decode(buf: &mut &[u8]) -> Result<Self, RlpError> {
        let mut fields = ListDecoder::open(buf)?;
        let v = fields.next::<U256>()?;
        let r = fields.next_bytes()?;
        let s = fields.next_bytes()?;
        fields.finish()?;

        let too_long = |_| RlpError::Custom("signature component exceeds 32 bytes");
        Ok(Self {
            v,
            r: B256::from(pad_component("r", r).map_err(too_long)?),
            s: B256::from(pad_component("s", s).map_err(too_long)?),
        })
    }
}

// ---------------------------------------------------------------------------
// Signing & Recovery
// ---------------------------------------------------------------------------

/// `35 + 2 * chainId`, or `None` past 256 bits.
fn v_base(chain_id: &U256) -> Option<U256> {
    chain_id
        .checked_mul(U256::from(2u8))?
        .checked_add(U256::from(CHAIN_ID_V_OFFSET))
}

/// Signs `hash` and encodes the recovery id into `v` for `chain_id`.
pub fn sign_hash(
    key: &PrivateKey,
    hash: &[u8; HASH_LENGTH],
    chain_id: &U256,
) -> Result<SignatureData, KeyError> {
    let base = v_base(chain_id).ok_or(KeyError::SigningFailed)?;
    let (rs, recovery_id) = key.sign_prehash(hash)?;
    let v = base
        .checked_add(U256::from(recovery_id))
        .ok_or(KeyError::SigningFailed)?;

    Ok(SignatureData {
        v,
        r: B256::from_slice(&rs[..SIGNATURE_COMPONENT_LENGTH]),
        s: B256::from_slice(&rs[SIGNATURE_COMPONENT_LENGTH..]),
    })
}

/// Extracts the 0/1 recovery id from `v`.
///
/// `v` is either a raw recovery id (`0` or `1`) or the replay-protected
/// form `recovery_id + 35 + 2 * chainId`. This is stricter than taking
/// `(v - 35 - 2 * chainId) mod 2`: a `v` minted for another chain id is
/// rejected, so recovering with the wrong chain id surfaces as
/// `MalformedSignature` rather than as a wrong public key.
pub fn recovery_id(v: &U256, chain_id: &U256) -> Result<u8, SignatureError> {
    if v.is_zero() {
        return Ok(0);
    }
    if *v == U256::from(1u8) {
        return Ok(1);
    }

    let base =
        v_base(chain_id).ok_or_else(|| SignatureError::ChainIdTooLarge(quantity_hex(chain_id)))?;
    match v.checked_sub(base) {
        Some(id) if id.is_zero() => Ok(0),
        Some(id) if id == U256::from(1u8) => Ok(1),
        _ => Err(SignatureError::InvalidRecoveryId {
            v: quantity_hex(v),
            chain_id: quantity_hex(chain_id),
        }),
    }
}

/// Recovers the public key that produced `signature` over `hash`.
pub fn recover_public_key(
    hash: &[u8; HASH_LENGTH],
    signature: &SignatureData,
    chain_id: &U256,
) -> Result<PublicKey, SignatureError> {
    if signature.is_empty() {
        return Err(SignatureError::EmptySignature);
    }
    let mut recid = recovery_id(&signature.v, chain_id)?;

    let mut sig = Signature::from_scalars(
        *k256::FieldBytes::from_slice(signature.r.as_slice()),
        *k256::FieldBytes::from_slice(signature.s.as_slice()),
    )
    .map_err(|_| SignatureError::InvalidComponents)?;
    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
        recid ^= 1;
    }

    let recid = RecoveryId::from_byte(recid).ok_or(SignatureError::InvalidComponents)?;
    let key = VerifyingKey::recover_from_prehash(hash, &sig, recid)
        .map_err(|_| SignatureError::InvalidComponents)?;
    Ok(PublicKey::from_verifying_key(&key))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
