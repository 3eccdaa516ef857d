//! Core value types for transactions.
//!
//! The transaction type discriminator, parsing and canonical rendering for
//! [`Address`] and [`U256`], and [`NumberInput`], which is how callers hand
//! numbers to the builder (native integer or hex string).

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::error::TransactionError;
use crate::config::{
    ADDRESS_LENGTH, TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER,
    TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_MEMO,
    TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO,
    TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO, TX_TYPE_VALUE_TRANSFER,
    TX_TYPE_VALUE_TRANSFER_MEMO, UNSET_HEX,
};

// ---------------------------------------------------------------------------
// Hex helpers
// ---------------------------------------------------------------------------

/// Strips a leading `0x`/`0X`, if any.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decodes hex with or without prefix. Odd-length input is left-padded.
pub(crate) fn hex_to_bytes(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let body = strip_hex_prefix(s);
    if body.len() % 2 == 1 {
        hex::decode(format!("0{body}"))
    } else {
        hex::decode(body)
    }
}

/// `0x`-prefixed lowercase hex.
pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The closed set of transaction layouts this core can build and decode.
///
/// Each variant fixes the leading discriminator byte, the type-specific
/// fields that follow `from`, and whether a fee payer co-signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "TxTypeValueTransfer")]
    ValueTransfer,
    #[serde(rename = "TxTypeFeeDelegatedValueTransfer")]
    FeeDelegatedValueTransfer,
    #[serde(rename = "TxTypeFeeDelegatedValueTransferWithRatio")]
    FeeDelegatedValueTransferWithRatio,
    #[serde(rename = "TxTypeValueTransferMemo")]
    ValueTransferMemo,
    #[serde(rename = "TxTypeFeeDelegatedValueTransferMemo")]
    FeeDelegatedValueTransferMemo,
    #[serde(rename = "TxTypeFeeDelegatedValueTransferMemoWithRatio")]
    FeeDelegatedValueTransferMemoWithRatio,
}

impl TransactionType {
    /// Every supported type, in discriminator order.
    pub const ALL: [TransactionType; 6] = [
        Self::ValueTransfer,
        Self::FeeDelegatedValueTransfer,
        Self::FeeDelegatedValueTransferWithRatio,
        Self::ValueTransferMemo,
        Self::FeeDelegatedValueTransferMemo,
        Self::FeeDelegatedValueTransferMemoWithRatio,
    ];

    /// The byte prefixed to every encoding of this type.
    pub fn discriminator(self) -> u8 {
        match self {
            Self::ValueTransfer => TX_TYPE_VALUE_TRANSFER,
            Self::FeeDelegatedValueTransfer => TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER,
            Self::FeeDelegatedValueTransferWithRatio => {
                TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO
            }
            Self::ValueTransferMemo => TX_TYPE_VALUE_TRANSFER_MEMO,
            Self::FeeDelegatedValueTransferMemo => TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_MEMO,
            Self::FeeDelegatedValueTransferMemoWithRatio => {
                TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO
            }
        }
    }

    /// Inverse of [`discriminator`](Self::discriminator).
    pub fn from_discriminator(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.discriminator() == byte)
    }

    /// Whether the wire encoding carries `feePayer` and its signatures.
    pub fn is_fee_delegated(self) -> bool {
        !matches!(self, Self::ValueTransfer | Self::ValueTransferMemo)
    }

    /// Whether `input` (the memo) follows `from`.
    pub fn has_input(self) -> bool {
        matches!(
            self,
            Self::ValueTransferMemo
                | Self::FeeDelegatedValueTransferMemo
                | Self::FeeDelegatedValueTransferMemoWithRatio
        )
    }

    /// Whether `feeRatio` follows `from` (after `input`, if both exist).
    pub fn has_fee_ratio(self) -> bool {
        matches!(
            self,
            Self::FeeDelegatedValueTransferWithRatio | Self::FeeDelegatedValueTransferMemoWithRatio
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ValueTransfer => "TxTypeValueTransfer",
            Self::FeeDelegatedValueTransfer => "TxTypeFeeDelegatedValueTransfer",
            Self::FeeDelegatedValueTransferWithRatio => "TxTypeFeeDelegatedValueTransferWithRatio",
            Self::ValueTransferMemo => "TxTypeValueTransferMemo",
            Self::FeeDelegatedValueTransferMemo => "TxTypeFeeDelegatedValueTransferMemo",
            Self::FeeDelegatedValueTransferMemoWithRatio => {
                "TxTypeFeeDelegatedValueTransferMemoWithRatio"
            }
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Addresses & quantities
// ---------------------------------------------------------------------------

/// Account addresses and 256-bit numeric fields use the `alloy` primitives.
///
/// `Display` on [`Address`] is EIP-55 checksummed; use [`address_hex`] where
/// the canonical lowercase form is wanted.
pub use alloy_primitives::{Address, U256};

/// Parses a 20-byte hex address, reporting failures against `field`.
///
/// Parsing is case-insensitive and does not enforce a checksum.
pub fn parse_address(field: &'static str, s: &str) -> Result<Address, TransactionError> {
    let body = strip_hex_prefix(s.trim());
    if body.len() != ADDRESS_LENGTH * 2 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TransactionError::invalid(field, format!("Invalid address. : {s}")));
    }
    let bytes = hex::decode(body)
        .map_err(|e| TransactionError::invalid(field, format!("Invalid address. : {e}")))?;
    Ok(Address::from_slice(&bytes))
}

/// `0x`-prefixed lowercase hex of `address`.
pub fn address_hex(address: &Address) -> String {
    bytes_to_hex(address.as_slice())
}

/// Parses a non-negative hex integer (`0x` prefix optional) for `field`.
pub fn parse_quantity(field: &'static str, s: &str) -> Result<U256, TransactionError> {
    let body = strip_hex_prefix(s.trim());
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TransactionError::invalid(field, format!("Invalid {field}. : {s}")));
    }
    U256::from_str_radix(body, 16)
        .map_err(|_| TransactionError::invalid(field, format!("{field} exceeds 256 bits : {s}")))
}

/// Canonical hex of a quantity: `0x0`, `0x4d2`, never `0x04d2`.
pub fn quantity_hex(value: &U256) -> String {
    format!("{value:#x}")
}

// ---------------------------------------------------------------------------
// NumberInput
// ---------------------------------------------------------------------------

/// A number as a caller supplies it: a native integer or a hex string.
///
/// Both forms resolve to the same [`U256`], so `NumberInput::from(1234u64)`
/// and `NumberInput::from("0x4d2")` build identical transactions. The string
/// `"0x"` resolves to "unset".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberInput {
    Integer(u128),
    Text(String),
}

impl NumberInput {
    /// Resolves to a quantity, or `None` for the unset literal `0x`.
    pub fn resolve(&self, field: &'static str) -> Result<Option<U256>, TransactionError> {
        match self {
            Self::Integer(n) => Ok(Some(U256::from(*n))),
            Self::Text(s) if s.trim() == UNSET_HEX => Ok(None),
            Self::Text(s) => parse_quantity(field, s).map(Some),
        }
    }
}

impl From<u128> for NumberInput {
    fn from(value: u128) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for NumberInput {
    fn from(value: u64) -> Self {
        Self::Integer(value as u128)
    }
}

impl From<u32> for NumberInput {
    fn from(value: u32) -> Self {
        Self::Integer(value as u128)
    }
}

impl From<u8> for NumberInput {
    fn from(value: u8) -> Self {
        Self::Integer(value as u128)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NumberInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<U256> for NumberInput {
    fn from(value: U256) -> Self {
        Self::Text(quantity_hex(&value))
    }
}

impl From<&U256> for NumberInput {
    fn from(value: &U256) -> Self {
        Self::Text(quantity_hex(value))
    }
}

impl Serialize for NumberInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(n) => serializer.serialize_u128(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for NumberInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumberVisitor;

        impl<'de> Visitor<'de> for NumberVisitor {
            type Value = NumberInput;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or a hex string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NumberInput, E> {
                Ok(NumberInput::Integer(v as u128))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<NumberInput, E> {
                Ok(NumberInput::Integer(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NumberInput, E> {
                // Negative numbers survive deserialisation so that `build`
                // reports them against the right field.
                match u64::try_from(v) {
                    Ok(n) => Ok(NumberInput::Integer(n as u128)),
                    Err(_) => Ok(NumberInput::Text(v.to_string())),
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NumberInput, E> {
                Ok(NumberInput::Text(v.to_string()))
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
