//! Transaction construction.
//!
//! [`TransactionFields`] is a plain configuration struct: every field is
//! optional and nothing is checked while it is being filled in. A single
//! [`TransactionFields::build`] call validates everything at once and either
//! returns a [`Transaction`] or the first violation found. A half-valid
//! `Transaction` never exists.
//!
//! The fluent setters are sugar over the public fields, so both styles work:
//!
//! ```rust,no_run
//! use klay_protocol::transaction::{TransactionFields, TransactionType};
//!
//! let tx = TransactionFields::new(TransactionType::FeeDelegatedValueTransferWithRatio)
//!     .from("0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b")
//!     .to("0x7b65b75d204abed71587c9e519a89277766ee1d0")
//!     .value("0xa")
//!     .gas(1_000_000u64)
//!     .fee_ratio(30u8)
//!     .build()
//!     .unwrap();
//! assert!(tx.nonce().is_none());
//! ```

use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use super::types::{
    address_hex, bytes_to_hex, hex_to_bytes, parse_address, quantity_hex, strip_hex_prefix,
    Address, NumberInput, TransactionType, U256,
};
use crate::config::{is_valid_fee_ratio, MAX_FEE_RATIO, MIN_FEE_RATIO, UNSET_HEX};
use crate::crypto::signatures::SignatureData;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A validated transaction of one of the value-transfer types.
///
/// `nonce`, `gas_price`, and `chain_id` may still be unset: they are filled
/// later, by the caller or through [`crate::fill`]. Encoding fails until the
/// ones it needs are present.
///
/// Signature lists are never empty. An unsigned list holds exactly one
/// [`SignatureData::empty`] placeholder, and the placeholder never sits next
/// to a real signature. Non-fee-delegated types keep `fee_payer` unset and
/// `fee_payer_signatures` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "type")]
    pub(crate) tx_type: TransactionType,
    #[serde(serialize_with = "serialize_address")]
    pub(crate) from: Address,
    #[serde(serialize_with = "serialize_address")]
    pub(crate) to: Address,
    pub(crate) value: U256,
    pub(crate) gas: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) nonce: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) gas_price: Option<U256>,
    #[serde(rename = "chainId", skip_serializing_if = "Option::is_none")]
    pub(crate) chain_id: Option<U256>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_input"
    )]
    pub(crate) input: Option<Vec<u8>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_fee_ratio"
    )]
    pub(crate) fee_ratio: Option<u8>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_fee_payer"
    )]
    pub(crate) fee_payer: Option<Address>,
    pub(crate) signatures: Vec<SignatureData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) fee_payer_signatures: Vec<SignatureData>,
}

fn serialize_address<S: serde::Serializer>(address: &Address, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&address_hex(address))
}

fn serialize_fee_payer<S: serde::Serializer>(
    fee_payer: &Option<Address>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match fee_payer {
        Some(address) => serialize_address(address, s),
        None => s.serialize_none(),
    }
}

fn serialize_input<S: serde::Serializer>(input: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
    match input {
        Some(bytes) => s.serialize_str(&bytes_to_hex(bytes)),
        None => s.serialize_none(),
    }
}

fn serialize_fee_ratio<S: serde::Serializer>(ratio: &Option<u8>, s: S) -> Result<S::Ok, S::Error> {
    match ratio {
        Some(r) => s.serialize_str(&quantity_hex(&U256::from(*r))),
        None => s.serialize_none(),
    }
}

impl Transaction {
    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    pub fn from(&self) -> &Address {
        &self.from
    }

    pub fn to(&self) -> &Address {
        &self.to
    }

    pub fn value(&self) -> &U256 {
        &self.value
    }

    pub fn gas(&self) -> &U256 {
        &self.gas
    }

    pub fn nonce(&self) -> Option<&U256> {
        self.nonce.as_ref()
    }

    pub fn gas_price(&self) -> Option<&U256> {
        self.gas_price.as_ref()
    }

    pub fn chain_id(&self) -> Option<&U256> {
        self.chain_id.as_ref()
    }

    /// The memo, for memo types.
    pub fn input(&self) -> Option<&[u8]> {
        self.input.as_deref()
    }

    /// Percentage of the fee the fee payer covers, for ratio types.
    pub fn fee_ratio(&self) -> Option<u8> {
        self.fee_ratio
    }

    pub fn fee_payer(&self) -> Option<&Address> {
        self.fee_payer.as_ref()
    }

    pub fn signatures(&self) -> &[SignatureData] {
        &self.signatures
    }

    pub fn fee_payer_signatures(&self) -> &[SignatureData] {
        &self.fee_payer_signatures
    }

    /// Sets the nonce if it is still unset. Returns whether it was set.
    pub fn set_nonce_if_missing(&mut self, nonce: U256) -> bool {
        fill_missing(&mut self.nonce, nonce)
    }

    /// Sets the gas price if it is still unset.
    pub fn set_gas_price_if_missing(&mut self, gas_price: U256) -> bool {
        fill_missing(&mut self.gas_price, gas_price)
    }

    /// Sets the chain id if it is still unset.
    pub fn set_chain_id_if_missing(&mut self, chain_id: U256) -> bool {
        fill_missing(&mut self.chain_id, chain_id)
    }

    /// Whether at least one real sender signature is present.
    pub fn is_signed(&self) -> bool {
        self.signatures.iter().any(|s| !s.is_empty())
    }

    /// Whether at least one real fee-payer signature is present.
    pub fn is_fee_payer_signed(&self) -> bool {
        self.fee_payer_signatures.iter().any(|s| !s.is_empty())
    }

    /// Errors unless this is a fee-delegated type.
    pub(crate) fn require_fee_delegation(
        &self,
        operation: &'static str,
    ) -> Result<(), TransactionError> {
        if self.tx_type.is_fee_delegated() {
            Ok(())
        } else {
            Err(TransactionError::Unsupported {
                tx_type: self.tx_type.to_string(),
                operation,
            })
        }
    }
}

fn fill_missing(slot: &mut Option<U256>, value: U256) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

/// Drops placeholders and falls back to a lone placeholder when nothing
/// real is left.
pub(crate) fn normalize_signatures(list: Vec<SignatureData>) -> Vec<SignatureData> {
    let real: Vec<SignatureData> = list.into_iter().filter(|s| !s.is_empty()).collect();
    if real.is_empty() {
        vec![SignatureData::empty()]
    } else {
        real
    }
}

// ---------------------------------------------------------------------------
// TransactionFields
// ---------------------------------------------------------------------------

/// Everything a caller may specify for a transaction, all optional.
///
/// Numbers accept native integers or hex strings, and `"0x"` means unset.
/// Addresses and `input` are hex strings. Deserialises from the usual
/// camelCase JSON shape (`gasPrice`, `feePayer`, `feePayerSignatures`, …).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionFields {
    #[serde(rename = "type")]
    pub tx_type: Option<TransactionType>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<NumberInput>,
    pub gas: Option<NumberInput>,
    pub nonce: Option<NumberInput>,
    pub gas_price: Option<NumberInput>,
    pub chain_id: Option<NumberInput>,
    pub input: Option<String>,
    pub fee_ratio: Option<NumberInput>,
    pub fee_payer: Option<String>,
    pub signatures: Vec<SignatureData>,
    pub fee_payer_signatures: Vec<SignatureData>,
}

impl TransactionFields {
    /// Starts an empty field set for `tx_type`.
    pub fn new(tx_type: TransactionType) -> Self {
        Self {
            tx_type: Some(tx_type),
            ..Self::default()
        }
    }

    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to = Some(address.into());
        self
    }

    pub fn value(mut self, value: impl Into<NumberInput>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn gas(mut self, gas: impl Into<NumberInput>) -> Self {
        self.gas = Some(gas.into());
        self
    }

    pub fn nonce(mut self, nonce: impl Into<NumberInput>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn gas_price(mut self, gas_price: impl Into<NumberInput>) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }

    pub fn chain_id(mut self, chain_id: impl Into<NumberInput>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    /// Hex-encoded memo, e.g. `"0x68656c6c6f"`.
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn fee_ratio(mut self, ratio: impl Into<NumberInput>) -> Self {
        self.fee_ratio = Some(ratio.into());
        self
    }

    pub fn fee_payer(mut self, address: impl Into<String>) -> Self {
        self.fee_payer = Some(address.into());
        self
    }

    pub fn signatures(mut self, signatures: impl IntoIterator<Item = SignatureData>) -> Self {
        self.signatures = signatures.into_iter().collect();
        self
    }

    pub fn fee_payer_signatures(
        mut self,
        signatures: impl IntoIterator<Item = SignatureData>,
    ) -> Self {
        self.fee_payer_signatures = signatures.into_iter().collect();
        self
    }

    /// Validates every field and produces a [`Transaction`].
    pub fn build(self) -> Result<Transaction, TransactionError> {
        let tx_type = self.tx_type.ok_or_else(|| TransactionError::missing("type"))?;

        let from = required_address("from", self.from.as_deref())?;
        let to = required_address("to", self.to.as_deref())?;
        let value = required_number("value", self.value.as_ref())?;
        let gas = required_number("gas", self.gas.as_ref())?;

        let nonce = optional_number("nonce", self.nonce.as_ref())?;
        let gas_price = optional_number("gasPrice", self.gas_price.as_ref())?;
        let chain_id = optional_number("chainId", self.chain_id.as_ref())?;

        let input = if tx_type.has_input() {
            Some(parse_input(self.input.as_deref())?)
        } else {
            None
        };

        let fee_ratio = if tx_type.has_fee_ratio() {
            Some(parse_fee_ratio(self.fee_ratio.as_ref())?)
        } else {
            None
        };

        let (fee_payer, fee_payer_signatures) = if tx_type.is_fee_delegated() {
            let fee_payer = match self.fee_payer.as_deref() {
                None => None,
                Some(s) if s.trim() == UNSET_HEX => None,
                Some(s) => Some(parse_address("feePayer", s)?).filter(|a| !a.is_zero()),
            };
            let fee_payer_signatures = normalize_signatures(self.fee_payer_signatures);
            let has_real = fee_payer_signatures.iter().any(|s| !s.is_empty());
            if has_real && fee_payer.is_none() {
                return Err(TransactionError::fee_payer_without_address());
            }
            (fee_payer, fee_payer_signatures)
        } else {
            (None, Vec::new())
        };

        Ok(Transaction {
            tx_type,
            from,
            to,
            value,
            gas,
            nonce,
            gas_price,
            chain_id,
            input,
            fee_ratio,
            fee_payer,
            signatures: normalize_signatures(self.signatures),
            fee_payer_signatures,
        })
    }
}

fn required_address(field: &'static str, value: Option<&str>) -> Result<Address, TransactionError> {
    match value {
        None => Err(TransactionError::missing(field)),
        Some(s) if s.trim() == UNSET_HEX => Err(TransactionError::missing(field)),
        Some(s) => parse_address(field, s),
    }
}

fn required_number(
    field: &'static str,
    value: Option<&NumberInput>,
) -> Result<U256, TransactionError> {
    optional_number(field, value)?.ok_or_else(|| TransactionError::missing(field))
}

fn optional_number(
    field: &'static str,
    value: Option<&NumberInput>,
) -> Result<Option<U256>, TransactionError> {
    match value {
        None => Ok(None),
        Some(n) => n.resolve(field),
    }
}

fn parse_input(value: Option<&str>) -> Result<Vec<u8>, TransactionError> {
    let s = value.ok_or_else(|| TransactionError::missing("input"))?;
    let body = strip_hex_prefix(s.trim());
    if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TransactionError::invalid("input", format!("Invalid input. : {s}")));
    }
    hex_to_bytes(body).map_err(|e| TransactionError::invalid("input", e.to_string()))
}

fn parse_fee_ratio(value: Option<&NumberInput>) -> Result<u8, TransactionError> {
    let input = value.ok_or_else(|| TransactionError::missing("feeRatio"))?;
    let ratio = input
        .resolve("feeRatio")
        .map_err(|_| {
            TransactionError::invalid(
                "feeRatio",
                "feeRatio should be number type or hex number string",
            )
        })?
        .ok_or_else(|| TransactionError::missing("feeRatio"))?;

    match u64::try_from(ratio) {
        Ok(r) if is_valid_fee_ratio(r) => Ok(r as u8),
        _ => Err(TransactionError::OutOfRange {
            field: "feeRatio",
            value: quantity_hex(&ratio),
            min: MIN_FEE_RATIO as u64,
            max: MAX_FEE_RATIO as u64,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
