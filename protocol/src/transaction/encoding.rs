//! The three byte layouts of every transaction type, the hashes derived from
//! them, and the inverse parse of a raw transaction.
//!
//! ```text
//! common   = [nonce, gasPrice, gas, to, value, from, input?, feeRatio?]
//!
//! wire     = type || RLP(common ++ [sigs] ++ [feePayer, feePayerSigs]?)
//! sender   = RLP([type || RLP(common), chainId, "", ""])
//! feePayer = RLP([type || RLP(common), feePayer, chainId, "", ""])
//! ```
//!
//! The fee-payer part of `wire` exists only for fee-delegated types. An
//! unset fee payer is written as the zero address.

use tracing::trace;

use super::builder::{normalize_signatures, Transaction};
use super::error::TransactionError;
use super::rlp::{ListDecoder, ListEncoder, RlpError};
use super::types::{bytes_to_hex, hex_to_bytes, quantity_hex, Address, TransactionType, U256};
use crate::config::{
    is_valid_fee_ratio, ADDRESS_LENGTH, HASH_LENGTH, MAX_FEE_RATIO, MIN_FEE_RATIO,
};
use crate::crypto::hash::{keccak256, keccak256_hex};
use crate::crypto::signatures::SignatureData;

impl Transaction {
    /// `[nonce, gasPrice, gas, to, value, from, typefields...]`, still open
    /// so callers can append the signature part.
    fn common_fields(&self) -> Result<ListEncoder, TransactionError> {
        let nonce = self
            .nonce
            .as_ref()
            .ok_or_else(|| TransactionError::undefined("nonce"))?;
        let gas_price = self
            .gas_price
            .as_ref()
            .ok_or_else(|| TransactionError::undefined("gasPrice"))?;

        let mut fields = ListEncoder::new();
        fields
            .item(nonce)
            .item(gas_price)
            .item(&self.gas)
            .item(&self.to)
            .item(&self.value)
            .item(&self.from);
        if let Some(input) = &self.input {
            fields.bytes(input);
        }
        if let Some(ratio) = self.fee_ratio {
            fields.item(&ratio);
        }
        Ok(fields)
    }

    /// `RLP(common ++ [sigs])`, the sender's part of the wire body.
    fn sender_fields(&self) -> Result<ListEncoder, TransactionError> {
        let mut fields = self.common_fields()?;
        fields.raw(&encode_signatures(&self.signatures));
        Ok(fields)
    }

    /// `type || RLP(common)`, the payload both signing layouts wrap.
    fn typed_common_encoding(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(self.typed(&self.common_fields()?.finish()))
    }

    fn typed(&self, body: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + body.len());
        out.push(self.tx_type.discriminator());
        out.extend_from_slice(body);
        out
    }

    fn require_chain_id(&self) -> Result<&U256, TransactionError> {
        self.chain_id
            .as_ref()
            .ok_or_else(|| TransactionError::undefined("chainId"))
    }

    /// The full wire encoding, signatures included.
    pub fn rlp_encoding(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(self.typed(&self.wire_body()?))
    }

    /// The wire encoding without its type byte.
    fn wire_body(&self) -> Result<Vec<u8>, TransactionError> {
        let mut fields = self.sender_fields()?;
        if self.tx_type.is_fee_delegated() {
            fields
                .item(&self.fee_payer.unwrap_or(Address::ZERO))
                .raw(&encode_signatures(&self.fee_payer_signatures));
        }
        Ok(fields.finish())
    }

    /// [`rlp_encoding`](Self::rlp_encoding) as `0x`-prefixed lowercase hex.
    pub fn raw_transaction(&self) -> Result<String, TransactionError> {
        Ok(bytes_to_hex(&self.rlp_encoding()?))
    }

    /// `keccak256` of the wire encoding.
    pub fn transaction_hash(&self) -> Result<String, TransactionError> {
        let body = self.wire_body()?;
        let hash = keccak256_hex(&[[self.tx_type.discriminator()].as_slice(), body.as_slice()]);
        trace!(tx_type = %self.tx_type, %hash, "computed transaction hash");
        Ok(hash)
    }

    /// Hash of the sender's part of the transaction: the wire encoding
    /// without `feePayer` and `feePayerSignatures`.
    ///
    /// Stays stable while fee payers sign. Equal to
    /// [`transaction_hash`](Self::transaction_hash) for types without fee
    /// delegation.
    pub fn sender_tx_hash(&self) -> Result<String, TransactionError> {
        let body = self.sender_fields()?.finish();
        let hash = keccak256_hex(&[[self.tx_type.discriminator()].as_slice(), body.as_slice()]);
        trace!(tx_type = %self.tx_type, %hash, "computed sender transaction hash");
        Ok(hash)
    }

    /// The payload every sender-side signer signs. Requires `chainId`.
    pub fn rlp_encoding_for_signature(&self) -> Result<Vec<u8>, TransactionError> {
        let chain_id = self.require_chain_id()?;
        let inner = self.typed_common_encoding()?;
        let mut payload = ListEncoder::new();
        payload.bytes(&inner).item(chain_id).bytes(&[]).bytes(&[]);
        Ok(payload.finish())
    }

    /// The payload a fee payer signs. Requires `feePayer` and `chainId`.
    pub fn rlp_encoding_for_fee_payer_signature(&self) -> Result<Vec<u8>, TransactionError> {
        self.require_fee_delegation("fee payer signature encoding")?;
        let fee_payer = self
            .fee_payer
            .as_ref()
            .ok_or_else(|| TransactionError::undefined("feePayer"))?;
        let chain_id = self.require_chain_id()?;
        let inner = self.typed_common_encoding()?;
        let mut payload = ListEncoder::new();
        payload
            .bytes(&inner)
            .item(fee_payer)
            .item(chain_id)
            .bytes(&[])
            .bytes(&[]);
        Ok(payload.finish())
    }

    pub(crate) fn sender_signing_hash(&self) -> Result<[u8; HASH_LENGTH], TransactionError> {
        let hash = keccak256(&self.rlp_encoding_for_signature()?);
        trace!(tx_type = %self.tx_type, hash = %bytes_to_hex(&hash), "sender signing hash");
        Ok(hash)
    }

    pub(crate) fn fee_payer_signing_hash(&self) -> Result<[u8; HASH_LENGTH], TransactionError> {
        let hash = keccak256(&self.rlp_encoding_for_fee_payer_signature()?);
        trace!(tx_type = %self.tx_type, hash = %bytes_to_hex(&hash), "fee payer signing hash");
        Ok(hash)
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Parses a raw transaction of any supported type.
    ///
    /// The body is read against the fixed layout of its type, one list level
    /// at a time, so no input can make decoding recurse deeper than the
    /// layout does. `nonce` and `gasPrice` come back set; `chainId` is not
    /// part of the wire form and comes back unset.
    pub fn decode(raw: &[u8]) -> Result<Transaction, TransactionError> {
        let (&discriminator, mut body) = raw.split_first().ok_or(RlpError::InputTooShort)?;
        let tx_type = TransactionType::from_discriminator(discriminator)
            .ok_or(TransactionError::UnknownType { discriminator })?;

        let mut fields = ListDecoder::open(&mut body)?;
        if !body.is_empty() {
            return Err(RlpError::Custom("trailing bytes after transaction").into());
        }
        let expected = expected_item_count(tx_type);
        let found = fields.remaining()?;
        if found != expected {
            return Err(TransactionError::LayoutMismatch {
                tx_type: tx_type.to_string(),
                expected,
                found,
            });
        }

        let nonce = fields.next::<U256>()?;
        let gas_price = fields.next::<U256>()?;
        let gas = fields.next::<U256>()?;
        let to = decode_address(fields.next_bytes()?, "to")?;
        let value = fields.next::<U256>()?;
        let from = decode_address(fields.next_bytes()?, "from")?;

        let input = if tx_type.has_input() {
            Some(fields.next_bytes()?.to_vec())
        } else {
            None
        };
        let fee_ratio = if tx_type.has_fee_ratio() {
            Some(decode_fee_ratio(fields.next::<U256>()?)?)
        } else {
            None
        };

        let signatures = normalize_signatures(decode_signatures(fields.next_list()?)?);

        let (fee_payer, fee_payer_signatures) = if tx_type.is_fee_delegated() {
            let fee_payer = decode_fee_payer(fields.next_bytes()?)?;
            let fee_payer_signatures =
                normalize_signatures(decode_signatures(fields.next_list()?)?);
            if fee_payer.is_none() && fee_payer_signatures.iter().any(|s| !s.is_empty()) {
                return Err(TransactionError::fee_payer_without_address());
            }
            (fee_payer, fee_payer_signatures)
        } else {
            (None, Vec::new())
        };
        fields.finish()?;

        Ok(Transaction {
            tx_type,
            from,
            to,
            value,
            gas,
            nonce: Some(nonce),
            gas_price: Some(gas_price),
            chain_id: None,
            input,
            fee_ratio,
            fee_payer,
            signatures,
            fee_payer_signatures,
        })
    }

    /// [`decode`](Self::decode) from a hex string, `0x` optional.
    pub fn decode_hex(raw: &str) -> Result<Transaction, TransactionError> {
        let bytes = hex_to_bytes(raw.trim())
            .map_err(|e| TransactionError::invalid("rawTransaction", e.to_string()))?;
        Self::decode(&bytes)
    }
}

fn expected_item_count(tx_type: TransactionType) -> usize {
    let mut count = 7;
    if tx_type.has_input() {
        count += 1;
    }
    if tx_type.has_fee_ratio() {
        count += 1;
    }
    if tx_type.is_fee_delegated() {
        count += 2;
    }
    count
}

/// `[[v, r, s], ...]`
pub(crate) fn encode_signatures(signatures: &[SignatureData]) -> Vec<u8> {
    let mut list = ListEncoder::new();
    for signature in signatures {
        list.item(signature);
    }
    list.finish()
}

fn decode_signatures(mut list: ListDecoder<'_>) -> Result<Vec<SignatureData>, TransactionError> {
    let mut signatures = Vec::new();
    while !list.is_empty() {
        signatures.push(list.next::<SignatureData>()?);
    }
    Ok(signatures)
}

fn decode_address(bytes: &[u8], field: &'static str) -> Result<Address, TransactionError> {
    if bytes.len() != ADDRESS_LENGTH {
        return Err(TransactionError::invalid(
            field,
            format!("Invalid address. : {}", bytes_to_hex(bytes)),
        ));
    }
    Ok(Address::from_slice(bytes))
}

/// Empty and zero both mean "no fee payer yet".
fn decode_fee_payer(bytes: &[u8]) -> Result<Option<Address>, TransactionError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let address = decode_address(bytes, "feePayer")?;
    Ok(Some(address).filter(|a| !a.is_zero()))
}

fn decode_fee_ratio(ratio: U256) -> Result<u8, TransactionError> {
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
