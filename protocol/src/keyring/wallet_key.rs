//! The KlaytnWalletKey string format.
//!
//! ```text
//! 0x{private key, 64 hex}0x00{address, 0x + 40 hex}
//! ```
//!
//! The middle `0x00` is a fixed separator (historically a key-type byte).
//! On input the leading `0x` and the address prefix are both optional.

use crate::config::{ADDRESS_LENGTH, PRIVATE_KEY_LENGTH, WALLET_KEY_SEPARATOR};
use crate::crypto::keys::{KeyError, PrivateKey};
use crate::transaction::types::{address_hex, parse_address, strip_hex_prefix, Address};

/// Renders a key and the address it signs for.
pub fn format(key: &PrivateKey, address: &Address) -> String {
    format!("{}{}{}", key.to_hex(), WALLET_KEY_SEPARATOR, address_hex(address))
}

/// Splits a KlaytnWalletKey into its private key and address.
pub fn parse(s: &str) -> Result<(PrivateKey, Address), KeyError> {
    let invalid = |reason: &str| KeyError::InvalidWalletKey {
        reason: reason.to_string(),
    };

    let body = strip_hex_prefix(s.trim());
    let key_len = PRIVATE_KEY_LENGTH * 2;
    if body.len() < key_len + WALLET_KEY_SEPARATOR.len() {
        return Err(invalid("too short"));
    }
    if !body.is_char_boundary(key_len) {
        return Err(invalid("private key must be hex"));
    }

    let (key_hex, rest) = body.split_at(key_len);
    let address_hex = rest
        .strip_prefix(WALLET_KEY_SEPARATOR)
        .ok_or_else(|| invalid("missing 0x00 separator after the private key"))?;
    if strip_hex_prefix(address_hex).len() != ADDRESS_LENGTH * 2 {
        return Err(invalid("address must be 20 bytes"));
    }

    let key = PrivateKey::from_hex(key_hex)?;
    let address =
        parse_address("address", address_hex).map_err(|_| invalid("address must be hex"))?;
    Ok((key, address))
}

/// Whether `s` parses as a KlaytnWalletKey.
pub fn is_klaytn_wallet_key(s: &str) -> bool {
    parse(s).is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
