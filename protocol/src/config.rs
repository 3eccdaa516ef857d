//! # Protocol Configuration & Constants
//!
//! Every magic number the transaction core depends on lives here: type
//! discriminators, the empty-signature sentinel, fee-ratio bounds, and the
//! byte lengths the codec enforces. If a value is on the wire, it is
//! defined in this file.

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Chain id of the Cypress main network.
pub const CHAIN_ID_MAINNET: u64 = 8217;

/// Chain id of the Baobab test network.
pub const CHAIN_ID_TESTNET: u64 = 1001;

// ---------------------------------------------------------------------------
// Transaction Type Discriminators
// ---------------------------------------------------------------------------

/// Plain value transfer.
pub const TX_TYPE_VALUE_TRANSFER: u8 = 0x08;

/// Value transfer whose gas is paid by a fee payer.
pub const TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER: u8 = 0x09;

/// Fee-delegated value transfer where the fee payer covers `feeRatio`% of the fee.
pub const TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO: u8 = 0x0a;

/// Value transfer carrying an arbitrary memo in `input`.
pub const TX_TYPE_VALUE_TRANSFER_MEMO: u8 = 0x10;

/// Fee-delegated value transfer with memo.
pub const TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_MEMO: u8 = 0x11;

/// Fee-delegated value transfer with memo and partial fee delegation.
pub const TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO: u8 = 0x12;

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// `v` of the empty-signature sentinel. Its `r` and `s` are both zero.
pub const EMPTY_SIGNATURE_V: u8 = 0x01;

/// Width of `r` and `s` in a non-empty signature.
pub const SIGNATURE_COMPONENT_LENGTH: usize = 32;

/// Offset in `v = recovery_id + 35 + 2 * chainId`.
pub const CHAIN_ID_V_OFFSET: u64 = 35;

// ---------------------------------------------------------------------------
// Fee Ratio
// ---------------------------------------------------------------------------

/// Smallest accepted fee ratio, inclusive.
pub const MIN_FEE_RATIO: u8 = 1;

/// Largest accepted fee ratio, inclusive.
pub const MAX_FEE_RATIO: u8 = 99;

// ---------------------------------------------------------------------------
// Lengths & Encodings
// ---------------------------------------------------------------------------

/// Account addresses are the last 20 bytes of keccak(pubkey).
pub const ADDRESS_LENGTH: usize = 20;

/// secp256k1 secret scalar length.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Uncompressed public key without the `0x04` prefix (x || y).
pub const PUBLIC_KEY_LENGTH: usize = 64;

/// Keccak-256 output length.
pub const HASH_LENGTH: usize = 32;

/// Hex literal that means "not set yet".
pub const UNSET_HEX: &str = "0x";

/// The zero address. An encoded fee payer equal to this is treated as unset.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Separator between key and address in a KlaytnWalletKey
/// (`0x{key}0x00{address}`).
pub const WALLET_KEY_SEPARATOR: &str = "0x00";

/// Returns `true` if `ratio` is inside `[MIN_FEE_RATIO, MAX_FEE_RATIO]`.
pub fn is_valid_fee_ratio(ratio: u64) -> bool {
    (MIN_FEE_RATIO as u64..=MAX_FEE_RATIO as u64).contains(&ratio)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
