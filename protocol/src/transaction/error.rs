//! Error type shared by the field model, codec, keyrings, and signing engine.
//!
//! Every failure is raised at the point of detection and nothing is retried.
//! A failing build never yields a `Transaction`, and a failing encode, sign,
//! or combine leaves the transaction exactly as it was.

use thiserror::Error;

use super::rlp::RlpError;
use crate::crypto::keys::KeyError;
use crate::crypto::signatures::SignatureError;
use crate::fill::FillError;

/// Errors produced by the transaction core.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A required field is absent, at build time or when encoding.
    #[error("{message}")]
    MissingField {
        field: &'static str,
        message: String,
    },

    /// An address, number, or hex payload could not be parsed.
    #[error("Invalid {field}: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    /// A bounded numeric field is outside its accepted range.
    #[error("Invalid {field}: {field} is out of range. [{min},{max}]")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: u64,
        max: u64,
    },

    /// The keyring does not belong to the account that must sign.
    #[error(
        "The {role} address of the transaction is different with the address of the keyring \
         to use."
    )]
    AddressMismatch { role: &'static str },

    /// The requested key index does not exist for the role.
    #[error(
        "Invalid index : index must be less than the length of the key. \
         (index {index}, keys {len})"
    )]
    IndexOutOfRange { index: usize, len: usize },

    /// A raw transaction handed to `combine` disagrees on a non-signature field.
    #[error("Transactions containing different information cannot be combined.")]
    IncompatibleCombine { field: &'static str },

    /// A stored signature cannot be used for public-key recovery.
    #[error("malformed signature: {reason}")]
    MalformedSignature { reason: String },

    /// The operation only exists for fee-delegated transaction types.
    #[error("{tx_type} does not support {operation}")]
    Unsupported {
        tx_type: String,
        operation: &'static str,
    },

    /// The leading type byte of a raw transaction is not a known type.
    #[error("unknown transaction type 0x{discriminator:02x}")]
    UnknownType { discriminator: u8 },

    /// The raw bytes are not well-formed RLP, or an item has the wrong kind.
    #[error("malformed RLP: {0}")]
    Decode(#[from] RlpError),

    /// The top-level list has the wrong number of items for its type.
    #[error("{tx_type} has {expected} fields, found {found}")]
    LayoutMismatch {
        tx_type: String,
        expected: usize,
        found: usize,
    },

    /// Key material could not be parsed or used.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// The remote-fill collaborator failed.
    #[error("fill error: {0}")]
    Fill(#[from] FillError),
}

impl TransactionError {
    /// A field that `build` requires was not supplied.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField {
            field,
            message: format!("{field} is missing."),
        }
    }

    /// A field that encoding requires has not been filled yet.
    pub fn undefined(field: &'static str) -> Self {
        Self::MissingField {
            field,
            message: format!(
                "{field} is undefined. Define {field} in transaction or use \
                 'transaction.fillTransaction' to fill values."
            ),
        }
    }

    /// Real fee-payer signatures are present but `feePayer` is not.
    pub(crate) fn fee_payer_without_address() -> Self {
        Self::MissingField {
            field: "feePayer",
            message: "feePayer is missing: feePayer must be defined with feePayerSignatures."
                .to_string(),
        }
    }

    /// Shorthand for [`TransactionError::InvalidFormat`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::IncompatibleCombine { field } => Some(field),
            _ => None,
        }
    }
}

impl From<SignatureError> for TransactionError {
    fn from(err: SignatureError) -> Self {
        Self::MalformedSignature {
            reason: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
