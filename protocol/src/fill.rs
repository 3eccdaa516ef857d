//! Remote fill of `nonce`, `gasPrice`, and `chainId`.
//!
//! The core never talks to a node. A caller that wants these values from
//! one implements [`RemoteFill`] (usually over JSON-RPC) and awaits
//! [`fill_transaction`] before encoding or signing:
//!
//! ```text
//! build ──► fill_transaction(&mut tx, &rpc).await ──► sign / encode
//! ```
//!
//! Values already set on the transaction always win. Only missing ones are
//! requested, and nothing is written until every request has succeeded.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::transaction::builder::Transaction;
use crate::transaction::error::TransactionError;
use crate::transaction::types::{address_hex, Address, U256};

/// Failure reported by a [`RemoteFill`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FillError {
    #[error("failed to fetch {field}: {reason}")]
    Remote { field: &'static str, reason: String },

    #[error("{field} is not available from this source")]
    Unavailable { field: &'static str },
}

/// Source of the three values a node normally supplies.
#[async_trait]
pub trait RemoteFill: Send + Sync {
    /// Pending nonce of `address`.
    async fn nonce(&self, address: &Address) -> Result<U256, FillError>;

    async fn gas_price(&self) -> Result<U256, FillError>;

    async fn chain_id(&self) -> Result<U256, FillError>;
}

/// A [`RemoteFill`] answering from fixed values. Unset values report
/// [`FillError::Unavailable`].
///
/// Useful offline and in tests, where the chain id comes from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedValues {
    pub nonce: Option<U256>,
    pub gas_price: Option<U256>,
    pub chain_id: Option<U256>,
}

impl FixedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nonce(mut self, nonce: impl Into<U256>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn with_gas_price(mut self, gas_price: impl Into<U256>) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }

    pub fn with_chain_id(mut self, chain_id: impl Into<U256>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }
}

#[async_trait]
impl RemoteFill for FixedValues {
    async fn nonce(&self, _address: &Address) -> Result<U256, FillError> {
        self.nonce.ok_or(FillError::Unavailable { field: "nonce" })
    }

    async fn gas_price(&self) -> Result<U256, FillError> {
        self.gas_price.ok_or(FillError::Unavailable { field: "gasPrice" })
    }

    async fn chain_id(&self) -> Result<U256, FillError> {
        self.chain_id.ok_or(FillError::Unavailable { field: "chainId" })
    }
}

/// Fetches whatever of `nonce`, `gasPrice`, and `chainId` is unset and
/// writes it into `tx`. Returns the names of the fields that were filled.
///
/// On error `tx` is unchanged.
pub async fn fill_transaction<R: RemoteFill + ?Sized>(
    tx: &mut Transaction,
    remote: &R,
) -> Result<Vec<&'static str>, TransactionError> {
    let nonce = match tx.nonce() {
        Some(_) => None,
        None => Some(remote.nonce(tx.from()).await.map_err(log_failure)?),
    };
    let gas_price = match tx.gas_price() {
        Some(_) => None,
        None => Some(remote.gas_price().await.map_err(log_failure)?),
    };
    let chain_id = match tx.chain_id() {
        Some(_) => None,
        None => Some(remote.chain_id().await.map_err(log_failure)?),
    };

    let mut filled = Vec::new();
    if let Some(nonce) = nonce {
        tx.set_nonce_if_missing(nonce);
        filled.push("nonce");
    }
    if let Some(gas_price) = gas_price {
        tx.set_gas_price_if_missing(gas_price);
        filled.push("gasPrice");
    }
    if let Some(chain_id) = chain_id {
        tx.set_chain_id_if_missing(chain_id);
        filled.push("chainId");
    }

    debug!(from = %address_hex(tx.from()), ?filled, "filled transaction from remote");
    Ok(filled)
}

fn log_failure(err: FillError) -> TransactionError {
    warn!(error = %err, "remote fill failed");
    err.into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
