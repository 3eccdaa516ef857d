//! # Keyrings
//!
//! A [`Keyring`] binds an account address to the private keys allowed to
//! sign for it. Three shapes exist:
//!
//! - **Single**: one key, used for every role.
//! - **Multiple**: one ordered key list, used for every role (weighted
//!   multisig accounts).
//! - **RoleBased**: a separate list per [`Role`]. An empty role list falls
//!   back to the `TransactionSign` list.
//!
//! The address need not be derived from any of the keys; an account whose
//! key was replaced on chain keeps its address ("decoupled" keyring).
//!
//! Keyrings are immutable once built and are `Send + Sync`, so one keyring
//! can sign many transactions from many threads.

pub mod wallet_key;

use std::fmt;
use std::slice;

use crate::config::HASH_LENGTH;
use crate::crypto::keys::PrivateKey;
use crate::crypto::signatures::{sign_hash, SignatureData};
use crate::transaction::error::TransactionError;
use crate::transaction::types::{Address, U256};

/// Purpose a key is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    TransactionSign = 0,
    AccountUpdate = 1,
    FeePayerSign = 2,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::TransactionSign, Role::AccountUpdate, Role::FeePayerSign];

    /// Position of this role's list in a role-based keyring.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::TransactionSign => "roleTransactionKey",
            Role::AccountUpdate => "roleAccountUpdateKey",
            Role::FeePayerSign => "roleFeePayerKey",
        };
        f.write_str(name)
    }
}

/// An address and the keys that sign for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyring {
    Single {
        address: Address,
        key: PrivateKey,
    },
    Multiple {
        address: Address,
        keys: Vec<PrivateKey>,
    },
    RoleBased {
        address: Address,
        roles: [Vec<PrivateKey>; 3],
    },
}

impl Keyring {
    /// A fresh single keyring whose address is derived from a random key.
    pub fn generate() -> Self {
        Self::from_private_key(PrivateKey::generate())
    }

    /// A single keyring for the address `key` derives.
    pub fn from_private_key(key: PrivateKey) -> Self {
        Self::Single {
            address: key.address(),
            key,
        }
    }

    pub fn single(address: Address, key: PrivateKey) -> Self {
        Self::Single { address, key }
    }

    /// Fails if `keys` is empty.
    pub fn multiple(address: Address, keys: Vec<PrivateKey>) -> Result<Self, TransactionError> {
        if keys.is_empty() {
            return Err(TransactionError::MissingField {
                field: "keys",
                message: "At least one key is required for a multiple-key keyring.".to_string(),
            });
        }
        Ok(Self::Multiple { address, keys })
    }

    /// Keys listed in [`Role`] order. Fails if every list is empty.
    pub fn role_based(
        address: Address,
        roles: [Vec<PrivateKey>; 3],
    ) -> Result<Self, TransactionError> {
        if roles.iter().all(Vec::is_empty) {
            return Err(TransactionError::MissingField {
                field: "keys",
                message: "At least one key is required for a role-based keyring.".to_string(),
            });
        }
        Ok(Self::RoleBased { address, roles })
    }

    /// Parses a KlaytnWalletKey (`0x{key}0x00{address}`).
    pub fn from_klaytn_wallet_key(s: &str) -> Result<Self, TransactionError> {
        let (key, address) = wallet_key::parse(s)?;
        Ok(Self::single(address, key))
    }

    /// Accepts either a bare private key or a KlaytnWalletKey.
    pub fn from_key_str(s: &str) -> Result<Self, TransactionError> {
        if wallet_key::is_klaytn_wallet_key(s) {
            return Self::from_klaytn_wallet_key(s);
        }
        Ok(Self::from_private_key(PrivateKey::from_hex(s)?))
    }

    /// The KlaytnWalletKey for a single keyring.
    pub fn klaytn_wallet_key(&self) -> Result<String, TransactionError> {
        match self {
            Self::Single { address, key } => Ok(wallet_key::format(key, address)),
            _ => Err(TransactionError::invalid(
                "keyring",
                "KlaytnWalletKey is only defined for single-key keyrings",
            )),
        }
    }

    pub fn address(&self) -> &Address {
        match self {
            Self::Single { address, .. }
            | Self::Multiple { address, .. }
            | Self::RoleBased { address, .. } => address,
        }
    }

    /// The keys that sign for `role`, in order.
    pub fn keys(&self, role: Role) -> Result<&[PrivateKey], TransactionError> {
        let keys: &[PrivateKey] = match self {
            Self::Single { key, .. } => slice::from_ref(key),
            Self::Multiple { keys, .. } => keys,
            Self::RoleBased { roles, .. } => {
                let own = &roles[role.index()];
                if own.is_empty() {
                    &roles[Role::TransactionSign.index()]
                } else {
                    own
                }
            }
        };
        if keys.is_empty() {
            return Err(TransactionError::MissingField {
                field: "keys",
                message: format!("{role} has no keys and {} is empty.", Role::TransactionSign),
            });
        }
        Ok(keys)
    }

    /// Signs `hash` with the `index`-th key of `role`.
    pub fn sign(
        &self,
        hash: &[u8; HASH_LENGTH],
        chain_id: &U256,
        role: Role,
        index: usize,
    ) -> Result<SignatureData, TransactionError> {
        let keys = self.keys(role)?;
        let key = keys.get(index).ok_or(TransactionError::IndexOutOfRange {
            index,
            len: keys.len(),
        })?;
        Ok(sign_hash(key, hash, chain_id)?)
    }

    /// Signs `hash` with every key of `role`, in list order.
    pub fn sign_all(
        &self,
        hash: &[u8; HASH_LENGTH],
        chain_id: &U256,
        role: Role,
    ) -> Result<Vec<SignatureData>, TransactionError> {
        self.keys(role)?
            .iter()
            .map(|key| sign_hash(key, hash, chain_id).map_err(TransactionError::from))
            .collect()
    }

    /// Whether the address differs from what the key derives. Multi-key
    /// keyrings always count as decoupled.
    pub fn is_decoupled(&self) -> bool {
        match self {
            Self::Single { address, key } => *address != key.address(),
            _ => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
