//! # CLI Interface
//!
//! Argument structure for `klay-tx`, using `clap` derive. Every flag that
//! an operator is likely to fix per environment also reads a `KLAY_*`
//! variable.

use clap::{Args, Parser, Subcommand};

use klay_protocol::config::{CHAIN_ID_MAINNET, CHAIN_ID_TESTNET};

use crate::logging::LogFormat;

/// Offline toolkit for Klaytn-style value-transfer transactions.
///
/// Reads raw transactions as hex, never talks to a node, and prints
/// results on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "klay-tx",
    about = "Decode, hash, sign, combine and recover Klaytn-style transactions",
    version,
    propagate_version = true
)]
pub struct KlayTxCli {
    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "KLAY_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "KLAY_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a raw transaction as JSON.
    Decode(RawArgs),
    /// Print the transaction hash and the sender transaction hash.
    Hash(RawArgs),
    /// Recover the public keys behind every signature.
    Recover(RecoverArgs),
    /// Add a signature and print the new raw transaction.
    Sign(SignArgs),
    /// Merge the signatures of several raw transactions into the first.
    Combine(CombineArgs),
    /// Generate a fresh key and print its KlaytnWalletKey.
    Generate,
}

/// A single raw transaction.
#[derive(Args, Debug)]
pub struct RawArgs {
    /// `0x`-prefixed hex of the raw transaction.
    pub raw: String,
}

/// Network selection.
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Chain id used in signing hashes (8217 mainnet, 1001 testnet).
    #[arg(long, env = "KLAY_CHAIN_ID", default_value_t = CHAIN_ID_TESTNET)]
    pub chain_id: u64,

    /// Shorthand for `--chain-id 8217`.
    #[arg(long, conflicts_with = "chain_id")]
    pub mainnet: bool,
}

impl ChainArgs {
    pub fn resolved_chain_id(&self) -> u64 {
        if self.mainnet {
            CHAIN_ID_MAINNET
        } else {
            self.chain_id
        }
    }
}

#[derive(Args, Debug)]
pub struct RecoverArgs {
    #[command(flatten)]
    pub tx: RawArgs,

    #[command(flatten)]
    pub chain: ChainArgs,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub tx: RawArgs,

    /// Private key or KlaytnWalletKey.
    ///
    /// Prefer the environment variable over the flag; flags end up in
    /// shell history.
    #[arg(long, env = "KLAY_PRIVATE_KEY", hide_env_values = true)]
    pub key: String,

    /// Sign as the fee payer instead of the sender.
    #[arg(long)]
    pub fee_payer: bool,

    /// Sign with only this key index (all keys when omitted).
    #[arg(long)]
    pub index: Option<usize>,

    #[command(flatten)]
    pub chain: ChainArgs,
}

#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Raw transactions; signatures of the rest are merged into the first.
    #[arg(required = true, num_args = 1..)]
    pub raws: Vec<String>,
}
