// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # klay-tx
//!
//! Offline companion binary for `klay-protocol`.
//!
//! ## Subcommands
//!
//! - `decode`: print a raw transaction as JSON
//! - `hash`: print the transaction hash and sender transaction hash
//! - `recover`: recover the public keys behind every signature
//! - `sign`: add a sender or fee-payer signature
//! - `combine`: merge signatures collected from several parties
//! - `generate`: create a fresh key and print its KlaytnWalletKey

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use klay_protocol::fill::{fill_transaction, FixedValues};
use klay_protocol::keyring::Keyring;
use klay_protocol::transaction::signing::{
    combine_signed_raw_transactions, sign, sign_as_fee_payer,
};
use klay_protocol::transaction::verification::{
    recover_fee_payer_public_keys, recover_public_keys,
};
use klay_protocol::transaction::types::U256;
use klay_protocol::transaction::{address_hex, Transaction};

use crate::cli::{ChainArgs, Commands, KlayTxCli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = KlayTxCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Decode(args) => {
            let tx = decode(&args.raw)?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        Commands::Hash(args) => {
            let tx = decode(&args.raw)?;
            let hashes = json!({
                "transactionHash": tx.transaction_hash()?,
                "senderTxHash": tx.sender_tx_hash()?,
            });
            println!("{}", serde_json::to_string_pretty(&hashes)?);
        }
        Commands::Recover(args) => {
            let mut tx = decode(&args.tx.raw)?;
            apply_chain_id(&mut tx, &args.chain).await?;

            let senders = recover_public_keys(&tx).context("failed to recover sender keys")?;
            let fee_payers = if tx.tx_type().is_fee_delegated() {
                recover_fee_payer_public_keys(&tx).context("failed to recover fee payer keys")?
            } else {
                Vec::new()
            };
            tracing::info!(
                senders = senders.len(),
                fee_payers = fee_payers.len(),
                "recovered public keys"
            );

            let keys = json!({
                "senders": senders.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "feePayers": fee_payers.iter().map(ToString::to_string).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&keys)?);
        }
        Commands::Sign(args) => {
            let mut tx = decode(&args.tx.raw)?;
            apply_chain_id(&mut tx, &args.chain).await?;

            let keyring = Keyring::from_key_str(&args.key).context("invalid signing key")?;
            tracing::info!(
                address = %address_hex(keyring.address()),
                fee_payer = args.fee_payer,
                index = ?args.index,
                "signing transaction"
            );
            if args.fee_payer {
                sign_as_fee_payer(&mut tx, &keyring, args.index)
                    .context("fee payer signing failed")?;
            } else {
                sign(&mut tx, &keyring, args.index).context("signing failed")?;
            }
            println!("{}", tx.raw_transaction()?);
        }
        Commands::Combine(args) => {
            let (first, rest) = args
                .raws
                .split_first()
                .context("at least one raw transaction is required")?;
            let mut tx = decode(first)?;
            let combined = combine_signed_raw_transactions(&mut tx, rest)
                .context("failed to combine raw transactions")?;
            tracing::info!(
                blobs = args.raws.len(),
                signatures = tx.signatures().len(),
                fee_payer_signatures = tx.fee_payer_signatures().len(),
                "combined signatures"
            );
            println!("{}", combined);
        }
        Commands::Generate => {
            let keyring = Keyring::generate();
            let wallet_key = keyring.klaytn_wallet_key()?;
            let generated = json!({
                "address": address_hex(keyring.address()),
                "klaytnWalletKey": wallet_key,
            });
            println!("{}", serde_json::to_string_pretty(&generated)?);
        }
    }

    Ok(())
}

fn decode(raw: &str) -> Result<Transaction> {
    Transaction::decode_hex(raw)
        .with_context(|| format!("failed to decode raw transaction {}", abbreviate(raw)))
}

/// Raw transactions never carry a chain id, so it comes from the command line.
async fn apply_chain_id(tx: &mut Transaction, chain: &ChainArgs) -> Result<()> {
    let chain_id = chain.resolved_chain_id();
    let remote = FixedValues::new().with_chain_id(U256::from(chain_id));
    fill_transaction(tx, &remote)
        .await
        .with_context(|| format!("failed to apply chain id {}", chain_id))?;
    Ok(())
}

fn abbreviate(raw: &str) -> String {
    let head: String = raw.chars().take(18).collect();
    if head.len() < raw.len() {
        format!("{}...", head)
    } else {
        head
    }
}
