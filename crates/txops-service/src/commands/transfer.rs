//! Signed transfer flows.
//!
//! Straight-line glue: fill nonce and gas from chain queries, sign through
//! the account service, broadcast, then hand off to the confirmation poller
//! for a single terminal outcome.

use alloy::primitives::{Address as AlloyAddress, U256};
use anyhow::{bail, Context, Result};
use tracing::warn;
use txops_account::{AccountService, LocalWallet};
use txops_config::Config;
use txops_delivery::encoders::erc20;
use txops_delivery::{apply_gas_buffer, AlloyDelivery, DeliveryInterface, PollOutcome};
use txops_types::{units, Address, Transaction};

pub async fn native(config: &Config, to: &str, amount_eth: &str) -> Result<()> {
	let delivery = super::evm_delivery(config)?;
	let account = account(config)?;
	let to = Address::from_hex(to).context("Invalid recipient address")?;
	let value = units::eth_to_wei(amount_eth)?;

	let tx = build_transfer(
		config,
		&delivery,
		&account,
		to,
		Vec::new(),
		value,
		config.gas.native_buffer_percent,
		config.gas.native_fallback_limit,
	)
	.await?;

	submit_and_confirm(config, &delivery, &account, tx).await
}

pub async fn token(
	config: &Config,
	token_flag: Option<&str>,
	to: &str,
	amount: u64,
) -> Result<()> {
	let delivery = super::evm_delivery(config)?;
	let account = account(config)?;
	let token = super::resolve_token(config, token_flag)?;
	let to = Address::from_hex(to).context("Invalid recipient address")?;

	let data = erc20::transfer_calldata(AlloyAddress::from_slice(&to.0), U256::from(amount));

	// Token transfers carry no native value; everything moves in calldata
	let tx = build_transfer(
		config,
		&delivery,
		&account,
		token,
		data,
		U256::ZERO,
		config.gas.token_buffer_percent,
		config.gas.token_fallback_limit,
	)
	.await?;

	submit_and_confirm(config, &delivery, &account, tx).await
}

fn account(config: &Config) -> Result<AccountService> {
	let wallet = LocalWallet::new(&config.evm.private_key).context("Failed to create wallet")?;
	Ok(AccountService::new(Box::new(wallet)))
}

#[allow(clippy::too_many_arguments)]
async fn build_transfer(
	config: &Config,
	delivery: &AlloyDelivery,
	account: &AccountService,
	to: Address,
	data: Vec<u8>,
	value: U256,
	buffer_percent: u64,
	fallback_limit: u64,
) -> Result<Transaction> {
	let from = account.get_address().await?;
	let nonce = delivery.pending_nonce(&from).await?;
	let gas_price = delivery.gas_price().await?;

	let mut tx = Transaction {
		to: Some(to),
		data,
		value,
		chain_id: config.evm.chain_id,
		nonce: Some(nonce),
		gas_limit: None,
		gas_price: Some(gas_price),
	};

	let gas_limit = match delivery.estimate_gas(&tx).await {
		Ok(estimate) => apply_gas_buffer(estimate, buffer_percent),
		Err(err) => {
			warn!(
				"Gas estimation failed, using fallback limit {}: {}",
				fallback_limit, err
			);
			fallback_limit
		}
	};
	tx.gas_limit = Some(gas_limit);

	Ok(tx)
}

async fn submit_and_confirm(
	config: &Config,
	delivery: &AlloyDelivery,
	account: &AccountService,
	tx: Transaction,
) -> Result<()> {
	let signature = account.sign(&tx).await?;
	let hash = delivery.submit(tx, &signature).await?;

	println!("Transfer initiated! Transaction hash: {}", hash);

	let poller = super::poller(config);
	match poller.wait(delivery, &hash).await {
		PollOutcome::Confirmed(receipt) => {
			println!("Transaction confirmed in block #{}", receipt.block_number);
			println!("Gas used: {}", receipt.gas_used);
			if !receipt.success {
				bail!("Transaction reverted on chain");
			}
			Ok(())
		}
		PollOutcome::TimedOut => {
			bail!("Timed out waiting for confirmation; the transaction may still be pending")
		}
		PollOutcome::Failed(err) => {
			Err(err).context("Error while waiting for confirmation")
		}
	}
}
