//! Read-only chain queries.

use anyhow::{Context, Result};
use txops_config::Config;
use txops_delivery::{DeliveryInterface, ReceiptSource};
use txops_types::{units, Address, TransactionHash};

pub async fn balance(config: &Config, address: &str) -> Result<()> {
	let delivery = super::evm_delivery(config)?;
	let address = Address::from_hex(address).context("Invalid address")?;

	let wei = delivery.balance(&address).await?;

	println!("Address: {}", address);
	println!("Balance: {} wei ({} ETH)", wei, units::wei_to_eth(wei));
	Ok(())
}

pub async fn token_info(
	config: &Config,
	token_flag: Option<&str>,
	holders: &[String],
) -> Result<()> {
	let delivery = super::evm_delivery(config)?;
	let token = super::resolve_token(config, token_flag)?;

	let name = delivery.erc20_name(&token).await?;
	println!("Token: {} ({})", name, token);

	for holder in holders {
		let holder = Address::from_hex(holder)
			.with_context(|| format!("Invalid holder address: {}", holder))?;
		let balance = delivery.erc20_balance(&token, &holder).await?;
		println!("  {}: {}", holder, balance);
	}
	Ok(())
}

pub async fn block(config: &Config, number: u64, tx: Option<&str>) -> Result<()> {
	let delivery = super::evm_delivery(config)?;

	match delivery.block(number).await? {
		Some(info) => {
			println!("Block Number: {}", info.number);
			println!("Block Hash: {}", info.hash);
			println!("Block Time: {}", info.timestamp);
			println!("Block Transactions: {}", info.transaction_count);
		}
		None => {
			println!("Block {} not found", number);
			return Ok(());
		}
	}

	if let Some(tx_hash) = tx {
		let hash = TransactionHash::from_hex(tx_hash).context("Invalid transaction hash")?;

		match delivery.transaction(&hash).await? {
			Some(tx) => {
				println!("Transaction Hash: {}", tx.hash);
				println!("From: {}", tx.from);
				println!(
					"To: {}",
					tx.to
						.map(|to| to.to_string())
						.unwrap_or_else(|| "(contract creation)".to_string())
				);
				println!("Value: {}", tx.value);
				println!("Gas: {}", tx.gas_limit);
				if let Some(gas_price) = tx.gas_price {
					println!("Gas Price: {}", gas_price);
				}
				println!("Nonce: {}", tx.nonce);
			}
			None => {
				println!("Transaction {} not found", hash);
				return Ok(());
			}
		}

		if let Some(receipt) = delivery.receipt(&hash).await? {
			println!("Status: confirmed in block #{}", receipt.block_number);
			println!("Gas used: {}", receipt.gas_used);
		}
	}

	Ok(())
}

pub async fn receipt(config: &Config, hash: &str) -> Result<()> {
	let delivery = super::evm_delivery(config)?;
	let hash = TransactionHash::from_hex(hash).context("Invalid transaction hash")?;

	match delivery.receipt(&hash).await? {
		Some(receipt) => {
			println!("Confirmed in block #{}", receipt.block_number);
			println!("Gas used: {}", receipt.gas_used);
			println!(
				"Status: {}",
				if receipt.success { "success" } else { "reverted" }
			);
		}
		None => println!("Transaction {} not yet mined", hash),
	}
	Ok(())
}
