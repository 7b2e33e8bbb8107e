//! Solana queries.

use anyhow::{bail, Context, Result};
use txops_config::Config;
use txops_delivery::{PollOutcome, SolanaDelivery};
use txops_types::units;

pub async fn balance(config: &Config, address: &str) -> Result<()> {
	let client = SolanaDelivery::new(config.solana.rpc_url.clone());

	let lamports = client.balance(address).await?;

	println!("Address: {}", address);
	println!(
		"Balance: {} lamports ({} SOL)",
		lamports,
		units::lamports_to_sol(lamports)
	);
	Ok(())
}

pub async fn status(config: &Config, signature: &str) -> Result<()> {
	let client = SolanaDelivery::new(config.solana.rpc_url.clone());
	let hash = SolanaDelivery::parse_signature(signature)?;

	let poller = super::poller(config);
	match poller.wait(&client, &hash).await {
		PollOutcome::Confirmed(receipt) => {
			println!(
				"Finalized in slot {} ({})",
				receipt.block_number,
				if receipt.success { "success" } else { "failed" }
			);
			Ok(())
		}
		PollOutcome::TimedOut => {
			bail!("Timed out waiting for finalization; the transaction may still land")
		}
		PollOutcome::Failed(err) => Err(err).context("Error while checking signature status"),
	}
}
