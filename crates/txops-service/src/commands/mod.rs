//! CLI command implementations.

pub mod query;
pub mod solana;
pub mod transfer;

use anyhow::{Context, Result};
use std::time::Duration;
use txops_config::Config;
use txops_delivery::{AlloyDelivery, ConfirmationPoller};
use txops_types::Address;

/// Builds the EVM client from configuration.
pub(crate) fn evm_delivery(config: &Config) -> Result<AlloyDelivery> {
	AlloyDelivery::new(&config.evm.rpc_url, config.evm.chain_id)
		.context("Failed to create EVM client")
}

/// Builds the confirmation poller from configuration.
pub(crate) fn poller(config: &Config) -> ConfirmationPoller {
	ConfirmationPoller::new(
		Duration::from_secs(config.confirmation.timeout_secs),
		Duration::from_secs(config.confirmation.poll_interval_secs),
	)
}

/// Resolves a token address from a flag or the configured default.
pub(crate) fn resolve_token(config: &Config, flag: Option<&str>) -> Result<Address> {
	let raw = flag
		.map(str::to_string)
		.or_else(|| config.evm.token_address.clone())
		.context("No token address given and none configured")?;
	Address::from_hex(&raw).context("Invalid token address")
}
