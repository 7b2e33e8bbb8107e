//! Configuration types.

use serde::{Deserialize, Serialize};

/// Complete process configuration.
///
/// Constructed once at process entry by the `ConfigLoader` and passed by
/// reference into whichever component needs it. There is no ambient global
/// configuration state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// EVM chain settings
	pub evm: EvmConfig,
	/// Solana settings
	#[serde(default)]
	pub solana: SolanaConfig,
	/// Gas estimation tuning
	#[serde(default)]
	pub gas: GasConfig,
	/// Confirmation polling settings
	#[serde(default)]
	pub confirmation: ConfirmationConfig,
}

/// EVM chain connection and credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmConfig {
	/// HTTP RPC endpoint URL
	pub rpc_url: String,
	/// Chain ID for replay protection (e.g. 11155111 for Sepolia)
	pub chain_id: u64,
	/// Hex-encoded private key used for signing transfers
	pub private_key: String,
	/// ERC-20 token contract address for token commands
	pub token_address: Option<String>,
}

/// Solana connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolanaConfig {
	/// RPC endpoint URL
	pub rpc_url: String,
}

impl Default for SolanaConfig {
	fn default() -> Self {
		Self {
			rpc_url: "https://api.devnet.solana.com".to_string(),
		}
	}
}

/// Gas estimation tuning.
///
/// The buffer percentages and fallback limits are chain-specific tuning
/// values with no derivation beyond operational experience; they are
/// configuration defaults, not contracts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GasConfig {
	/// Percentage added on top of the estimated gas for native transfers
	pub native_buffer_percent: u64,
	/// Percentage added on top of the estimated gas for token transfers
	pub token_buffer_percent: u64,
	/// Gas limit used when estimation fails for a native transfer
	pub native_fallback_limit: u64,
	/// Gas limit used when estimation fails for a token transfer
	pub token_fallback_limit: u64,
}

impl Default for GasConfig {
	fn default() -> Self {
		Self {
			native_buffer_percent: 10,
			token_buffer_percent: 20,
			native_fallback_limit: 21_000,
			token_fallback_limit: 100_000,
		}
	}
}

/// Confirmation polling settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
	/// Overall deadline for a poll invocation, in seconds
	pub timeout_secs: u64,
	/// Delay between consecutive receipt lookups, in seconds
	pub poll_interval_secs: u64,
}

impl Default for ConfirmationConfig {
	fn default() -> Self {
		Self {
			timeout_secs: 180,
			poll_interval_secs: 5,
		}
	}
}
