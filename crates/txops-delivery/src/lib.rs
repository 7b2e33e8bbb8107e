//! Chain client capabilities and the confirmation poller.
//!
//! This crate defines the interfaces consumed by the transfer and query
//! flows: `ReceiptSource` (the one capability the confirmation poller needs)
//! and `DeliveryInterface` (submission and balance lookups). Concrete
//! implementations live under `implementations`.

use alloy::primitives::U256;
use async_trait::async_trait;
use thiserror::Error;
use txops_types::{Address, Signature, Transaction, TransactionHash, TransactionReceipt};

pub mod encoders;
pub mod implementations;
mod poller;

pub use implementations::evm::AlloyDelivery;
pub use implementations::solana::SolanaDelivery;
pub use poller::{ConfirmationPoller, PollOutcome, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};

#[derive(Debug, Error)]
pub enum DeliveryError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Invalid transaction: {0}")]
	InvalidTransaction(String),
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
}

/// Receipt lookup capability.
///
/// `Ok(None)` means the transaction is not yet included in a block, the one
/// transient condition worth retrying. Any `Err` is a terminal failure of
/// the lookup itself (transport failure, malformed identifier) and is never
/// retried by the poller.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
	async fn receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionReceipt>, DeliveryError>;
}

/// Chain client capability for submitting transactions and reading balances.
///
/// Implementations are externally synchronized; callers may share one behind
/// an `Arc` without additional locking.
#[async_trait]
pub trait DeliveryInterface: ReceiptSource {
	/// Broadcasts an already-signed transaction and returns its hash.
	///
	/// Broadcasting never mutates the transaction; repeated submission of
	/// the same signed payload yields the same hash.
	async fn submit(
		&self,
		tx: Transaction,
		signature: &Signature,
	) -> Result<TransactionHash, DeliveryError>;

	/// Returns the native-asset balance of an address in base units.
	async fn balance(&self, address: &Address) -> Result<U256, DeliveryError>;
}

/// Adds a percentage buffer on top of a gas estimate.
pub fn apply_gas_buffer(estimate: u64, buffer_percent: u64) -> u64 {
	estimate.saturating_mul(100 + buffer_percent) / 100
}

/// Truncates a transaction hash for display.
pub(crate) fn truncate_hash(hash: &TransactionHash) -> String {
	let hash_str = hex::encode(&hash.0);
	if hash_str.len() <= 8 {
		hash_str
	} else {
		format!("{}..", &hash_str[..8])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_apply_gas_buffer() {
		assert_eq!(apply_gas_buffer(21_000, 10), 23_100);
		assert_eq!(apply_gas_buffer(100_000, 20), 120_000);
		assert_eq!(apply_gas_buffer(0, 10), 0);
		// Saturates instead of overflowing
		assert_eq!(apply_gas_buffer(u64::MAX, 10), u64::MAX / 100);
	}

	#[test]
	fn test_truncate_hash() {
		let hash = TransactionHash(vec![0xab; 32]);
		assert_eq!(truncate_hash(&hash), "abababab..");

		let short = TransactionHash(vec![0xab; 3]);
		assert_eq!(truncate_hash(&short), "ababab");
	}
}
