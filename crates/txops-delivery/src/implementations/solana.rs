//! Solana RPC client.
//!
//! Balance lookups at finalized commitment, plus a signature-status receipt
//! view so the confirmation poller can observe Solana transactions with the
//! same retry contract as EVM ones.

use crate::{DeliveryError, ReceiptSource};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature as SolanaSignature;
use std::str::FromStr;
use txops_types::{TransactionHash, TransactionReceipt};

pub struct SolanaDelivery {
	client: RpcClient,
}

impl SolanaDelivery {
	pub fn new(rpc_url: impl Into<String>) -> Self {
		Self {
			client: RpcClient::new_with_commitment(rpc_url.into(), CommitmentConfig::finalized()),
		}
	}

	/// Parses a base58 transaction signature into a poller-compatible hash.
	pub fn parse_signature(signature: &str) -> Result<TransactionHash, DeliveryError> {
		let sig = SolanaSignature::from_str(signature).map_err(|e| {
			DeliveryError::InvalidTransaction(format!("Invalid signature: {}", e))
		})?;
		Ok(TransactionHash(sig.as_ref().to_vec()))
	}

	/// Account balance in lamports at finalized commitment.
	pub async fn balance(&self, address: &str) -> Result<u64, DeliveryError> {
		let pubkey = Pubkey::from_str(address)
			.map_err(|e| DeliveryError::InvalidAddress(format!("Invalid pubkey: {}", e)))?;

		self.client
			.get_balance(&pubkey)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get balance: {}", e)))
	}
}

#[async_trait]
impl ReceiptSource for SolanaDelivery {
	async fn receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionReceipt>, DeliveryError> {
		let sig = SolanaSignature::try_from(hash.0.as_slice()).map_err(|_| {
			DeliveryError::InvalidTransaction(format!(
				"Expected 64-byte signature, got {} bytes",
				hash.0.len()
			))
		})?;

		let statuses = self
			.client
			.get_signature_statuses(&[sig])
			.await
			.map_err(|e| {
				DeliveryError::Network(format!("Failed to get signature status: {}", e))
			})?;

		let status = match statuses.value.into_iter().next().flatten() {
			Some(status) => status,
			None => return Ok(None),
		};

		// Only a finalized status counts as a receipt; anything weaker is
		// still "not yet mined" from the poller's point of view.
		if !status.satisfies_commitment(CommitmentConfig::finalized()) {
			return Ok(None);
		}

		Ok(Some(TransactionReceipt {
			hash: hash.clone(),
			block_number: status.slot,
			// Solana has no gas-used analogue on signature statuses
			gas_used: 0,
			success: status.err.is_none(),
		}))
	}
}
