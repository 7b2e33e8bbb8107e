//! Alloy-based EVM chain client.
//!
//! Implements the delivery interfaces for EVM-compatible chains plus the
//! chain inspection queries (blocks, transactions, ERC-20 reads) the CLI
//! flows use. Transactions are signed by the caller and broadcast raw.

use crate::encoders::erc20;
use crate::{truncate_hash, DeliveryError, DeliveryInterface, ReceiptSource};
use alloy::consensus::Transaction as _;
use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{
	Address as AlloyAddress, Bytes, FixedBytes, Signature as AlloySignature, TxKind, U256,
};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use async_trait::async_trait;
use std::sync::Arc;
use txops_types::{
	Address, BlockInfo, Signature, Transaction, TransactionHash, TransactionInfo,
	TransactionReceipt,
};

/// EVM chain client over an HTTP JSON-RPC provider.
pub struct AlloyDelivery {
	/// The Alloy provider for blockchain interaction.
	provider: Arc<dyn Provider + Send + Sync>,
	/// The chain ID this client is configured for.
	chain_id: u64,
}

impl AlloyDelivery {
	/// Creates a new client for the given RPC endpoint and chain.
	pub fn new(rpc_url: &str, chain_id: u64) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().connect_http(url);

		Ok(Self {
			provider: Arc::new(provider),
			chain_id,
		})
	}

	pub fn chain_id(&self) -> u64 {
		self.chain_id
	}

	fn to_alloy_address(address: &Address) -> Result<AlloyAddress, DeliveryError> {
		if address.0.len() != 20 {
			return Err(DeliveryError::InvalidAddress(format!(
				"Expected 20-byte address, got {} bytes",
				address.0.len()
			)));
		}
		Ok(AlloyAddress::from_slice(&address.0))
	}

	fn to_fixed_hash(hash: &TransactionHash) -> Result<FixedBytes<32>, DeliveryError> {
		if hash.0.len() != 32 {
			return Err(DeliveryError::InvalidTransaction(format!(
				"Expected 32-byte transaction hash, got {} bytes",
				hash.0.len()
			)));
		}
		Ok(FixedBytes::from_slice(&hash.0))
	}

	/// Next nonce for an address, including pending transactions.
	pub async fn pending_nonce(&self, address: &Address) -> Result<u64, DeliveryError> {
		let addr = Self::to_alloy_address(address)?;
		self.provider
			.get_transaction_count(addr)
			.pending()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get nonce: {}", e)))
	}

	/// Suggested gas price in wei.
	pub async fn gas_price(&self) -> Result<u128, DeliveryError> {
		self.provider
			.get_gas_price()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get gas price: {}", e)))
	}

	/// Estimates the gas limit for a transaction.
	pub async fn estimate_gas(&self, tx: &Transaction) -> Result<u64, DeliveryError> {
		let request: TransactionRequest = tx.clone().into();
		self.provider
			.estimate_gas(request)
			.await
			.map_err(|e| DeliveryError::Network(format!("Gas estimation failed: {}", e)))
	}

	/// Block summary by number; `None` if the block does not exist yet.
	pub async fn block(&self, number: u64) -> Result<Option<BlockInfo>, DeliveryError> {
		let block = self
			.provider
			.get_block_by_number(BlockNumberOrTag::Number(number))
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get block: {}", e)))?;

		Ok(block.map(|block| BlockInfo {
			number: block.header.number,
			hash: TransactionHash(block.header.hash.0.to_vec()),
			timestamp: block.header.timestamp,
			transaction_count: block.transactions.len(),
		}))
	}

	/// Mined transaction details, with the sender recovered from the signed
	/// envelope.
	pub async fn transaction(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionInfo>, DeliveryError> {
		let tx_hash = Self::to_fixed_hash(hash)?;
		let tx = self
			.provider
			.get_transaction_by_hash(tx_hash)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get transaction: {}", e)))?;

		Ok(tx.map(|tx| TransactionInfo {
			hash: hash.clone(),
			from: Address(tx.inner.signer().as_slice().to_vec()),
			to: tx.inner.to().map(|to| Address(to.as_slice().to_vec())),
			value: tx.inner.value(),
			gas_limit: tx.inner.gas_limit(),
			gas_price: tx.inner.gas_price(),
			nonce: tx.inner.nonce(),
		}))
	}

	/// ERC-20 `name()` of a token contract.
	pub async fn erc20_name(&self, token: &Address) -> Result<String, DeliveryError> {
		let data = self.call_contract(token, erc20::name_calldata()).await?;
		erc20::decode_name(&data)
	}

	/// ERC-20 `balanceOf(owner)` in the token's base units.
	pub async fn erc20_balance(
		&self,
		token: &Address,
		owner: &Address,
	) -> Result<U256, DeliveryError> {
		let owner_addr = Self::to_alloy_address(owner)?;
		let data = self
			.call_contract(token, erc20::balance_of_calldata(owner_addr))
			.await?;
		erc20::decode_balance(&data)
	}

	async fn call_contract(
		&self,
		to: &Address,
		calldata: Vec<u8>,
	) -> Result<Vec<u8>, DeliveryError> {
		let to_addr = Self::to_alloy_address(to)?;
		let request = TransactionRequest {
			to: Some(TxKind::Call(to_addr)),
			input: TransactionInput {
				input: Some(Bytes::from(calldata)),
				data: None,
			},
			..Default::default()
		};

		let bytes = self
			.provider
			.call(request)
			.await
			.map_err(|e| DeliveryError::Network(format!("Contract call failed: {}", e)))?;
		Ok(bytes.to_vec())
	}

	/// Assembles a signed legacy envelope from unsigned fields and a
	/// detached signature.
	fn build_envelope(
		&self,
		tx: &Transaction,
		signature: &Signature,
	) -> Result<TxEnvelope, DeliveryError> {
		let sig = AlloySignature::from_raw(&signature.0)
			.map_err(|e| DeliveryError::InvalidTransaction(format!("Invalid signature: {}", e)))?;

		let to = match &tx.to {
			Some(to) => TxKind::Call(Self::to_alloy_address(to)?),
			None => TxKind::Create,
		};

		let legacy = TxLegacy {
			chain_id: Some(tx.chain_id),
			nonce: tx.nonce.unwrap_or(0),
			gas_price: tx.gas_price.unwrap_or(0),
			gas_limit: tx.gas_limit.unwrap_or(0),
			to,
			value: tx.value,
			input: Bytes::from(tx.data.clone()),
		};

		Ok(TxEnvelope::Legacy(legacy.into_signed(sig)))
	}
}

#[async_trait]
impl ReceiptSource for AlloyDelivery {
	async fn receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionReceipt>, DeliveryError> {
		let tx_hash = Self::to_fixed_hash(hash)?;

		let receipt = self
			.provider
			.get_transaction_receipt(tx_hash)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get receipt: {}", e)))?;

		Ok(receipt.map(|receipt| TransactionReceipt {
			hash: TransactionHash(receipt.transaction_hash.0.to_vec()),
			block_number: receipt.block_number.unwrap_or(0),
			gas_used: receipt.gas_used,
			success: receipt.status(),
		}))
	}
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	async fn submit(
		&self,
		tx: Transaction,
		signature: &Signature,
	) -> Result<TransactionHash, DeliveryError> {
		let envelope = self.build_envelope(&tx, signature)?;
		let encoded = envelope.encoded_2718();

		let pending = self
			.provider
			.send_raw_transaction(&encoded)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to send transaction: {}", e)))?;

		let tx_hash = TransactionHash(pending.tx_hash().0.to_vec());
		tracing::info!(tx_hash = %truncate_hash(&tx_hash), "Submitted transaction");

		Ok(tx_hash)
	}

	async fn balance(&self, address: &Address) -> Result<U256, DeliveryError> {
		let addr = Self::to_alloy_address(address)?;
		self.provider
			.get_balance(addr)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get balance: {}", e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rejects_invalid_rpc_url() {
		assert!(AlloyDelivery::new("not a url", 1).is_err());
	}

	#[test]
	fn test_rejects_short_address_and_hash() {
		assert!(matches!(
			AlloyDelivery::to_alloy_address(&Address(vec![1, 2, 3])),
			Err(DeliveryError::InvalidAddress(_))
		));
		assert!(matches!(
			AlloyDelivery::to_fixed_hash(&TransactionHash(vec![1, 2, 3])),
			Err(DeliveryError::InvalidTransaction(_))
		));
	}
}
