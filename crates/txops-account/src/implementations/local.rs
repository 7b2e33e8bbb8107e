//! Local private key wallet.
//!
//! This module provides a concrete implementation of the AccountInterface
//! trait over a locally held private key, using Alloy's signer. Suitable for
//! development and testnet use where key management simplicity is preferred.

use crate::{AccountError, AccountInterface};
use alloy::consensus::TxLegacy;
use alloy::network::TxSigner;
use alloy::primitives::{Address as AlloyAddress, Bytes, TxKind};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;
use txops_types::{Address, Signature, Transaction};

/// Local wallet implementation using Alloy's signer.
pub struct LocalWallet {
	/// The underlying Alloy signer that handles cryptographic operations.
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a new LocalWallet from a hex-encoded private key.
	///
	/// The private key should be provided as a hex string (with or without 0x prefix).
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}
}

#[async_trait]
impl AccountInterface for LocalWallet {
	async fn address(&self) -> Result<Address, AccountError> {
		let alloy_address = self.signer.address();
		Ok(Address(alloy_address.as_slice().to_vec()))
	}

	async fn sign_transaction(&self, tx: &Transaction) -> Result<Signature, AccountError> {
		let to = if let Some(to_addr) = &tx.to {
			if to_addr.0.len() != 20 {
				return Err(AccountError::SigningFailed(
					"Invalid address length".to_string(),
				));
			}
			let mut addr_bytes = [0u8; 20];
			addr_bytes.copy_from_slice(&to_addr.0);
			TxKind::Call(AlloyAddress::from(addr_bytes))
		} else {
			TxKind::Create
		};

		let mut legacy_tx = TxLegacy {
			chain_id: Some(tx.chain_id),
			nonce: tx.nonce.unwrap_or(0),
			gas_price: tx.gas_price.unwrap_or(0),
			gas_limit: tx.gas_limit.unwrap_or(0),
			to,
			value: tx.value,
			input: Bytes::from(tx.data.clone()),
		};

		let signature = self
			.signer
			.sign_transaction(&mut legacy_tx)
			.await
			.map_err(|e| {
				AccountError::SigningFailed(format!("Failed to sign transaction: {}", e))
			})?;

		Ok(signature.into())
	}

	async fn sign_message(&self, message: &[u8]) -> Result<Signature, AccountError> {
		// Alloy handles EIP-191 prefixing internally
		let signature =
			self.signer.sign_message(message).await.map_err(|e| {
				AccountError::SigningFailed(format!("Failed to sign message: {}", e))
			})?;

		Ok(signature.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::U256;

	// Well-known development key, never funded on any real network.
	const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[tokio::test]
	async fn test_address_derivation() {
		let wallet = LocalWallet::new(DEV_KEY).unwrap();
		let address = wallet.address().await.unwrap();
		assert_eq!(
			address.to_string(),
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
	}

	#[tokio::test]
	async fn test_sign_transaction_produces_65_byte_signature() {
		let wallet = LocalWallet::new(DEV_KEY).unwrap();
		let tx = Transaction {
			to: Some(Address(vec![0x22; 20])),
			data: vec![],
			value: U256::from(1u64),
			chain_id: 11155111,
			nonce: Some(0),
			gas_limit: Some(21_000),
			gas_price: Some(1_000_000_000),
		};

		let signature = wallet.sign_transaction(&tx).await.unwrap();
		assert_eq!(signature.0.len(), 65);
		let v = signature.0[64];
		assert!(v == 27 || v == 28);
	}

	#[test]
	fn test_invalid_key_rejected() {
		assert!(LocalWallet::new("0x1234").is_err());
		assert!(LocalWallet::new("not hex at all").is_err());
	}
}
