use async_trait::async_trait;
use thiserror::Error;
use txops_types::{Address, Signature, Transaction};

pub mod implementations;

pub use implementations::local::LocalWallet;

#[derive(Debug, Error)]
pub enum AccountError {
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Signing capability consumed by the transfer flows.
///
/// Implementations own key material and produce signatures for unsigned
/// transaction fields; everything else (nonce, gas) is filled by the caller
/// before signing.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	async fn address(&self) -> Result<Address, AccountError>;
	async fn sign_transaction(&self, tx: &Transaction) -> Result<Signature, AccountError>;
	async fn sign_message(&self, message: &[u8]) -> Result<Signature, AccountError>;
}

pub struct AccountService {
	provider: Box<dyn AccountInterface>,
}

impl AccountService {
	pub fn new(provider: Box<dyn AccountInterface>) -> Self {
		Self { provider }
	}

	pub async fn get_address(&self) -> Result<Address, AccountError> {
		self.provider.address().await
	}

	pub async fn sign(&self, tx: &Transaction) -> Result<Signature, AccountError> {
		self.provider.sign_transaction(tx).await
	}
}
