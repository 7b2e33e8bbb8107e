//! Account-related types shared across the workspace.
//!
//! This module defines types for blockchain addresses, signatures, and unsigned
//! transactions that flow between the account, delivery, and service crates.

use alloy::primitives::{Address as AlloyAddress, Bytes, Signature as AlloySignature, U256};
use alloy::rpc::types::TransactionRequest;
use std::fmt;
use thiserror::Error;

/// Errors produced when parsing addresses or hashes from user input.
#[derive(Debug, Error)]
pub enum ParseError {
	#[error("Invalid hex: {0}")]
	Hex(#[from] hex::FromHexError),
	#[error("Invalid length: expected {expected} bytes, got {actual}")]
	Length { expected: usize, actual: usize },
}

/// Blockchain address representation.
///
/// Stores addresses as raw bytes to support different blockchain formats.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Address(pub Vec<u8>);

impl Address {
	/// Parses a 20-byte EVM address from a hex string (with or without 0x prefix).
	pub fn from_hex(s: &str) -> Result<Self, ParseError> {
		let stripped = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(stripped)?;
		if bytes.len() != 20 {
			return Err(ParseError::Length {
				expected: 20,
				actual: bytes.len(),
			});
		}
		Ok(Address(bytes))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Cryptographic signature representation.
///
/// Stores signatures as raw bytes in the standard Ethereum format (r, s, v).
#[derive(Debug, Clone)]
pub struct Signature(pub Vec<u8>);

impl From<AlloySignature> for Signature {
	fn from(sig: AlloySignature) -> Self {
		// Convert to standard Ethereum signature format (r, s, v)
		let mut bytes = Vec::with_capacity(65);
		bytes.extend_from_slice(&sig.r().to_be_bytes::<32>());
		bytes.extend_from_slice(&sig.s().to_be_bytes::<32>());
		let v = if sig.v() { 28 } else { 27 };
		bytes.push(v);
		Signature(bytes)
	}
}

/// Unsigned blockchain transaction fields.
///
/// Contains everything needed to construct, sign, and submit a transaction.
/// Nonce and gas fields are optional so callers can fill them from chain
/// queries before signing.
#[derive(Debug, Clone)]
pub struct Transaction {
	/// Recipient address (None for contract creation).
	pub to: Option<Address>,
	/// Transaction data/calldata.
	pub data: Vec<u8>,
	/// Value to transfer in native currency.
	pub value: U256,
	/// Chain ID for replay protection.
	pub chain_id: u64,
	/// Transaction nonce.
	pub nonce: Option<u64>,
	/// Gas limit for transaction execution.
	pub gas_limit: Option<u64>,
	/// Legacy gas price.
	pub gas_price: Option<u128>,
}

/// Conversion from our Transaction type to Alloy's TransactionRequest.
impl From<Transaction> for TransactionRequest {
	fn from(tx: Transaction) -> Self {
		let to = tx.to.map(|to| {
			let mut addr_bytes = [0u8; 20];
			addr_bytes.copy_from_slice(&to.0[..20]);
			alloy::primitives::TxKind::Call(AlloyAddress::from(addr_bytes))
		});

		TransactionRequest {
			chain_id: Some(tx.chain_id),
			value: Some(tx.value),
			to,
			nonce: tx.nonce,
			gas: tx.gas_limit,
			gas_price: tx.gas_price,
			input: alloy::rpc::types::TransactionInput {
				input: Some(Bytes::from(tx.data)),
				data: None,
			},
			..Default::default()
		}
	}
}
