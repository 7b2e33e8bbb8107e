//! Transaction delivery types.
//!
//! This module defines types related to blockchain transaction submission
//! and monitoring, including transaction hashes and receipts.

use crate::account::ParseError;
use std::fmt;

/// Blockchain transaction hash representation.
///
/// Stores transaction hashes as raw bytes to support different blockchain
/// formats (32-byte EVM hashes, 64-byte Solana signatures).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionHash(pub Vec<u8>);

impl TransactionHash {
	/// Parses a hash from a hex string (with or without 0x prefix).
	pub fn from_hex(s: &str) -> Result<Self, ParseError> {
		let stripped = s.strip_prefix("0x").unwrap_or(s);
		Ok(TransactionHash(hex::decode(stripped)?))
	}
}

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Transaction receipt containing execution details.
///
/// Provides information about a transaction after it has been included in a
/// block. Does not exist until the network has mined the transaction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number (or slot) where the transaction was included.
	pub block_number: u64,
	/// Gas actually consumed by the transaction (0 where the chain has no
	/// gas-used analogue).
	pub gas_used: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
}
