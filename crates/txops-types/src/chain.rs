//! Chain inspection types.
//!
//! Plain views over blocks and transactions returned by chain queries, kept
//! independent of any particular RPC client's types.

use crate::account::Address;
use crate::delivery::TransactionHash;
use alloy::primitives::U256;

/// Summary of a mined block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
	/// Block number.
	pub number: u64,
	/// Block hash.
	pub hash: TransactionHash,
	/// Unix timestamp of the block.
	pub timestamp: u64,
	/// Number of transactions included in the block.
	pub transaction_count: usize,
}

/// Details of a mined transaction.
#[derive(Debug, Clone)]
pub struct TransactionInfo {
	/// Transaction hash.
	pub hash: TransactionHash,
	/// Sender, recovered from the signed envelope.
	pub from: Address,
	/// Recipient (None for contract creation).
	pub to: Option<Address>,
	/// Value transferred in the native currency's base unit.
	pub value: U256,
	/// Gas limit of the transaction.
	pub gas_limit: u64,
	/// Gas price in wei, if the transaction carries one.
	pub gas_price: Option<u128>,
	/// Sender nonce.
	pub nonce: u64,
}
