//! ERC-20 call encoding and return decoding.
//!
//! Covers the minimal token surface the flows need: `transfer` for token
//! transfers, `balanceOf` and `name` for reads.

use crate::DeliveryError;
use alloy::primitives::{Address as AlloyAddress, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
	function transfer(address to, uint256 amount) external returns (bool);
	function balanceOf(address owner) external view returns (uint256);
	function name() external view returns (string);
}

/// Builds `transfer(to, amount)` calldata.
pub fn transfer_calldata(to: AlloyAddress, amount: U256) -> Vec<u8> {
	transferCall { to, amount }.abi_encode()
}

/// Builds `balanceOf(owner)` calldata.
pub fn balance_of_calldata(owner: AlloyAddress) -> Vec<u8> {
	balanceOfCall { owner }.abi_encode()
}

/// Builds `name()` calldata.
pub fn name_calldata() -> Vec<u8> {
	nameCall {}.abi_encode()
}

/// Decodes the return of a `balanceOf` call.
pub fn decode_balance(data: &[u8]) -> Result<U256, DeliveryError> {
	balanceOfCall::abi_decode_returns(data)
		.map_err(|e| DeliveryError::InvalidTransaction(format!("Failed to decode balanceOf: {}", e)))
}

/// Decodes the return of a `name` call.
pub fn decode_name(data: &[u8]) -> Result<String, DeliveryError> {
	nameCall::abi_decode_returns(data)
		.map_err(|e| DeliveryError::InvalidTransaction(format!("Failed to decode name: {}", e)))
}
