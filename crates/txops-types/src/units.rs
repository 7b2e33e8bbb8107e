//! Denomination conversions.
//!
//! Pure arithmetic between base units (wei, lamports) and display units
//! (ETH, SOL). Conversions to display units use `rust_decimal` so they are
//! exact rather than lossy floating point.

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[derive(Debug, Error)]
pub enum UnitsError {
	#[error("Invalid amount: {0}")]
	InvalidAmount(String),
}

/// Converts a decimal ETH amount (e.g. "1.5") to wei.
pub fn eth_to_wei(amount: &str) -> Result<U256, UnitsError> {
	parse_ether(amount).map_err(|e| UnitsError::InvalidAmount(e.to_string()))
}

/// Formats a wei amount as a decimal ETH string.
pub fn wei_to_eth(wei: U256) -> String {
	format_ether(wei)
}

/// Converts lamports to SOL.
pub fn lamports_to_sol(lamports: u64) -> Decimal {
	Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL)
}

/// Converts a decimal SOL amount to lamports.
///
/// Returns an error for negative amounts or amounts with sub-lamport
/// precision.
pub fn sol_to_lamports(sol: Decimal) -> Result<u64, UnitsError> {
	let lamports = sol * Decimal::from(LAMPORTS_PER_SOL);
	if lamports.fract() != Decimal::ZERO {
		return Err(UnitsError::InvalidAmount(format!(
			"{} has sub-lamport precision",
			sol
		)));
	}
	lamports
		.to_u64()
		.ok_or_else(|| UnitsError::InvalidAmount(format!("{} out of range", sol)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_eth_wei_conversion() {
		let one_eth = eth_to_wei("1").unwrap();
		assert_eq!(one_eth, U256::from(10u64).pow(U256::from(18u64)));
		assert_eq!(wei_to_eth(one_eth), "1.000000000000000000");

		let half = eth_to_wei("0.5").unwrap();
		assert_eq!(half, one_eth / U256::from(2u64));
	}

	#[test]
	fn test_eth_to_wei_rejects_garbage() {
		assert!(eth_to_wei("not-a-number").is_err());
	}

	#[test]
	fn test_lamports_to_sol() {
		assert_eq!(
			lamports_to_sol(1_500_000_000),
			"1.5".parse::<Decimal>().unwrap()
		);
		assert_eq!(lamports_to_sol(1), "0.000000001".parse::<Decimal>().unwrap());
		assert_eq!(lamports_to_sol(0), Decimal::ZERO);
	}

	#[test]
	fn test_sol_to_lamports() {
		let sol = "2.25".parse::<Decimal>().unwrap();
		assert_eq!(sol_to_lamports(sol).unwrap(), 2_250_000_000);

		let too_precise = "0.0000000001".parse::<Decimal>().unwrap();
		assert!(sol_to_lamports(too_precise).is_err());

		let negative = "-1".parse::<Decimal>().unwrap();
		assert!(sol_to_lamports(negative).is_err());
	}
}
