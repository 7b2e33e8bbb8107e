//! Chain client implementations.
//!
//! Available implementations:
//! - `evm`: Alloy-based client for EVM-compatible chains
//! - `solana`: Solana JSON-RPC client

pub mod evm;
pub mod solana;
