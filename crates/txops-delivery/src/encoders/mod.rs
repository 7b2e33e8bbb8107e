//! Contract call encoding.

pub mod erc20;
