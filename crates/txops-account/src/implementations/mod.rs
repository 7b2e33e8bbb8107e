//! Account provider implementations.

pub mod local;
