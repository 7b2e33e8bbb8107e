pub mod account;
pub mod chain;
pub mod delivery;
pub mod units;

pub use account::*;
pub use chain::*;
pub use delivery::*;
