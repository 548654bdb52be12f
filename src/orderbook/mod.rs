//! Order book module.
//!
//! Holds the exchange-neutral quote layout every normalizer produces.

pub mod types;

pub use types::{PriceLevel, Quote, Side};
