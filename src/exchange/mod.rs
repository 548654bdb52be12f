//! Exchange module.
//!
//! This module handles:
//! - Endpoint descriptions (URL template, fees, response format)
//! - The registry of monitored exchanges

pub mod endpoint;
pub mod registry;

pub use endpoint::{AssetPair, BookFormat, Endpoint};
pub use registry::{Registry, BITBAY, BITTREX};
