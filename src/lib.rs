//! Cross-exchange BTC spread and arbitrage monitor.
//!
//! Polls the order books of two exchanges that expose differently shaped
//! JSON, normalizes them to `[price, quantity]` levels and prints spread and
//! arbitrage ratios on a fixed interval.
//!
//! # Arbitrage ratio
//!
//! Buying at one venue's best ask and selling into the other's best bid:
//!
//! ```text
//! Ask at A:  90.00  (qty 2)
//! Bid at B: 100.00  (qty 3)
//! ─────────────────────
//! Ratio:    (100 - 90) / 100 = 10.00%
//! Fees:     cost 90 * 1.043 * 2 = 187.74, proceeds (100 - 0.0005) * 2 = 199.999
//! Profit:   12.26 (6.53%)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`exchange`]: Endpoint descriptions and registry
//! - [`market`]: Order book fetching and normalization
//! - [`orderbook`]: Normalized quote types
//! - [`arbitrage`]: Ratio and fee-adjusted profit calculations
//! - [`report`]: Per-cycle report and the reporting loop
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod arbitrage;
pub mod config;
pub mod error;
pub mod exchange;
pub mod market;
pub mod metrics;
pub mod orderbook;
pub mod report;
pub mod utils;

pub use config::Config;
pub use error::{MonitorError, Result};
