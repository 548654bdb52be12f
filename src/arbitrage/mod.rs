//! Arbitrage module.
//!
//! This module handles:
//! - Buy/sell spread ratios between two exchanges
//! - Cross-exchange arbitrage ratios
//! - Fee-adjusted profit of a round trip

pub mod calculator;
pub mod fees;

pub use calculator::{arbitrage_info, arbitrage_ratio, buy_sell_ratio, ArbitrageResult};
pub use fees::{apply_taker_fee, apply_transfer_fee};
