//! Reporting module.
//!
//! This module handles:
//! - Computing and rendering one cycle's ratios
//! - Pacing cycles with a cancellable ticker

pub mod cycle;
pub mod reporter;
pub mod ticker;

pub use cycle::{CycleReport, DIVIDER};
pub use reporter::{Reporter, SINGLE_OFFER};
pub use ticker::{IntervalTicker, Ticker};
