//! Market data module.
//!
//! This module handles:
//! - The quote source abstraction
//! - HTTP order book client
//! - Normalization of exchange-specific response bodies
//! - Mock source for testing

pub mod client;
pub mod mock;
pub mod normalize;
pub mod source;

pub use client::QuoteClient;
pub use mock::{MockBook, MockBookBuilder, MockQuoteSource};
pub use normalize::normalize_body;
pub use source::QuoteSource;
