//! Normalized order book types shared by every exchange.

use rust_decimal::Decimal;
use strum::{Display, EnumString};

/// Side of the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// Buy orders, best (highest) first.
    Bids,
    /// Sell orders, best (lowest) first.
    Asks,
}

/// Single price level: `[price, quantity]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price at this level.
    pub price: Decimal,
    /// Quantity available at this price.
    pub quantity: Decimal,
}

impl PriceLevel {
    /// Create a new price level.
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }
}

/// Top of an exchange's order book, already reshaped into the common layout.
///
/// Levels keep the order the exchange returned them in. Both supported APIs
/// send bids descending and asks ascending, so the first entry is the best one.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Exchange this quote came from.
    pub exchange: String,
    /// Bid levels.
    pub bids: Vec<PriceLevel>,
    /// Ask levels.
    pub asks: Vec<PriceLevel>,
}

impl Quote {
    /// Create a new quote.
    pub fn new(exchange: impl Into<String>, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self {
            exchange: exchange.into(),
            bids,
            asks,
        }
    }

    /// Levels on one side.
    pub fn levels(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::Bids => &self.bids,
            Side::Asks => &self.asks,
        }
    }

    /// First level on one side.
    pub fn best(&self, side: Side) -> Option<&PriceLevel> {
        self.levels(side).first()
    }

    /// Get the best bid price.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.best(Side::Bids).map(|l| l.price)
    }

    /// Get the best ask price.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.best(Side::Asks).map(|l| l.price)
    }

    /// Keep only the first `depth` levels on each side.
    pub fn truncate(&mut self, depth: usize) {
        self.bids.truncate(depth);
        self.asks.truncate(depth);
    }
}
