//! Mock quote source for unit testing.
//!
//! Serves canned order books per exchange name without touching the network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::QuoteError;
use crate::exchange::Endpoint;
use crate::orderbook::{PriceLevel, Quote};

use super::source::QuoteSource;

/// Mock quote source for testing.
#[derive(Debug, Clone, Default)]
pub struct MockQuoteSource {
    /// Canned books by exchange name.
    books: Arc<Mutex<HashMap<String, MockBook>>>,
    /// Exchanges that answer with a 503.
    failing: Arc<Mutex<Vec<String>>>,
    /// Number of fetches served (successful or not).
    calls: Arc<Mutex<usize>>,
}

/// Canned order book for one exchange.
#[derive(Debug, Clone, Default)]
pub struct MockBook {
    /// Bid levels.
    pub bids: Vec<PriceLevel>,
    /// Ask levels.
    pub asks: Vec<PriceLevel>,
}

impl MockQuoteSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the book served for an exchange.
    pub fn set_book(&self, exchange: &str, book: MockBook) {
        self.books
            .lock()
            .unwrap()
            .insert(exchange.to_string(), book);
    }

    /// Make every fetch for `exchange` fail with a non-2xx status.
    pub fn fail(&self, exchange: &str) {
        self.failing.lock().unwrap().push(exchange.to_string());
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn try_fetch_quote(
        &self,
        endpoint: &Endpoint,
        _base_asset: &str,
        _quote_asset: &str,
        depth: usize,
    ) -> Result<Quote, QuoteError> {
        *self.calls.lock().unwrap() += 1;

        if self.failing.lock().unwrap().contains(&endpoint.name) {
            return Err(QuoteError::Status {
                exchange: endpoint.name.clone(),
                status: 503,
                reason: "Service Unavailable".to_string(),
            });
        }

        let book = self
            .books
            .lock()
            .unwrap()
            .get(&endpoint.name)
            .cloned()
            .unwrap_or_default();

        let mut quote = Quote::new(endpoint.name.clone(), book.bids, book.asks);
        quote.truncate(depth);
        Ok(quote)
    }
}

/// Builder for mock books.
#[derive(Debug, Default)]
pub struct MockBookBuilder {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl MockBookBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bid level.
    pub fn bid(mut self, price: Decimal, quantity: Decimal) -> Self {
        self.bids.push(PriceLevel::new(price, quantity));
        self
    }

    /// Add an ask level.
    pub fn ask(mut self, price: Decimal, quantity: Decimal) -> Self {
        self.asks.push(PriceLevel::new(price, quantity));
        self
    }

    /// Build the mock book, best levels first.
    pub fn build(mut self) -> MockBook {
        self.bids.sort_by(|a, b| b.price.cmp(&a.price));
        self.asks.sort_by(|a, b| a.price.cmp(&b.price));

        MockBook {
            bids: self.bids,
            asks: self.asks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::Registry;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn mock_serves_truncated_book() {
        let registry = Registry::default();
        let source = MockQuoteSource::new();
        source.set_book(
            &registry.primary.name,
            MockBookBuilder::new()
                .bid(dec!(99), dec!(1))
                .bid(dec!(100), dec!(2))
                .ask(dec!(101), dec!(1))
                .build(),
        );

        let quote = source
            .fetch_quote(&registry.primary, "BTC", "USD", 1)
            .await
            .unwrap();

        assert_eq!(quote.bids, vec![PriceLevel::new(dec!(100), dec!(2))]);
        assert_eq!(quote.best_ask(), Some(dec!(101)));
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn failing_exchange_yields_none() {
        let registry = Registry::default();
        let source = MockQuoteSource::new();
        source.fail(&registry.secondary.name);

        let quote = tokio_test::block_on(source.fetch_quote(&registry.secondary, "BTC", "USD", 1));

        assert!(quote.is_none());
        assert_eq!(source.calls(), 1);
    }
}
