//! Quote source abstraction shared by the HTTP client and the mock.

use std::time::Instant;

use async_trait::async_trait;
use tracing::warn;

use crate::error::QuoteError;
use crate::exchange::Endpoint;
use crate::metrics;
use crate::orderbook::Quote;

/// Anything that can produce a normalized [`Quote`] for an endpoint.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch and normalize the order book, truncated to `depth` levels per side.
    async fn try_fetch_quote(
        &self,
        endpoint: &Endpoint,
        base_asset: &str,
        quote_asset: &str,
        depth: usize,
    ) -> Result<Quote, QuoteError>;

    /// Like [`try_fetch_quote`](Self::try_fetch_quote) but logs failures and yields `None`.
    async fn fetch_quote(
        &self,
        endpoint: &Endpoint,
        base_asset: &str,
        quote_asset: &str,
        depth: usize,
    ) -> Option<Quote> {
        let start = Instant::now();
        let result = self
            .try_fetch_quote(endpoint, base_asset, quote_asset, depth)
            .await;
        metrics::record_quote_fetch_latency(start, &endpoint.name);

        match result {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!(exchange = e.exchange(), kind = e.kind(), "Could not fetch order book: {}", e);
                metrics::inc_quote_fetch_failures(e.exchange(), e.kind());
                None
            }
        }
    }
}
