//! HTTP order book client.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::QuoteError;
use crate::exchange::Endpoint;
use crate::orderbook::Quote;

use super::normalize::normalize_body;
use super::source::QuoteSource;

/// Public order book client for the monitored exchanges.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
}

impl QuoteClient {
    /// Create a new client with the configured request timeout.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(config.http_timeout())
            .user_agent(concat!("cross-arb/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    #[instrument(skip(self, endpoint), fields(exchange = %endpoint.name))]
    async fn try_fetch_quote(
        &self,
        endpoint: &Endpoint,
        base_asset: &str,
        quote_asset: &str,
        depth: usize,
    ) -> Result<Quote, QuoteError> {
        let exchange = endpoint.name.as_str();
        let rendered = endpoint.request_url(base_asset, quote_asset);
        let url = url::Url::parse(&rendered).map_err(|source| QuoteError::InvalidUrl {
            exchange: exchange.to_string(),
            url: rendered.clone(),
            source,
        })?;

        debug!(url = %url, "Requesting order book");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| QuoteError::from_reqwest(exchange, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Status {
                exchange: exchange.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::from_reqwest(exchange, e))?;

        normalize_body(endpoint, &body, depth)
    }
}
