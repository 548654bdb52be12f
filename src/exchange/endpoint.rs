//! Per-exchange endpoint description.

use std::fmt;

use rust_decimal::Decimal;
use strum::{Display, EnumString};

/// Response layout an exchange's order book endpoint uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BookFormat {
    /// Top-level `bids`/`asks` arrays of `[price, quantity, ...]`.
    Flat,
    /// `result.buy`/`result.sell` arrays of `{"Quantity", "Rate"}` objects.
    Nested,
}

/// Asset pair being monitored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPair {
    /// Traded asset (e.g., BTC).
    pub base: String,
    /// Pricing currency (e.g., USD).
    pub quote: String,
}

impl AssetPair {
    /// Create a new asset pair.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

/// Static description of one exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// Identifying name (e.g., "BITBAY").
    pub name: String,
    /// Order book URL with `{base}` and `{quote}` placeholders.
    pub url_template: String,
    /// Proportional fee charged on executed trades.
    pub taker_fee_rate: Decimal,
    /// Flat fee deducted when moving the asset off this exchange.
    pub transfer_fee_rate: Decimal,
    /// Response layout.
    pub format: BookFormat,
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        taker_fee_rate: Decimal,
        transfer_fee_rate: Decimal,
        format: BookFormat,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            taker_fee_rate,
            transfer_fee_rate,
            format,
        }
    }

    /// Render the order book URL for an asset pair.
    ///
    /// Each exchange orders the pair differently; the template carries that.
    pub fn request_url(&self, base_asset: &str, quote_asset: &str) -> String {
        self.url_template
            .replace("{base}", base_asset)
            .replace("{quote}", quote_asset)
    }

    /// Render the order book URL for an [`AssetPair`].
    pub fn url_for(&self, pair: &AssetPair) -> String {
        self.request_url(&pair.base, &pair.quote)
    }
}
