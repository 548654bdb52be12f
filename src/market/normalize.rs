//! Reshape exchange-specific order book bodies into [`Quote`]s.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::QuoteError;
use crate::exchange::{BookFormat, Endpoint};
use crate::orderbook::{PriceLevel, Quote};

/// Flat layout: `{"bids": [[price, quantity, ...], ...], "asks": [...]}`.
#[derive(Debug, Deserialize)]
struct FlatBook {
    bids: Vec<Vec<Value>>,
    asks: Vec<Vec<Value>>,
}

/// Nested layout envelope.
#[derive(Debug, Deserialize)]
struct NestedResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<NestedBook>,
}

#[derive(Debug, Deserialize)]
struct NestedBook {
    buy: Vec<NestedLevel>,
    sell: Vec<NestedLevel>,
}

/// Quantity comes before rate on the wire.
#[derive(Debug, Deserialize)]
struct NestedLevel {
    #[serde(rename = "Quantity")]
    quantity: Decimal,
    #[serde(rename = "Rate")]
    rate: Decimal,
}

impl NestedLevel {
    fn to_level(&self) -> PriceLevel {
        PriceLevel::new(self.rate, self.quantity)
    }
}

/// Normalize a raw response body according to the endpoint's format.
///
/// Only the first `depth` levels of each side are parsed and kept.
#[instrument(skip(endpoint, body), fields(exchange = %endpoint.name, format = %endpoint.format))]
pub fn normalize_body(endpoint: &Endpoint, body: &str, depth: usize) -> Result<Quote, QuoteError> {
    let quote = match endpoint.format {
        BookFormat::Flat => normalize_flat(&endpoint.name, body, depth)?,
        BookFormat::Nested => normalize_nested(&endpoint.name, body, depth)?,
    };

    debug!(
        bids = quote.bids.len(),
        asks = quote.asks.len(),
        best_bid = ?quote.best_bid(),
        best_ask = ?quote.best_ask(),
        "Normalized order book"
    );

    Ok(quote)
}

fn normalize_flat(exchange: &str, body: &str, depth: usize) -> Result<Quote, QuoteError> {
    let book: FlatBook = serde_json::from_str(body).map_err(|e| parse_error(exchange, e))?;

    let parse_side = |rows: &[Vec<Value>]| -> Result<Vec<PriceLevel>, QuoteError> {
        rows.iter()
            .take(depth)
            .map(|row| flat_level(exchange, row))
            .collect()
    };

    let bids = parse_side(&book.bids)?;
    let asks = parse_side(&book.asks)?;

    Ok(Quote::new(exchange, bids, asks))
}

fn normalize_nested(exchange: &str, body: &str, depth: usize) -> Result<Quote, QuoteError> {
    let response: NestedResponse =
        serde_json::from_str(body).map_err(|e| parse_error(exchange, e))?;

    if response.success == Some(false) {
        return Err(QuoteError::Rejected {
            exchange: exchange.to_string(),
            message: response.message.unwrap_or_default(),
        });
    }

    let book = response.result.ok_or_else(|| QuoteError::Parse {
        exchange: exchange.to_string(),
        reason: "missing `result` object".to_string(),
    })?;

    let bids = book.buy.iter().take(depth).map(NestedLevel::to_level).collect();
    let asks = book.sell.iter().take(depth).map(NestedLevel::to_level).collect();

    Ok(Quote::new(exchange, bids, asks))
}

fn flat_level(exchange: &str, row: &[Value]) -> Result<PriceLevel, QuoteError> {
    let field = |idx: usize, what: &str| {
        row.get(idx)
            .and_then(decimal_from_value)
            .ok_or_else(|| QuoteError::Parse {
                exchange: exchange.to_string(),
                reason: format!("level {row:?} has no numeric {what}"),
            })
    };

    Ok(PriceLevel::new(field(0, "price")?, field(1, "quantity")?))
}

/// Accept both JSON numbers and numeric strings.
fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn parse_error(exchange: &str, err: serde_json::Error) -> QuoteError {
    QuoteError::Parse {
        exchange: exchange.to_string(),
        reason: err.to_string(),
    }
}
