//! Unified error types for the arbitrage monitor.

use thiserror::Error;

use crate::orderbook::Side;

/// Unified error type for the arbitrage monitor.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Quote fetch/normalization error.
    #[error("quote error: {0}")]
    Quote(#[from] QuoteError),

    /// Arbitrage calculation error.
    #[error("arbitrage error: {0}")]
    Arbitrage(#[from] ArbitrageError),

    /// HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error (console output).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Metrics exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Errors raised while fetching and normalizing an order book.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Host unreachable or connection dropped.
    #[error("{exchange}: could not connect to API: {source}")]
    Transport {
        /// Exchange name.
        exchange: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout.
    #[error("{exchange}: request timed out")]
    Timeout {
        /// Exchange name.
        exchange: String,
    },

    /// Non-2xx HTTP status.
    #[error("{exchange}: HTTP {status} {reason}")]
    Status {
        /// Exchange name.
        exchange: String,
        /// Status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Body could not be decoded into an order book.
    #[error("{exchange}: failed to parse order book: {reason}")]
    Parse {
        /// Exchange name.
        exchange: String,
        /// What went wrong.
        reason: String,
    },

    /// API answered 2xx but flagged the request as unsuccessful.
    #[error("{exchange}: request rejected: {message}")]
    Rejected {
        /// Exchange name.
        exchange: String,
        /// Upstream message.
        message: String,
    },

    /// Template produced something that is not a URL.
    #[error("{exchange}: invalid request url {url}: {source}")]
    InvalidUrl {
        /// Exchange name.
        exchange: String,
        /// The rendered URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

impl QuoteError {
    /// Short machine-readable classification, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::Transport { .. } => "transport",
            QuoteError::Timeout { .. } => "timeout",
            QuoteError::Status { .. } => "status",
            QuoteError::Parse { .. } => "parse",
            QuoteError::Rejected { .. } => "rejected",
            QuoteError::InvalidUrl { .. } => "invalid_url",
        }
    }

    /// Exchange the failed request was addressed to.
    pub fn exchange(&self) -> &str {
        match self {
            QuoteError::Transport { exchange, .. }
            | QuoteError::Timeout { exchange }
            | QuoteError::Status { exchange, .. }
            | QuoteError::Parse { exchange, .. }
            | QuoteError::Rejected { exchange, .. }
            | QuoteError::InvalidUrl { exchange, .. } => exchange,
        }
    }

    /// Classify a reqwest failure.
    pub(crate) fn from_reqwest(exchange: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QuoteError::Timeout {
                exchange: exchange.to_string(),
            }
        } else if err.is_decode() {
            QuoteError::Parse {
                exchange: exchange.to_string(),
                reason: err.to_string(),
            }
        } else {
            QuoteError::Transport {
                exchange: exchange.to_string(),
                source: err,
            }
        }
    }
}

/// Arbitrage calculation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArbitrageError {
    /// Quote for one of the venues could not be fetched this cycle.
    #[error("no quote available for {exchange}")]
    QuoteUnavailable {
        /// Exchange name.
        exchange: String,
    },

    /// Order book side has no levels.
    #[error("{exchange} has no {side} in its order book")]
    EmptyBook {
        /// Exchange name.
        exchange: String,
        /// Side that was empty.
        side: Side,
    },

    /// Fee-adjusted cost is zero, so profit percent is undefined.
    #[error("zero trade cost buying at {exchange}")]
    ZeroCost {
        /// Exchange the buy leg would execute on.
        exchange: String,
    },

    /// Prices or quantities too extreme for `Decimal` arithmetic.
    #[error("arithmetic overflow pricing {buy} -> {sell}")]
    Overflow {
        /// Exchange of the buy leg.
        buy: String,
        /// Exchange of the sell leg.
        sell: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, MonitorError>;
