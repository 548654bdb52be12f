//! Application configuration loaded from environment variables.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// Every field has a default, so an empty environment reproduces the stock
/// BITBAY/BITTREX BTC-USD setup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Asset Pair ===
    /// Traded asset (e.g., BTC).
    #[serde(default = "default_base_asset")]
    pub base_asset: String,

    /// Pricing currency (e.g., USD).
    #[serde(default = "default_quote_asset")]
    pub quote_asset: String,

    // === Polling ===
    /// Seconds between report cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_ms: u64,

    // === Exchanges ===
    /// BITBAY order book URL, with `{base}` and `{quote}` placeholders.
    #[serde(default = "default_bitbay_url")]
    pub bitbay_url_template: String,

    /// BITBAY taker fee rate.
    #[serde(default = "default_bitbay_taker_fee")]
    pub bitbay_taker_fee: Decimal,

    /// BITBAY flat transfer fee.
    #[serde(default = "default_bitbay_transfer_fee")]
    pub bitbay_transfer_fee: Decimal,

    /// BITTREX order book URL, with `{base}` and `{quote}` placeholders.
    #[serde(default = "default_bittrex_url")]
    pub bittrex_url_template: String,

    /// BITTREX taker fee rate.
    #[serde(default = "default_bittrex_taker_fee")]
    pub bittrex_taker_fee: Decimal,

    /// BITTREX flat transfer fee.
    #[serde(default = "default_bittrex_transfer_fee")]
    pub bittrex_transfer_fee: Decimal,

    // === Observability ===
    /// Serve Prometheus metrics.
    #[serde(default)]
    pub metrics_enabled: bool,

    /// Prometheus exporter port.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_base_asset() -> String {
    "BTC".to_string()
}

fn default_quote_asset() -> String {
    "USD".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_http_timeout() -> u64 {
    10_000
}

fn default_bitbay_url() -> String {
    "https://bitbay.net/API/Public/{base}{quote}/orderbook.json".to_string()
}

fn default_bitbay_taker_fee() -> Decimal {
    Decimal::new(43, 3) // 0.043
}

fn default_bitbay_transfer_fee() -> Decimal {
    Decimal::new(5, 4) // 0.0005
}

fn default_bittrex_url() -> String {
    "https://api.bittrex.com/api/v1.1/public/getorderbook?market={quote}-{base}&type=both"
        .to_string()
}

fn default_bittrex_taker_fee() -> Decimal {
    Decimal::new(25, 3) // 0.025
}

fn default_bittrex_transfer_fee() -> Decimal {
    Decimal::new(5, 3) // 0.005
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_asset: default_base_asset(),
            quote_asset: default_quote_asset(),
            poll_interval_secs: default_poll_interval(),
            http_timeout_ms: default_http_timeout(),
            bitbay_url_template: default_bitbay_url(),
            bitbay_taker_fee: default_bitbay_taker_fee(),
            bitbay_transfer_fee: default_bitbay_transfer_fee(),
            bittrex_url_template: default_bittrex_url(),
            bittrex_taker_fee: default_bittrex_taker_fee(),
            bittrex_transfer_fee: default_bittrex_transfer_fee(),
            metrics_enabled: false,
            metrics_port: default_metrics_port(),
            rust_log: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_asset.trim().is_empty() || self.quote_asset.trim().is_empty() {
            return Err("BASE_ASSET and QUOTE_ASSET must not be empty".to_string());
        }

        if self.poll_interval_secs == 0 {
            return Err("POLL_INTERVAL_SECS must be at least 1".to_string());
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be at least 1".to_string());
        }

        for (var, template) in [
            ("BITBAY_URL_TEMPLATE", &self.bitbay_url_template),
            ("BITTREX_URL_TEMPLATE", &self.bittrex_url_template),
        ] {
            if !template.contains("{base}") || !template.contains("{quote}") {
                return Err(format!("{var} must contain {{base}} and {{quote}}"));
            }
        }

        for (var, fee) in [
            ("BITBAY_TAKER_FEE", self.bitbay_taker_fee),
            ("BITTREX_TAKER_FEE", self.bittrex_taker_fee),
        ] {
            if fee < Decimal::ZERO || fee >= Decimal::ONE {
                return Err(format!("{var} must be in [0, 1)"));
            }
        }

        if self.bitbay_transfer_fee < Decimal::ZERO || self.bittrex_transfer_fee < Decimal::ZERO {
            return Err("transfer fees must not be negative".to_string());
        }

        Ok(())
    }

    /// Interval between report cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// HTTP request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}
