//! Per-cycle report: every ratio computed from one pair of quotes.

use std::fmt;

use rust_decimal::Decimal;

use crate::arbitrage::{arbitrage_info, arbitrage_ratio, buy_sell_ratio, ArbitrageResult};
use crate::error::ArbitrageError;
use crate::exchange::{AssetPair, Endpoint, Registry};
use crate::orderbook::{Quote, Side};
use crate::utils::two_dp;

/// Divider printed after every cycle.
pub const DIVIDER: &str = "------------------------";

/// Everything printed for one fetch of both exchanges.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Monitored pair.
    pub pair: AssetPair,
    /// Exchange "A".
    pub exchange_a: String,
    /// Exchange "B".
    pub exchange_b: String,
    /// A-to-B ratio of best bids.
    pub buy_ratio: Option<Decimal>,
    /// A-to-B ratio of best asks.
    pub sell_ratio: Option<Decimal>,
    /// Buy at A, sell at B, before fees.
    pub arbitrage_a_to_b: Option<Decimal>,
    /// Buy at B, sell at A, before fees.
    pub arbitrage_b_to_a: Option<Decimal>,
    /// Buy at A, sell at B, after fees.
    pub info_a_to_b: Result<ArbitrageResult, ArbitrageError>,
    /// Buy at B, sell at A, after fees.
    pub info_b_to_a: Result<ArbitrageResult, ArbitrageError>,
}

impl CycleReport {
    /// Compute the report from whatever quotes were fetched this cycle.
    pub fn compute(registry: &Registry, quote_a: Option<&Quote>, quote_b: Option<&Quote>) -> Self {
        let a = &registry.primary;
        let b = &registry.secondary;

        Self {
            pair: registry.pair.clone(),
            exchange_a: a.name.clone(),
            exchange_b: b.name.clone(),
            buy_ratio: buy_sell_ratio(quote_a, quote_b, Side::Bids),
            sell_ratio: buy_sell_ratio(quote_a, quote_b, Side::Asks),
            arbitrage_a_to_b: arbitrage_ratio(quote_a, quote_b),
            arbitrage_b_to_a: arbitrage_ratio(quote_b, quote_a),
            info_a_to_b: info_between(a, quote_a, b, quote_b),
            info_b_to_a: info_between(b, quote_b, a, quote_a),
        }
    }

    /// Whether every figure in the report could be computed.
    pub fn is_complete(&self) -> bool {
        self.buy_ratio.is_some()
            && self.sell_ratio.is_some()
            && self.arbitrage_a_to_b.is_some()
            && self.arbitrage_b_to_a.is_some()
            && self.info_a_to_b.is_ok()
            && self.info_b_to_a.is_ok()
    }

    /// Fee-adjusted round trips that make money, as `(buy, sell, result)`.
    pub fn opportunities(&self) -> Vec<(&str, &str, &ArbitrageResult)> {
        let mut found = Vec::new();
        if let Ok(info) = &self.info_a_to_b {
            if info.is_profitable() {
                found.push((self.exchange_a.as_str(), self.exchange_b.as_str(), info));
            }
        }
        if let Ok(info) = &self.info_b_to_a {
            if info.is_profitable() {
                found.push((self.exchange_b.as_str(), self.exchange_a.as_str(), info));
            }
        }
        found
    }
}

fn info_between(
    buy_at: &Endpoint,
    buy_quote: Option<&Quote>,
    sell_at: &Endpoint,
    sell_quote: Option<&Quote>,
) -> Result<ArbitrageResult, ArbitrageError> {
    let unavailable = |endpoint: &Endpoint| ArbitrageError::QuoteUnavailable {
        exchange: endpoint.name.clone(),
    };

    let buy_quote = buy_quote.ok_or_else(|| unavailable(buy_at))?;
    let sell_quote = sell_quote.ok_or_else(|| unavailable(sell_at))?;
    arbitrage_info(buy_at, buy_quote, sell_at, sell_quote)
}

fn pct(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{}%", two_dp(v)))
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, pair) = (&self.exchange_a, &self.exchange_b, &self.pair);

        writeln!(f, "---- PRICE RATIOS:")?;
        writeln!(f, "\ta) {a} to {b} buy ratio for {pair}: {}", pct(self.buy_ratio))?;
        writeln!(f, "\tb) {a} to {b} sell ratio for {pair}: {}", pct(self.sell_ratio))?;
        writeln!(f, "\tc) {a} to {b} arbitrage ratios for {pair}:")?;
        writeln!(f, "\tBuy at {a}, sell at {b}: {}", pct(self.arbitrage_a_to_b))?;
        writeln!(f, "\tBuy at {b}, sell at {a}: {}", pct(self.arbitrage_b_to_a))?;

        writeln!(f, "---- FEE-ADJUSTED ARBITRAGE:")?;
        for (buy, sell, info) in [(a, b, &self.info_a_to_b), (b, a, &self.info_b_to_a)] {
            writeln!(f, "\tBuy at {buy}, sell at {sell}:")?;
            match info {
                Ok(info) => writeln!(
                    f,
                    "\tResource quantity: {}, profit: {}%, profit in {}: {}",
                    info.amount.normalize(),
                    two_dp(info.profit_percent),
                    pair.quote,
                    two_dp(info.profit_currency)
                )?,
                Err(e) => writeln!(f, "\tunavailable: {e}")?,
            }
        }

        writeln!(f, "{DIVIDER}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::market::normalize_body;
    use crate::orderbook::PriceLevel;
    use rust_decimal_macros::dec;

    fn registry() -> Registry {
        let config = Config {
            bittrex_transfer_fee: dec!(0.0005),
            ..Config::default()
        };
        Registry::from_config(&config)
    }

    fn quote(exchange: &str, bid: (Decimal, Decimal), ask: (Decimal, Decimal)) -> Quote {
        Quote::new(
            exchange,
            vec![PriceLevel::new(bid.0, bid.1)],
            vec![PriceLevel::new(ask.0, ask.1)],
        )
    }

    #[test]
    fn full_report_renders_every_line() {
        let registry = registry();
        let a = quote("BITBAY", (dec!(85), dec!(1)), (dec!(90), dec!(2)));
        let b = quote("BITTREX", (dec!(100), dec!(3)), (dec!(105), dec!(1)));

        let report = CycleReport::compute(&registry, Some(&a), Some(&b));
        let text = report.to_string();

        assert!(report.is_complete());
        assert!(text.contains("a) BITBAY to BITTREX buy ratio for BTCUSD: -17.65%"));
        assert!(text.contains("b) BITBAY to BITTREX sell ratio for BTCUSD: -16.67%"));
        assert!(text.contains("Buy at BITBAY, sell at BITTREX: 10.00%"));
        assert!(text.contains("Buy at BITTREX, sell at BITBAY: -23.53%"));
        assert!(text.contains("Resource quantity: 2, profit: 6.53%, profit in USD: 12.26"));
        assert!(text.ends_with(&format!("{DIVIDER}\n")));
    }

    #[test]
    fn missing_quote_renders_placeholders() {
        let registry = registry();
        let a = quote("BITBAY", (dec!(85), dec!(1)), (dec!(90), dec!(2)));

        let report = CycleReport::compute(&registry, Some(&a), None);
        let text = report.to_string();

        assert!(!report.is_complete());
        assert_eq!(report.buy_ratio, None);
        assert!(text.contains("buy ratio for BTCUSD: n/a"));
        assert!(text.contains("unavailable: no quote available for BITTREX"));
        assert!(report.opportunities().is_empty());
    }

    #[test]
    fn profitable_direction_is_reported() {
        let registry = registry();
        let a = quote("BITBAY", (dec!(85), dec!(1)), (dec!(90), dec!(2)));
        let b = quote("BITTREX", (dec!(100), dec!(3)), (dec!(105), dec!(1)));

        let report = CycleReport::compute(&registry, Some(&a), Some(&b));
        let found = report.opportunities();

        assert_eq!(found.len(), 1);
        assert_eq!((found[0].0, found[0].1), ("BITBAY", "BITTREX"));
        assert_eq!(found[0].2.profit_currency, dec!(12.259));
    }

    #[test]
    fn dust_bid_yields_placeholders_not_panic() {
        let registry = registry();
        let body = r#"{"bids": [["0.000000000000000000000001", 1]], "asks": [[9010, 0.4]]}"#;
        let a = normalize_body(&registry.primary, body, 1).unwrap();
        let b = quote("BITTREX", (dec!(9000), dec!(1)), (dec!(9020), dec!(1)));

        let report = CycleReport::compute(&registry, Some(&a), Some(&b));
        let text = report.to_string();

        assert_eq!(report.buy_ratio, None);
        assert_eq!(report.arbitrage_b_to_a, None);
        assert!(report.sell_ratio.is_some());
        assert!(!report.is_complete());
        assert!(text.contains("buy ratio for BTCUSD: n/a"));
        assert!(text.ends_with(&format!("{DIVIDER}\n")));
    }
}
