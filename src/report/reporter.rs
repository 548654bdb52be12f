//! Fetch → compute → print → wait loop.

use std::io::Write;

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::exchange::Registry;
use crate::market::QuoteSource;
use crate::metrics;
use crate::utils::two_dp;

use super::cycle::CycleReport;
use super::ticker::Ticker;

/// Order book depth every calculation reads.
pub const SINGLE_OFFER: usize = 1;

/// Drives report cycles against a registry and a quote source.
#[derive(Debug)]
pub struct Reporter<'a, S> {
    registry: &'a Registry,
    source: &'a S,
}

impl<'a, S: QuoteSource> Reporter<'a, S> {
    /// Create a new reporter.
    pub fn new(registry: &'a Registry, source: &'a S) -> Self {
        Self { registry, source }
    }

    /// Fetch both exchanges once and compute every ratio.
    ///
    /// Quotes are fetched one after the other and shared by all calculations.
    #[instrument(skip(self), fields(pair = %self.registry.pair))]
    pub async fn run_cycle(&self) -> CycleReport {
        let _timer = metrics::timer_report_cycle();
        let pair = &self.registry.pair;

        let quote_a = self
            .source
            .fetch_quote(&self.registry.primary, &pair.base, &pair.quote, SINGLE_OFFER)
            .await;
        let quote_b = self
            .source
            .fetch_quote(&self.registry.secondary, &pair.base, &pair.quote, SINGLE_OFFER)
            .await;

        let report = CycleReport::compute(self.registry, quote_a.as_ref(), quote_b.as_ref());

        for (buy, sell, result) in report.opportunities() {
            info!(
                buy,
                sell,
                amount = %result.amount,
                profit = %two_dp(result.profit_currency),
                profit_pct = %two_dp(result.profit_percent),
                "Fee-adjusted arbitrage opportunity"
            );
            metrics::inc_opportunities_detected(buy, sell);
        }

        metrics::inc_report_cycles();
        debug!(complete = report.is_complete(), "Cycle computed");

        report
    }

    /// Print a report on every tick until `shutdown` flips to `true`.
    ///
    /// Returns the number of completed cycles. Only output errors end the loop
    /// early; fetch failures show up as `n/a` in the printed report.
    pub async fn run<T, W>(
        &self,
        ticker: &mut T,
        out: &mut W,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<u64>
    where
        T: Ticker,
        W: Write,
    {
        let mut cycles = 0u64;

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            let report = self.run_cycle().await;
            write!(out, "{report}")?;
            out.flush()?;
            cycles += 1;
        }

        info!(cycles, "Reporting loop stopped");
        Ok(cycles)
    }
}
