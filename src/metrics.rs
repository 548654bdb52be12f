//! Prometheus metrics for quote fetching and reporting.
//!
//! This module provides metrics for:
//! - Order book fetch latency and failures per exchange
//! - Report cycles
//! - Fee-adjusted profitable opportunities

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing::{debug, info};

// === Metric Name Constants ===

/// Order book fetch latency metric name.
pub const METRIC_QUOTE_FETCH_LATENCY: &str = "quote_fetch_latency_ms";
/// Order book fetch failures counter metric name.
pub const METRIC_QUOTE_FETCH_FAILURES: &str = "quote_fetch_failures_total";
/// Report cycles counter metric name.
pub const METRIC_REPORT_CYCLES: &str = "report_cycles_total";
/// Report cycle duration metric name.
pub const METRIC_REPORT_CYCLE_LATENCY: &str = "report_cycle_latency_ms";
/// Profitable opportunities counter metric name.
pub const METRIC_OPPORTUNITIES_DETECTED: &str = "opportunities_detected_total";

/// Register all metric descriptions with the installed recorder.
/// Descriptions sent before a recorder is installed are dropped.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_QUOTE_FETCH_LATENCY,
        "Order book fetch latency in milliseconds"
    );
    describe_histogram!(
        METRIC_REPORT_CYCLE_LATENCY,
        "Duration of one fetch-compute-print cycle in milliseconds"
    );

    describe_counter!(
        METRIC_QUOTE_FETCH_FAILURES,
        "Total number of failed order book fetches"
    );
    describe_counter!(METRIC_REPORT_CYCLES, "Total number of report cycles");
    describe_counter!(
        METRIC_OPPORTUNITIES_DETECTED,
        "Total number of fee-adjusted profitable opportunities seen"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter and serve `/metrics` on `port`.
pub fn install_exporter(port: u16) -> Result<(), BuildError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    init_metrics();
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// Record order book fetch latency.
pub fn record_quote_fetch_latency(start: Instant, exchange: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_QUOTE_FETCH_LATENCY, "exchange" => exchange.to_string()).record(latency_ms);
}

/// Increment fetch failure counter.
pub fn inc_quote_fetch_failures(exchange: &str, kind: &'static str) {
    counter!(
        METRIC_QUOTE_FETCH_FAILURES,
        "exchange" => exchange.to_string(),
        "kind" => kind
    )
    .increment(1);
}

/// Increment report cycle counter.
pub fn inc_report_cycles() {
    counter!(METRIC_REPORT_CYCLES).increment(1);
}

/// Increment opportunities detected counter.
pub fn inc_opportunities_detected(buy: &str, sell: &str) {
    counter!(
        METRIC_OPPORTUNITIES_DETECTED,
        "buy" => buy.to_string(),
        "sell" => sell.to_string()
    )
    .increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for a report cycle.
pub fn timer_report_cycle() -> LatencyTimer {
    LatencyTimer::new(METRIC_REPORT_CYCLE_LATENCY)
}
