//! Scheduling between report cycles.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Interval, MissedTickBehavior};

/// Paces the reporting loop.
#[async_trait]
pub trait Ticker: Send {
    /// Wait until the next cycle is due.
    async fn tick(&mut self);
}

/// Wall-clock ticker. The first tick completes immediately.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// Create a ticker firing every `period`. Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        // A slow fetch pushes the schedule back instead of bursting.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
