use rand::Rng;
use std::{ops::Range, time::Duration};
use tokio::time::sleep;
use tracing::debug;

/// Whole seconds to wait between requests: at least 2, less than 4.
pub const DEFAULT_DELAY_SECS: Range<u64> = 2..4;

/// Randomized politeness delay applied after every crawl request.
#[derive(Debug, Clone)]
pub struct Pacer {
    range: Range<u64>,
    unit: Duration,
    fast: bool,
}

impl Pacer {
    pub fn new(fast: bool) -> Self {
        Self::with_range(DEFAULT_DELAY_SECS, fast)
    }

    /// Delay drawn from `range_secs` whole seconds.
    pub fn with_range(range_secs: Range<u64>, fast: bool) -> Self {
        Self {
            range: range_secs,
            unit: Duration::from_secs(1),
            fast,
        }
    }

    /// Scale the drawn count by `unit` instead of one second.
    pub fn with_unit(mut self, unit: Duration) -> Self {
        self.unit = unit;
        self
    }

    /// Pick the next delay. Zero in fast mode or when the range is empty.
    pub fn next_delay(&self) -> Duration {
        if self.fast || self.range.is_empty() {
            return Duration::ZERO;
        }
        let steps = rand::thread_rng().gen_range(self.range.clone());
        self.unit * steps as u32
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        debug!("sleeping {:?}", delay);
        sleep(delay).await;
    }
}
