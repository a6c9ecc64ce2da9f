//! Periodic UI timers driven by the render loop clock

/// Fires at most once per poll when its period has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodicTimer {
    period_ms: u64,
    last_run_ms: u64,
}

impl PeriodicTimer {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            last_run_ms: 0,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Check the timer against `now_ms`
    ///
    /// Missed periods are not replayed: a late poll fires once and the
    /// next deadline is counted from `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_run_ms) < self.period_ms {
            return false;
        }
        self.last_run_ms = now_ms;
        true
    }
}
