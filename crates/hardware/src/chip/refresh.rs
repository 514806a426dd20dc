//! Auto-refresh scheduling.
//!
//! A free-running counter advances on every clock edge. Once it reaches the
//! refresh interval a refresh is due, but it only starts when the owner says
//! so: the request-level controller starts refresh from IDLE and never cuts
//! into a transfer, so a refresh can run late. Starting a refresh resets the
//! counter to zero.

use crate::config::TimingConfig;

/// Free-running refresh counter with a fixed interval and duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshScheduler {
    counter: u32,
    interval: u32,
    duration: u32,
}

impl RefreshScheduler {
    /// Creates a scheduler with the counter at zero.
    pub const fn new(timing: &TimingConfig) -> Self {
        Self {
            counter: 0,
            interval: timing.refresh_interval,
            duration: timing.refresh_duration,
        }
    }

    /// Advances the counter by one cycle.
    ///
    /// # Returns
    ///
    /// `true` if a refresh is due (counter at or past the interval).
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.counter = self.counter.saturating_add(1);
        self.is_due()
    }

    /// Returns `true` if the counter has reached the interval.
    #[inline]
    pub const fn is_due(&self) -> bool {
        self.counter >= self.interval
    }

    /// Starts a refresh: resets the counter and returns its duration in cycles.
    pub fn begin(&mut self) -> u32 {
        self.counter = 0;
        self.duration
    }

    /// Returns the cycles counted since the last refresh began.
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Returns the configured interval.
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns the configured duration.
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Resets the counter to zero.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
