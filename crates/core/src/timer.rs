//! Timer service - elapsed time with periodic display ticks.
//!
//! Timers are driven by a caller-supplied monotonic clock in milliseconds, so
//! they never read the wall clock themselves and stay deterministic in tests.

use crate::types::TICK_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// One stopwatch with 1 second ticks.
#[derive(Debug, Clone)]
pub struct Timer {
    state: TimerState,
    origin_ms: u64,
    /// Clock value at `stop()`, so reads after stopping stay frozen.
    stopped_at_ms: u64,
    next_tick_ms: u64,
    interval_ms: u64,
}

impl Timer {
    pub fn new() -> Self {
        Self::with_interval(TICK_INTERVAL_MS)
    }

    pub fn with_interval(interval_ms: u64) -> Self {
        Self {
            state: TimerState::Stopped,
            origin_ms: 0,
            stopped_at_ms: 0,
            next_tick_ms: 0,
            interval_ms: interval_ms.max(1),
        }
    }

    /// Start (or restart) from `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.state = TimerState::Running;
        self.origin_ms = now_ms;
        self.stopped_at_ms = now_ms;
        self.next_tick_ms = now_ms + self.interval_ms;
    }

    pub fn stop(&mut self, now_ms: u64) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
            self.stopped_at_ms = now_ms.max(self.origin_ms);
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Whole seconds since the last `start`.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        let end = match self.state {
            TimerState::Running => now_ms,
            TimerState::Stopped => self.stopped_at_ms,
        };
        end.saturating_sub(self.origin_ms) / 1000
    }

    /// Returns a tick (elapsed whole seconds) when an interval boundary has passed.
    ///
    /// Several missed boundaries collapse into a single tick carrying the latest value.
    pub fn poll(&mut self, now_ms: u64) -> Option<u64> {
        if self.state != TimerState::Running || now_ms < self.next_tick_ms {
            return None;
        }
        let intervals = (now_ms - self.origin_ms) / self.interval_ms;
        self.next_tick_ms = self.origin_ms + (intervals + 1) * self.interval_ms;
        Some(self.elapsed_secs(now_ms))
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format whole seconds as `"{m}m {ss}s"`.
pub fn format_elapsed(total_secs: u64) -> String {
    format!("{}m {:02}s", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_stopped() {
        let timer = Timer::new();
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.elapsed_secs(10_000), 0);
    }

    #[test]
    fn test_ticks_once_per_second() {
        let mut timer = Timer::new();
        timer.start(500);

        assert_eq!(timer.poll(1000), None);
        assert_eq!(timer.poll(1500), Some(1));
        assert_eq!(timer.poll(1600), None);
        assert_eq!(timer.poll(2499), None);
        assert_eq!(timer.poll(2500), Some(2));
    }

    #[test]
    fn test_missed_ticks_collapse() {
        let mut timer = Timer::new();
        timer.start(0);
        assert_eq!(timer.poll(4200), Some(4));
        assert_eq!(timer.poll(4900), None);
        assert_eq!(timer.poll(5000), Some(5));
    }

    #[test]
    fn test_restart_resets_origin() {
        let mut timer = Timer::new();
        timer.start(0);
        assert_eq!(timer.poll(3000), Some(3));

        timer.start(3500);
        assert!(timer.is_running());
        assert_eq!(timer.elapsed_secs(3600), 0);
        assert_eq!(timer.poll(4000), None);
        assert_eq!(timer.poll(4500), Some(1));
    }

    #[test]
    fn test_stop_cancels_ticks_and_freezes_elapsed() {
        let mut timer = Timer::new();
        timer.start(0);
        timer.stop(2500);
        assert_eq!(timer.poll(10_000), None);
        assert_eq!(timer.elapsed_secs(10_000), 2);
    }

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let mut timer = Timer::new();
        timer.start(0);
        timer.stop(1000);
        timer.stop(9000);
        assert_eq!(timer.elapsed_secs(20_000), 1);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0m 00s");
        assert_eq!(format_elapsed(9), "0m 09s");
        assert_eq!(format_elapsed(65), "1m 05s");
        assert_eq!(format_elapsed(600), "10m 00s");
    }
}
