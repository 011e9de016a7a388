use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};

/// Fixed-rate timer driving session ticks
///
/// Pausing does not touch the timer; the session ignores ticks while paused.
/// Only the end of a session cancels it, and cancelling twice is a no-op.
#[derive(Debug)]
pub struct TickTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl TickTimer {
    /// Start ticking every `period`. Must be called inside a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            period,
            interval: Some(ticks),
        }
    }

    /// A timer that never fires, for the menu before the first game
    pub fn stopped(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Wait for the next tick. Never resolves once cancelled.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(ticks) => {
                ticks.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Release the underlying interval; returns false if it was already released
    pub fn cancel(&mut self) -> bool {
        self.interval.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
