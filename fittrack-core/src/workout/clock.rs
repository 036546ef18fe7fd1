use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// The single one-second tick source of a workout.
///
/// The first tick fires one period after creation. Ticks missed while the
/// caller was busy (e.g. awaiting a set save) fire back to back on the next
/// polls, so tick counts keep up with wall time.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        Self { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}
