//! Timer Queue
//!
//! Deterministic one-shot and repeating timers on a widget-owned clock.
//! The host pumps elapsed time explicitly; nothing fires between pumps,
//! which keeps transition and auto-play sequencing testable.

use std::time::Duration;

/// Timer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct ScheduledTimer {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    cancelled: bool,
}

/// Queue of scheduled timers over a monotonic widget clock
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    timers: Vec<ScheduledTimer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a one-shot timer
    pub fn schedule(&mut self, delay: Duration) -> TimerId {
        self.push(delay, None)
    }

    /// Schedule a repeating timer; first firing after one full period
    pub fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        self.push(period, Some(period))
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(ScheduledTimer {
            id,
            due: self.now + delay,
            period,
            cancelled: false,
        });
        id
    }

    /// Cancel a timer; guarantees no further firings. Safe on unknown ids.
    pub fn cancel(&mut self, id: TimerId) {
        if let Some(timer) = self.timers.iter_mut().find(|t| t.id == id) {
            timer.cancelled = true;
        }
    }

    /// Check a timer is still scheduled
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id && !t.cancelled)
    }

    /// Advance the clock, returning every firing in due order.
    ///
    /// Repeating timers re-arm and may fire several times in one pump.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        self.now += dt;
        let mut fired = Vec::new();
        loop {
            // Earliest due timer not past the new clock reading
            let next = self
                .timers
                .iter_mut()
                .filter(|t| !t.cancelled && t.due <= self.now)
                .min_by_key(|t| t.due);
            let Some(timer) = next else { break };

            fired.push(timer.id);
            match timer.period {
                // A zero period would never move past the clock; such a
                // timer fires once per pump instead of spinning
                Some(period) if period.is_zero() => {
                    timer.due = self.now + Duration::from_nanos(1);
                }
                Some(period) => timer.due += period,
                None => timer.cancelled = true,
            }
        }
        self.timers.retain(|t| !t.cancelled);
        fired
    }
}
