use std::time::{Duration, Instant};

/// Paces the streaming loop between annotation cycles.
///
/// The pipeline itself never sleeps; pacing is injected so the same
/// pipeline runs under a fixed-interval timer or free-running (paced by
/// the source/display instead).
pub trait CycleScheduler: Send {
    /// Blocks until the next cycle should start.
    fn wait(&mut self);
}

/// Targets a fixed cycle rate.
///
/// The deadline advances by the interval from the previous deadline, not
/// from wake-up time, so a slow cycle eats into the following wait instead
/// of shifting the whole schedule. Rate is best-effort: a cycle longer
/// than the interval just starts the next one immediately.
pub struct FixedIntervalScheduler {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl FixedIntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: None,
        }
    }
}

impl CycleScheduler for FixedIntervalScheduler {
    fn wait(&mut self) {
        let now = Instant::now();
        match self.next_deadline {
            None => {
                self.next_deadline = Some(now + self.interval);
            }
            Some(deadline) => {
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
                // Don't accumulate debt after an over-long cycle
                self.next_deadline = Some(deadline.max(now) + self.interval);
            }
        }
    }
}

/// No pacing: the next cycle starts as soon as the previous one finishes.
/// Used when the frame source itself paces the loop (file decode, or a
/// display-refresh-driven host).
pub struct FreeRunScheduler;

impl CycleScheduler for FreeRunScheduler {
    fn wait(&mut self) {}
}
