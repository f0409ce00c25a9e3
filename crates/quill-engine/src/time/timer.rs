use std::time::{Duration, Instant};

/// Interval timer serviced by the event pump.
///
/// There is no background thread: the pump asks [`IntervalTimer::poll`] whether a
/// tick is due and, when blocking, uses [`IntervalTimer::deadline`] as its wake-up
/// time. Ticks that were missed while the owner was busy coalesce into one.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    interval: Option<Duration>,
    next: Option<Instant>,
}

impl IntervalTimer {
    /// Arms the timer with `interval_ms`; `0` disarms it.
    pub fn set_interval(&mut self, interval_ms: u32, now: Instant) {
        if interval_ms == 0 {
            self.disarm();
            return;
        }
        let interval = Duration::from_millis(u64::from(interval_ms));
        self.interval = Some(interval);
        self.next = Some(now + interval);
    }

    pub fn disarm(&mut self) {
        self.interval = None;
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Returns `true` when a tick is due at `now` and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match (self.interval, self.next) {
            (Some(interval), Some(next)) if now >= next => {
                self.next = Some(now + interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_disarms() {
        let now = Instant::now();
        let mut t = IntervalTimer::default();
        t.set_interval(10, now);
        assert!(t.is_armed());
        t.set_interval(0, now);
        assert!(!t.is_armed());
        assert!(!t.poll(now + Duration::from_secs(1)));
    }

    #[test]
    fn fires_once_per_elapsed_interval_and_coalesces() {
        let start = Instant::now();
        let mut t = IntervalTimer::default();
        t.set_interval(10, start);

        assert!(!t.poll(start + Duration::from_millis(5)));
        // Far past several deadlines: one tick, then rescheduled from `now`.
        let late = start + Duration::from_millis(55);
        assert!(t.poll(late));
        assert!(!t.poll(late));
        assert!(t.poll(late + Duration::from_millis(10)));
    }
}
