use std::time::{Duration, Instant};

/// One-shot repaint deadline owned by a widget.
///
/// At most one deadline is pending at a time: arming an armed timer keeps the
/// existing deadline. The owner re-arms only after the timer fires, which
/// yields a steady cadence without duplicate wake-ups.
///
/// Lifecycle:
/// - `arm` when the owner becomes visible
/// - `poll` from the event loop; returns `true` once per elapsed deadline
/// - `cancel` when the owner is hidden or torn down; nothing fires afterwards
#[derive(Debug, Clone)]
pub struct RepaintTimer {
    period: Duration,
    deadline: Option<Instant>,
    fired: u64,
}

impl RepaintTimer {
    /// Creates an idle timer.
    ///
    /// # Panics
    /// Panics (debug only) if `period` is zero.
    pub fn new(period: Duration) -> Self {
        debug_assert!(!period.is_zero(), "RepaintTimer period must be non-zero");
        Self { period, deadline: None, fired: 0 }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Schedules the next firing at `now + period`.
    ///
    /// Returns `false` (and leaves the pending deadline untouched) if the
    /// timer is already armed.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        let deadline = now + self.period;
        log::trace!("repaint timer armed for {:?}", self.period);
        self.deadline = Some(deadline);
        true
    }

    /// Drops the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.deadline.take().is_some();
        if was_armed {
            log::trace!("repaint timer cancelled");
        }
        was_armed
    }

    /// Consumes the deadline if it has elapsed at `now`.
    ///
    /// The timer is idle afterwards; the owner decides whether to re-arm.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Number of pending deadlines: `0` or `1`.
    #[inline]
    pub fn pending(&self) -> usize {
        usize::from(self.deadline.is_some())
    }

    /// How many times the timer has fired since construction.
    #[inline]
    pub fn fire_count(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn new_timer_is_idle() {
        let t = RepaintTimer::new(SECOND);
        assert!(!t.is_armed());
        assert_eq!(t.pending(), 0);
        assert_eq!(t.deadline(), None);
    }

    #[test]
    fn arm_sets_deadline_one_period_out() {
        let now = Instant::now();
        let mut t = RepaintTimer::new(SECOND);
        assert!(t.arm(now));
        assert_eq!(t.deadline(), Some(now + SECOND));
    }

    #[test]
    fn arming_twice_keeps_single_deadline() {
        let now = Instant::now();
        let mut t = RepaintTimer::new(SECOND);
        t.arm(now);
        assert!(!t.arm(now + Duration::from_millis(300)));
        assert_eq!(t.pending(), 1);
        assert_eq!(t.deadline(), Some(now + SECOND));
    }

    #[test]
    fn poll_before_deadline_does_not_fire() {
        let now = Instant::now();
        let mut t = RepaintTimer::new(SECOND);
        t.arm(now);
        assert!(!t.poll(now + Duration::from_millis(999)));
        assert!(t.is_armed());
    }

    #[test]
    fn poll_at_deadline_fires_once() {
        let now = Instant::now();
        let mut t = RepaintTimer::new(SECOND);
        t.arm(now);
        assert!(t.poll(now + SECOND));
        assert!(!t.poll(now + SECOND * 2));
        assert_eq!(t.fire_count(), 1);
        assert_eq!(t.pending(), 0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let now = Instant::now();
        let mut t = RepaintTimer::new(SECOND);
        t.arm(now);
        assert!(t.cancel());
        assert!(!t.poll(now + SECOND * 60));
        assert!(!t.cancel());
        assert_eq!(t.fire_count(), 0);
    }
}
