//! Deadline scheduling on the frame clock.
//!
//! Time is a monotonic `Duration` since mount, advanced by the host once per
//! frame. Nothing here sleeps: callers ask what is due and act on it.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// One-shot timers ordered by deadline, ties broken by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, deadline: Duration, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((deadline, seq), payload);
        self.deadlines.insert(seq, deadline);
        TimerId(seq)
    }

    /// Drop a pending timer. Returns its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id.0)?;
        self.pending.remove(&(deadline, id.0))
    }

    /// Pop the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        let (&(deadline, seq), _) = self.pending.first_key_value()?;
        if deadline > now {
            return None;
        }
        self.deadlines.remove(&seq);
        self.pending.remove(&(deadline, seq))
    }

    /// Cancel everything; returns how many timers were still pending.
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.deadlines.clear();
        count
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|&(deadline, _)| deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Fixed-period repeating tick.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Option<Duration>,
}

impl Interval {
    /// Start ticking one `period` after `now`. A zero period never ticks.
    pub fn start(period: Duration, now: Duration) -> Self {
        let next = (!period.is_zero()).then(|| now + period);
        Self { period, next }
    }

    /// Number of ticks elapsed up to `now`; each tick is reported once.
    pub fn due(&mut self, now: Duration) -> u32 {
        let mut ticks = 0;
        while let Some(next) = self.next {
            if next > now {
                break;
            }
            ticks += 1;
            self.next = Some(next + self.period);
        }
        ticks
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn is_active(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn pops_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(300), "c");
        q.schedule(ms(100), "a");
        q.schedule(ms(200), "b");

        assert_eq!(q.pop_due(ms(50)), None);
        assert_eq!(q.pop_due(ms(250)), Some("a"));
        assert_eq!(q.pop_due(ms(250)), Some("b"));
        assert_eq!(q.pop_due(ms(250)), None);
        assert_eq!(q.next_deadline(), Some(ms(300)));
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(100), 1);
        q.schedule(ms(100), 2);
        assert_eq!(q.pop_due(ms(100)), Some(1));
        assert_eq!(q.pop_due(ms(100)), Some(2));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        let id = q.schedule(ms(10), "gone");
        assert_eq!(q.cancel(id), Some("gone"));
        assert_eq!(q.cancel(id), None);
        assert_eq!(q.pop_due(ms(1_000)), None);
    }

    #[test]
    fn clear_reports_pending() {
        let mut q = TimerQueue::new();
        q.schedule(ms(10), ());
        q.schedule(ms(20), ());
        assert_eq!(q.clear(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn interval_counts_missed_ticks() {
        let mut tick = Interval::start(ms(800), ms(0));
        assert_eq!(tick.due(ms(799)), 0);
        assert_eq!(tick.due(ms(800)), 1);
        assert_eq!(tick.due(ms(800)), 0);
        assert_eq!(tick.due(ms(3_300)), 3);
    }

    #[test]
    fn cancelled_interval_is_silent() {
        let mut tick = Interval::start(ms(100), ms(0));
        tick.cancel();
        assert_eq!(tick.due(ms(10_000)), 0);
        assert!(!tick.is_active());
    }
}
