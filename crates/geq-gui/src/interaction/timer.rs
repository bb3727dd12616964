//! Cancellable per-handle gesture timers
//!
//! Time is whatever millisecond clock the host stamps its events with; the
//! queue only compares deadlines, so tests can drive it deterministically.

/// Milliseconds on the host clock
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Delay that tells a single tap from a double tap
    SingleTap,
    /// Touch hold that toggles secondary controls
    LongPress,
    /// Inactivity hide of secondary controls
    AutoHide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerKey {
    pub filter: usize,
    pub kind: TimerKind,
}

impl TimerKey {
    pub const fn new(filter: usize, kind: TimerKind) -> Self {
        Self { filter, kind }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<(TimerKey, Millis)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) a timer
    pub fn arm(&mut self, key: TimerKey, deadline: Millis) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = deadline,
            None => self.entries.push((key, deadline)),
        }
    }

    /// Returns true if the timer was armed
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.len() != before
    }

    /// Cancel every timer of `kind`
    pub fn cancel_kind(&mut self, kind: TimerKind) {
        self.entries.retain(|(k, _)| k.kind != kind);
    }

    pub fn is_armed(&self, key: TimerKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn deadline(&self, key: TimerKey) -> Option<Millis> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, d)| *d)
    }

    /// Filters with an armed timer of `kind`
    pub fn armed(&self, kind: TimerKind) -> Vec<usize> {
        self.entries.iter().filter(|(k, _)| k.kind == kind).map(|(k, _)| k.filter).collect()
    }

    /// Earliest deadline, for hosts that schedule a wake-up
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.iter().map(|(_, d)| *d).min()
    }

    /// Remove and return expired timers, earliest first
    pub fn take_due(&mut self, now: Millis) -> Vec<TimerKey> {
        let mut due: Vec<(TimerKey, Millis)> = Vec::new();
        self.entries.retain(|&(key, deadline)| {
            if deadline <= now {
                due.push((key, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(key, deadline)| (deadline, key));
        due.into_iter().map(|(key, _)| key).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
