//! Deferred steps, and when they're due.
//!
//! Nothing in the engine ever blocks. Anything that has to happen "later" goes in a [`Schedule`], and comes back out
//! once the host calls [`Schedule::pop_due`] after its time has passed.

use core::fmt;
use std::time::Duration;

#[cfg(test)]
pub use mock_instant::Instant;
#[cfg(not(test))]
pub use std::time::Instant;

/// A queue of values, each due at some point in time.
///
/// Values due at the same instant come back out in the order they went in.
pub struct Schedule<T> {
    pending: Vec<(Instant, T)>,
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self {
            pending: Default::default(),
        }
    }
}

impl<T> fmt::Debug for Schedule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(std::any::type_name::<Self>())
            .field("pending", &self.pending.len())
            .field("next", &self.next_due())
            .finish()
    }
}

impl<T> Schedule<T> {
    /// Schedule something for a specific time.
    pub fn at(&mut self, when: Instant, value: T) -> &mut Self {
        let idx = self.pending.partition_point(|(due, _)| *due <= when);
        self.pending.insert(idx, (when, value));
        self
    }

    /// Schedule something some amount of time from now.
    pub fn after(&mut self, amt: Duration, value: T) -> &mut Self {
        self.at(Instant::now() + amt, value)
    }

    /// When the earliest pending value comes due, if there are any.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.first().map(|(due, _)| *due)
    }

    /// Take the earliest value, if it's due by now.
    pub fn pop_due(&mut self) -> Option<T> {
        match self.next_due() {
            Some(due) if due <= Instant::now() => Some(self.pending.remove(0).1),
            _ => None,
        }
    }

    /// Drop everything pending.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
