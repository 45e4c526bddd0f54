//! Deadline-ordered queue of deferred work.

use std::collections::BTreeMap;

/// Items due at an instant, fired in deadline order and, for equal
/// deadlines, in scheduling order.
#[derive(Debug)]
pub(crate) struct Timers<I, T> {
    queue: BTreeMap<(I, u64), T>,
    next_seq: u64,
}

impl<I: Copy + Ord, T> Timers<I, T> {
    pub(crate) fn new() -> Self {
        Self { queue: BTreeMap::new(), next_seq: 0 }
    }

    pub(crate) fn schedule(&mut self, at: I, item: T) {
        self.queue.insert((at, self.next_seq), item);
        self.next_seq += 1;
    }

    /// Remove and return everything due at or before `now`.
    pub(crate) fn pop_due(&mut self, now: I) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > now {
                break;
            }
            due.push(entry.remove());
        }
        due
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}
