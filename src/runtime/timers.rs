use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Identifier returned when an entry is scheduled; unique per queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

struct Entry<T> {
    due_ms: u64,
    id: TimerId,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.id == other.id
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.id).cmp(&(other.due_ms, other.id))
    }
}

/// Deterministic single-threaded deferred-callback queue on a virtual millisecond clock.
///
/// Ordering rule: entries fire by due time; equal due times fire in scheduling order.
/// There is no per-entry cancel. Consumers check that their target still exists when an
/// entry fires.
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    heap: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            heap: BinaryHeap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Due time of the earliest pending entry.
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(e)| e.due_ms)
    }

    /// Schedule at an absolute time; times in the past are clamped to now.
    pub fn schedule_at(&mut self, due_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.heap.push(Reverse(Entry {
            due_ms: due_ms.max(self.now_ms),
            id,
            payload,
        }));
        id
    }

    pub fn schedule_after(&mut self, delay_ms: u64, payload: T) -> TimerId {
        self.schedule_at(self.now_ms.saturating_add(delay_ms), payload)
    }

    /// Pop the earliest entry due at or before `until_ms`, moving the clock to its due
    /// time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, T)> {
        if self.next_due()? > until_ms {
            return None;
        }
        let Reverse(entry) = self.heap.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some((entry.due_ms, entry.payload))
    }

    /// Move the clock forward; never backwards.
    pub fn advance_to(&mut self, t_ms: u64) {
        self.now_ms = self.now_ms.max(t_ms);
    }

    /// Drop every pending entry. The clock is kept.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
