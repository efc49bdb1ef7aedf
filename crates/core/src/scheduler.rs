//! Deferred continuations on a single logical thread.
//!
//! Tasks are scheduled relative to the clock value of their trigger and popped
//! in due order; tasks due at the same instant run in scheduling order.
//! A popped task carries its due time so follow-up work can be scheduled
//! relative to when it fired rather than when the queue was drained.

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    pending: Vec<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_ms: now_ms + delay_ms,
            seq,
            task,
        });
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, T)> {
        let (pos, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= now_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))?;
        let s = self.pending.swap_remove(pos);
        Some((s.due_ms, s.task))
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due_ms).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
