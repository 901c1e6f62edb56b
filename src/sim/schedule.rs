//! Single-threaded timer queue on a virtual millisecond clock
//!
//! Timers fire in due-time order, ties broken by scheduling order. Cancelling
//! a handle only marks it; the entry is dropped when it reaches the front.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Handle returned by [`Scheduler::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
pub struct Scheduler<E> {
    now_ms: u64,
    next_seq: u64,
    /// (due, seq) min-heap
    queue: BinaryHeap<Reverse<(u64, u64)>>,
    payloads: HashMap<u64, E>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
            payloads: HashMap::new(),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `event` after `delay_ms`
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((self.now_ms + delay_ms, seq)));
        self.payloads.insert(seq, event);
        TimerHandle(seq)
    }

    /// Drop a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.payloads.remove(&handle.0).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.payloads.contains_key(&handle.0)
    }

    /// Number of live (not cancelled) timers
    pub fn pending(&self) -> usize {
        self.payloads.len()
    }

    /// Pop the next timer due at or before `deadline_ms`, moving the clock to its due time
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<E> {
        while let Some(&Reverse((due, seq))) = self.queue.peek() {
            if due > deadline_ms {
                return None;
            }
            self.queue.pop();
            if let Some(event) = self.payloads.remove(&seq) {
                self.now_ms = self.now_ms.max(due);
                return Some(event);
            }
        }
        None
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, time_ms: u64) {
        self.now_ms = self.now_ms.max(time_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order_then_fifo() {
        let mut s = Scheduler::new();
        s.schedule(50, "b");
        s.schedule(10, "a");
        s.schedule(50, "c");
        assert_eq!(s.pop_due(100), Some("a"));
        assert_eq!(s.now_ms(), 10);
        assert_eq!(s.pop_due(100), Some("b"));
        assert_eq!(s.pop_due(100), Some("c"));
        assert_eq!(s.now_ms(), 50);
        assert_eq!(s.pop_due(100), None);
    }

    #[test]
    fn test_respects_deadline() {
        let mut s = Scheduler::new();
        s.schedule(100, 1);
        assert_eq!(s.pop_due(99), None);
        assert_eq!(s.pop_due(100), Some(1));
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance_to(1000);
        s.schedule(50, ());
        assert_eq!(s.pop_due(1049), None);
        assert_eq!(s.pop_due(1050), Some(()));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let h = s.schedule(10, "gone");
        s.schedule(20, "kept");
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(!s.is_pending(h));
        assert_eq!(s.pending(), 1);
        assert_eq!(s.pop_due(100), Some("kept"));
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.advance_to(500);
        s.advance_to(100);
        assert_eq!(s.now_ms(), 500);
    }
}
