//! Bounded undo stack of match snapshots.
//!
//! Before every mutating scoring call the scorer pushes a full copy of the
//! live [`Match`]. Snapshots are plain clones; nothing is shared with the
//! live match. When the stack is full the oldest snapshot is dropped.

use std::collections::VecDeque;

use padel_model::match_state::Match;

/// Default number of snapshots kept.
pub const DEFAULT_UNDO_CAPACITY: usize = 50;

/// Most-recent-last stack of match snapshots with a fixed capacity.
#[derive(Debug, Clone)]
pub struct UndoStack {
    snapshots: VecDeque<Match>,
    capacity: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_UNDO_CAPACITY)
    }
}

impl UndoStack {
    /// A stack holding at most `capacity` snapshots. A capacity of 0 keeps
    /// nothing, which disables undo.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(DEFAULT_UNDO_CAPACITY)),
            capacity,
        }
    }

    /// Push a snapshot, evicting the oldest one when full.
    pub fn push(&mut self, snapshot: Match) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Take the most recent snapshot.
    pub fn pop(&mut self) -> Option<Match> {
        self.snapshots.pop_back()
    }

    /// The most recent snapshot, without removing it.
    pub fn peek(&self) -> Option<&Match> {
        self.snapshots.back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Match {
        Match::new(name, "x")
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut stack = UndoStack::default();
        assert!(!stack.can_undo());
        stack.push(named("first"));
        stack.push(named("second"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek().unwrap().team1_name(), "second");
        assert_eq!(stack.pop().unwrap().team1_name(), "second");
        assert_eq!(stack.pop().unwrap().team1_name(), "first");
        assert!(stack.pop().is_none());
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut stack = UndoStack::with_capacity(3);
        for i in 0..5 {
            stack.push(named(&i.to_string()));
        }
        assert_eq!(stack.len(), 3);
        let drained: Vec<String> = std::iter::from_fn(|| stack.pop())
            .map(|m| m.team1_name().to_owned())
            .collect();
        assert_eq!(drained, vec!["4", "3", "2"]);
    }

    #[test]
    fn default_capacity_is_fifty() {
        let mut stack = UndoStack::default();
        for _ in 0..60 {
            stack.push(Match::default());
        }
        assert_eq!(stack.capacity(), DEFAULT_UNDO_CAPACITY);
        assert_eq!(stack.len(), 50);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut stack = UndoStack::with_capacity(0);
        stack.push(Match::default());
        assert!(!stack.can_undo());
    }

    #[test]
    fn clear_empties() {
        let mut stack = UndoStack::default();
        stack.push(Match::default());
        stack.clear();
        assert!(stack.is_empty());
    }
}
