//! Capacity-bounded conversation history.
//!
//! Turns are kept in the order they were appended; that order is the
//! conversation order sent to the model. When a cap is set, the oldest
//! turns are evicted first.

use serde::{Deserialize, Serialize};

use crate::{Role, Turn};

/// Ordered log of one session's turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn at the end.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Trim from the front so at most `capacity` turns remain.
    ///
    /// When the history ends with a user turn (a request is about to be
    /// sent), eviction continues past any leading model turns so the
    /// request never opens with a reply whose question was dropped.
    /// Returns the number of evicted turns. `None` means unbounded.
    pub fn enforce_capacity(&mut self, capacity: Option<usize>) -> usize {
        let Some(capacity) = capacity else {
            return 0;
        };
        if self.turns.len() <= capacity {
            return 0;
        }

        let mut evict = self.turns.len() - capacity;
        if self.ends_with(Role::User) {
            while evict < self.turns.len() && self.turns[evict].role == Role::Model {
                evict += 1;
            }
        }
        self.turns.drain(..evict);
        evict
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn ends_with(&self, role: Role) -> bool {
        self.turns.last().is_some_and(|t| t.role == role)
    }
}
