//! Session store: maps session IDs to conversation histories.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parley_ai::{ConversationHistory, Turn};
use parley_common::SessionId;
use tokio::sync::RwLock;

/// Keyed storage for conversation histories.
///
/// Each operation is atomic on its own. A sequence of operations is not:
/// two concurrent requests for the same session can interleave.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Current history, creating an empty one if the session is unknown.
    async fn get(&self, session: &SessionId) -> ConversationHistory;

    /// Append a turn at the end of the session's history.
    async fn append(&self, session: &SessionId, turn: Turn);

    /// Reset the session to an empty history.
    async fn clear(&self, session: &SessionId);

    /// Evict the oldest turns beyond the store's capacity. Returns how many
    /// turns were dropped.
    async fn enforce_capacity(&self, session: &SessionId) -> usize;
}

struct Entry {
    history: ConversationHistory,
    last_used: Instant,
}

impl Entry {
    fn new() -> Self {
        Self {
            history: ConversationHistory::new(),
            last_used: Instant::now(),
        }
    }
}

/// Thread-safe in-process history store.
#[derive(Clone)]
pub struct MemoryHistoryStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    capacity: Option<usize>,
}

impl MemoryHistoryStore {
    /// `capacity` of `None` keeps every turn.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Drop sessions not touched for longer than `max_idle`. Returns the
    /// number removed.
    pub async fn reap_stale(&self, max_idle: Duration) -> usize {
        let mut map = self.sessions.write().await;
        let now = Instant::now();
        let before = map.len();
        map.retain(|id, entry| {
            let stale = now.duration_since(entry.last_used) > max_idle;
            if stale {
                tracing::debug!(session = %id, "Reaping idle session");
            }
            !stale
        });
        before - map.len()
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    pub async fn exists(&self, session: &SessionId) -> bool {
        self.sessions.read().await.contains_key(session)
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn get(&self, session: &SessionId) -> ConversationHistory {
        let mut map = self.sessions.write().await;
        let entry = map.entry(session.clone()).or_insert_with(Entry::new);
        entry.last_used = Instant::now();
        entry.history.clone()
    }

    async fn append(&self, session: &SessionId, turn: Turn) {
        let mut map = self.sessions.write().await;
        let entry = map.entry(session.clone()).or_insert_with(Entry::new);
        entry.history.push(turn);
        entry.last_used = Instant::now();
    }

    async fn clear(&self, session: &SessionId) {
        let mut map = self.sessions.write().await;
        let entry = map.entry(session.clone()).or_insert_with(Entry::new);
        entry.history.clear();
        entry.last_used = Instant::now();
    }

    async fn enforce_capacity(&self, session: &SessionId) -> usize {
        let mut map = self.sessions.write().await;
        let Some(entry) = map.get_mut(session) else {
            return 0;
        };
        let evicted = entry.history.enforce_capacity(self.capacity);
        if evicted > 0 {
            tracing::debug!(session = %session, evicted, "Trimmed history to capacity");
        }
        evicted
    }
}
