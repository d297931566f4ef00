//! Per-browser conversation state.
//!
//! A signed cookie carries the session id; the history itself lives in a
//! [`HistoryStore`] keyed by that id.

mod cookie;
mod store;

pub use cookie::{CookieSigner, ResolvedSession, SESSION_COOKIE};
pub use store::{HistoryStore, MemoryHistoryStore};
