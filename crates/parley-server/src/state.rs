//! Shared request-handling state.

use std::sync::Arc;

use parley_ai::ModelAdapter;
use parley_config::AppConfig;

use crate::session::{CookieSigner, HistoryStore};

/// Everything a handler needs, built once in `main` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<ModelAdapter>,
    pub store: Arc<dyn HistoryStore>,
    pub cookies: Arc<CookieSigner>,
    pub api_key: Option<Arc<str>>,
    pub system_instruction: Arc<str>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        adapter: ModelAdapter,
        store: Arc<dyn HistoryStore>,
        cookies: CookieSigner,
    ) -> Self {
        Self {
            adapter: Arc::new(adapter),
            store,
            cookies: Arc::new(cookies),
            api_key: config.api_key.as_deref().map(Arc::from),
            system_instruction: Arc::from(config.system_instruction.as_str()),
        }
    }
}
