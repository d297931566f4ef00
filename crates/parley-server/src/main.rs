//! parley: web chat server relaying browser messages to Gemini.
//!
//! Serves the chat page, keeps one bounded conversation per browser
//! session, and forwards each conversation to the model adapter.

mod cli;
mod error;
mod routes;
mod session;
mod state;

use std::sync::Arc;
use std::time::Duration;

use parley_ai::{GeminiConfig, ModelAdapter};
use parley_common::ParleyError;
use parley_config::{AppConfig, ParleyConfig, API_KEY_ENV};
use tokio::net::TcpListener;

use crate::cli::Args;
use crate::session::{CookieSigner, MemoryHistoryStore};
use crate::state::AppState;

const REAPER_INTERVAL: Duration = Duration::from_secs(60);

fn main() {
    // Environment mutation has to happen before the runtime spawns workers.
    let dotenv = parley_config::load_dotenv();
    let args = cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_filter().into()),
        )
        .init();

    if let Some(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded .env");
    }

    let result = build_runtime()
        .map_err(ParleyError::from)
        .and_then(|runtime| runtime.block_on(run(args)));
    if let Err(e) = result {
        tracing::error!(error = %e, "parley exited with an error");
        std::process::exit(1);
    }
}

fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

async fn run(args: Args) -> Result<(), ParleyError> {
    let settings = load_settings(&args);
    let config = AppConfig::assemble(settings);
    tracing::debug!(config = ?config, "Configuration resolved");

    let adapter = build_adapter(&config);
    let store = MemoryHistoryStore::new(config.history_capacity());
    tracing::info!(capacity = ?store.capacity(), "History store ready");
    spawn_reaper(
        store.clone(),
        Duration::from_secs(config.settings.server.session_ttl_secs),
    );

    let state = AppState::new(
        &config,
        adapter,
        Arc::new(store),
        CookieSigner::random(),
    );
    let app = routes::router(state);

    let addr = format!("{}:{}", config.settings.server.host, config.settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("parley listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("parley stopped");
    Ok(())
}

/// File settings with CLI overrides applied. An unreadable or invalid file
/// is reported and replaced by defaults.
fn load_settings(args: &Args) -> ParleyConfig {
    let mut settings = match parley_config::load_config(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "Using default configuration");
            ParleyConfig::default()
        }
    };

    if let Some(host) = &args.host {
        settings.server.host = host.clone();
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(path) = &args.instructions {
        settings.instructions.path = path.clone();
    }
    settings
}

fn build_adapter(config: &AppConfig) -> ModelAdapter {
    let Some(api_key) = config.api_key.as_deref() else {
        tracing::error!("{API_KEY_ENV} is not set; /chat will answer with errors");
        return ModelAdapter::unavailable(format!("{API_KEY_ENV} is not set"));
    };

    let model = &config.settings.model;
    let gemini = GeminiConfig::new(api_key)
        .with_model(&model.name)
        .with_max_output_tokens(model.max_output_tokens)
        .with_temperature(model.temperature)
        .with_api_base(&model.api_base)
        .with_request_timeout(Duration::from_secs(model.request_timeout_secs))
        .with_system_instruction(&config.system_instruction);
    ModelAdapter::gemini(gemini)
}

fn spawn_reaper(store: MemoryHistoryStore, ttl: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REAPER_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            let reaped = store.reap_stale(ttl).await;
            let count = store.count().await;
            tracing::debug!(reaped, sessions = count, "Reaper tick");
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
