use std::path::PathBuf;

use clap::Parser;

/// Parley: a small web chat front-end for Gemini.
#[derive(Parser, Debug, Default)]
#[command(name = "parley", version, about)]
pub struct Args {
    /// Address to bind (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// System instruction file (overrides `instructions.path`).
    #[arg(long)]
    pub instructions: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> String {
        let level = self.log_level.as_deref().unwrap_or("info");
        ["parley_server", "parley_ai", "parley_config"]
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}
