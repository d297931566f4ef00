//! Configuration schema types for Parley.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the chat server has always
//! shipped with.

mod history;
mod instructions;
mod model;
mod server;

pub use history::*;
pub use instructions::*;
pub use model::*;
pub use server::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Parley.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ParleyConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub history: HistoryConfig,
    pub instructions: InstructionsConfig,
}
