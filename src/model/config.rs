use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User configuration from `config.toml` (all optional; the file itself is
/// optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Override for the data directory holding the storage slots.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Skip the duplicate confirmation prompt (same as passing --yes).
    #[serde(default)]
    pub auto_confirm: bool,
}
