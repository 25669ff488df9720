use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/prodtrack.toml";
const MEMORY_STORE: &str = ":memory:";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Path of the SQLite store file, or `:memory:`.
    pub database: String,
    pub backup_dir: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: "producao.db".to_string(),
            backup_dir: ".".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn database_url(&self) -> String {
        if self.database == MEMORY_STORE {
            String::from("sqlite::memory:")
        } else {
            format!("sqlite:{}?mode=rwc", self.database)
        }
    }

    pub fn is_memory(&self) -> bool {
        self.database == MEMORY_STORE
    }
}

/// File (optional), then `PRODTRACK_*` variables, then command-line flags.
pub fn load(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("PRODTRACK"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(database) = &cli.database {
        settings.database = database.clone();
    }
    if let Some(backup_dir) = &cli.backup_dir {
        settings.backup_dir = backup_dir.clone();
    }
    if let Some(log_level) = &cli.log_level {
        settings.log_level = log_level.clone();
    }

    Ok(settings)
}
