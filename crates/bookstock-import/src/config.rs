use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::openlibrary::{DEFAULT_BASE_URL, DEFAULT_QUERY};

/// Configuration for bookstock.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (BOOKSTOCK_* prefix)
/// 3. Config file (~/.config/bookstock/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite catalog.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/books.db
    /// - ENV: BOOKSTOCK_DATABASE_PATH
    /// - Config: database_path = "/path/to/books.db"
    /// - Default: ~/.local/share/bookstock/books.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Base URL of the Open Library API used for the first-run import.
    #[serde(default = "default_import_url")]
    pub import_url: String,

    /// Search terms for the first-run import.
    #[serde(default = "default_import_query")]
    pub import_query: String,

    /// Maximum number of books requested by the first-run import.
    #[serde(default = "default_import_limit")]
    pub import_limit: usize,

    /// Request timeout for the import, in seconds.
    #[serde(default = "default_import_timeout_secs")]
    pub import_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            import_url: default_import_url(),
            import_query: default_import_query(),
            import_limit: default_import_limit(),
            import_timeout_secs: default_import_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/bookstock/config.toml
    /// Reads environment variables with BOOKSTOCK_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("bookstock");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with custom database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }

    pub const fn import_timeout(&self) -> Duration {
        Duration::from_secs(self.import_timeout_secs)
    }
}

/// Get the default database path.
///
/// Returns: ~/.local/share/bookstock/books.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookstock")
        .join("books.db")
}

fn default_import_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_import_query() -> String {
    DEFAULT_QUERY.to_string()
}

const fn default_import_limit() -> usize {
    50
}

const fn default_import_timeout_secs() -> u64 {
    30
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/bookstock/config.toml
/// - macOS: ~/Library/Application Support/bookstock/config.toml
/// - Windows: %APPDATA%\bookstock\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookstock")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Bookstock Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (BOOKSTOCK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite catalog
#
# Can also be set via:
# - CLI: bookstock --db /custom/books.db
# - Environment: BOOKSTOCK_DATABASE_PATH=/custom/books.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/books.db"

# First-run import from Open Library
#
# Used only when the catalog is empty. If the import fails or returns
# nothing, two offline sample books are stored instead.
import_url = "https://openlibrary.org"
import_query = "best sellers"
import_limit = 50
import_timeout_secs = 30
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
