//! Directory configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnectOptions;
use tracing::debug;

use crate::Result;

const APP_DIR: &str = "laberator";
const DATABASE_FILE: &str = "laberator.db";
const CONFIG_FILE: &str = "config.json";

/// Settings used to open an [`AccountDirectory`](crate::AccountDirectory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Path of the `SQLite` database file.
    pub database_path: PathBuf,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        let database_path = dirs::data_dir().map_or_else(
            || PathBuf::from(DATABASE_FILE),
            |dir| dir.join(APP_DIR).join(DATABASE_FILE),
        );

        Self {
            database_path,
            max_connections: 5,
        }
    }
}

impl DirectoryConfig {
    /// Create a config pointing at the given database file.
    #[must_use]
    pub fn with_database(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Self::default()
        }
    }

    /// Default location of the config file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Load the config from a JSON file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// `SQLite` connection options for the database file, created on demand.
    ///
    /// The path is handed to the driver as-is, so characters such as `?` or
    /// `%` in file names are not interpreted.
    #[must_use]
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.database_path)
            .create_if_missing(true)
    }
}
