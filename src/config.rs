//! Runtime configuration.
//!
//! One knob: the database file path. It defaults to `users.db` under the
//! process working directory and is always passed explicitly into
//! [`CredentialStore::new`](crate::auth::CredentialStore::new), so tests
//! can inject isolated storage per run. No environment variables are
//! read here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default database filename, resolved against the working directory.
const DEFAULT_DB_FILE: &str = "users.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite database holding the `users` table.
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, or defaults when no file is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }
}
