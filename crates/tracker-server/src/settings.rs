//! Runtime server configuration.
//!
//! Loaded from an optional TOML file layered under `TRACKER_*` environment
//! variables. Every field has a default, so an empty environment yields a
//! working SQLite-backed server on `127.0.0.1:3000`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }
fn default_sqlite_path() -> PathBuf { PathBuf::from("tracker.db") }

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  /// PostgreSQL connection string. Selects the PostgreSQL engine when set.
  #[serde(default)]
  pub database_url:        Option<String>,
  #[serde(default = "default_sqlite_path")]
  pub sqlite_path:         PathBuf,
  /// argon2 PHC string for the administrator secret.
  #[serde(default)]
  pub admin_password_hash: Option<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                default_host(),
      port:                default_port(),
      database_url:        None,
      sqlite_path:         default_sqlite_path(),
      admin_password_hash: None,
    }
  }
}

/// Which storage engine to run against. Decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEngine {
  Sqlite { path: PathBuf },
  Postgres { url: String },
}

impl ServerConfig {
  /// A non-blank `database_url` selects PostgreSQL; otherwise SQLite.
  pub fn engine(&self) -> StorageEngine {
    match self.database_url.as_deref().map(str::trim) {
      Some(url) if !url.is_empty() => StorageEngine::Postgres { url: url.to_string() },
      _ => StorageEngine::Sqlite { path: expand_tilde(&self.sqlite_path) },
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
