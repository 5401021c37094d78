//! Permission store configuration.
//!
//! Selects which `PermissionStore` backend a process talks to and carries the
//! settings each backend needs.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

/// Backend holding the durable copy of the permission table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL table, used by the HTTP service.
    Postgres,
    /// The HTTP service's `/api/navigation-permissions` endpoints.
    Remote,
    /// A local JSON file.
    File,
    /// Process memory only. Nothing survives a restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "remote" | "http" => Ok(Self::Remote),
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown permission store backend '{}'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Postgres => "postgres",
            Self::Remote => "remote",
            Self::File => "file",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// # Environment Variables
///
/// - `PERMISSION_STORE`: `postgres` | `remote` | `file` | `memory` (default `postgres`)
/// - `DATABASE_URL`: PostgreSQL connection string (postgres backend)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default `5`)
/// - `PERMISSION_STORE_URL`: base URL of the remote store
///   (default `http://localhost:3000/api/navigation-permissions`)
/// - `PERMISSION_STORE_FILE`: JSON file path
///   (default `storage/navigation_permissions.json`)
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub remote_url: String,
    pub file_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            database_url: None,
            max_connections: 5,
            remote_url: "http://localhost:3000/api/navigation-permissions".to_string(),
            file_path: PathBuf::from("storage/navigation_permissions.json"),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend = match env::var("PERMISSION_STORE") {
            Ok(value) => value.parse().unwrap_or_else(|err: String| {
                warn!("{}; falling back to {}", err, defaults.backend);
                defaults.backend
            }),
            Err(_) => defaults.backend,
        };

        Self {
            backend,
            database_url: env::var("DATABASE_URL").ok(),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            remote_url: env::var("PERMISSION_STORE_URL").unwrap_or(defaults.remote_url),
            file_path: env::var("PERMISSION_STORE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
        }
    }

    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }
}
