//! # ResearchDesk DB
//!
//! Database pool, the PostgreSQL permission store and the factory that turns a
//! [`StoreConfig`] into a ready-to-use [`PermissionStore`].
//!
//! # Example
//!
//! ```ignore
//! use researchdesk_config::StoreConfig;
//! use researchdesk_db::connect_store;
//!
//! let store = connect_store(&StoreConfig::from_env()).await?;
//! let records = store.load().await?;
//! ```

use std::sync::Arc;

use anyhow::Context;
use researchdesk_config::{StoreBackend, StoreConfig};
use researchdesk_permissions::{
    FilePermissionStore, MemoryPermissionStore, PermissionStore, RemotePermissionStore,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub mod pg_store;

pub use pg_store::PgPermissionStore;
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// The pool is cheaply cloneable; create it once at startup.
pub async fn init_db_pool(config: &StoreConfig) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for the postgres permission store")?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the embedded migrations against `pool`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

/// Builds the configured permission store backend.
///
/// For postgres this connects the pool and runs migrations, so the returned
/// store is ready for `load` and `bulk_save`.
pub async fn connect_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn PermissionStore>> {
    let store: Arc<dyn PermissionStore> = match config.backend {
        StoreBackend::Postgres => {
            let pool = init_db_pool(config).await?;
            run_migrations(&pool).await?;
            Arc::new(PgPermissionStore::new(pool))
        }
        StoreBackend::Remote => Arc::new(RemotePermissionStore::new(config.remote_url.clone())),
        StoreBackend::File => Arc::new(FilePermissionStore::new(config.file_path.clone())),
        StoreBackend::Memory => Arc::new(MemoryPermissionStore::new()),
    };

    info!(backend = store.backend(), "Permission store ready");
    Ok(store)
}
