//! Durable storage for the permission table.
//!
//! A [`PermissionStore`] knows two operations: load the whole table and
//! replace the whole table. There is no per-row patch. Backends can be
//! swapped without touching the resolver or the session:
//!
//! - [`MemoryPermissionStore`]: process memory, used by tests
//! - [`FilePermissionStore`]: a local JSON file
//! - [`RemotePermissionStore`]: the HTTP store service
//!
//! The Postgres backend lives in `researchdesk-db`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use researchdesk_permissions::store::{FilePermissionStore, PermissionStore};
//!
//! let store: Arc<dyn PermissionStore> =
//!     Arc::new(FilePermissionStore::new("storage/navigation_permissions.json"));
//! let records = store.load().await?;
//! store.bulk_save(&records).await?;
//! ```

use std::future::Future;
use std::pin::Pin;

use researchdesk_models::NavigationPermission;

use crate::error::StoreError;
use crate::resolver::check_table;

pub mod file;
pub mod memory;
pub mod remote;

pub use file::FilePermissionStore;
pub use memory::{MemoryPermissionStore, SimulatedFailure};
pub use remote::RemotePermissionStore;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Abstract trait for permission store backends.
pub trait PermissionStore: Send + Sync {
    /// Load the full permission collection.
    ///
    /// An empty store returns `Ok(vec![])`. Data that does not parse as a
    /// table of unique records is a [`StoreError::Malformed`].
    fn load(&self) -> StoreFuture<'_, Vec<NavigationPermission>>;

    /// Replace the whole collection with `permissions`.
    fn bulk_save<'a>(&'a self, permissions: &'a [NavigationPermission]) -> StoreFuture<'a, ()>;

    /// Backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Strictly parse a serialized permission collection.
///
/// The body must be a JSON array of records with a known `accessLevel`,
/// identifiers that pass [`check_pair`](crate::resolver::check_pair), and
/// no repeated pair. Any
/// violation rejects the whole batch.
pub fn parse_permission_records(bytes: &[u8]) -> Result<Vec<NavigationPermission>, StoreError> {
    let records: Vec<NavigationPermission> =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Malformed(e.to_string()))?;
    check_records(&records)?;
    Ok(records)
}

fn check_records(records: &[NavigationPermission]) -> Result<(), StoreError> {
    check_table(records).map_err(|e| StoreError::Malformed(e.to_string()))
}
