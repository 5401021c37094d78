//! Navigation permission resolution for ResearchDesk.
//!
//! Decides, for every job title and navigation section, whether the section
//! is hidden, read-only or editable:
//!
//! - [`defaults`]: the default policy generated from the compiled catalog
//! - [`resolver`]: lookups over an in-memory table
//! - [`store`]: durable backends (memory, file, remote HTTP)
//! - [`session`]: load-or-seed at startup and write-through on change

pub mod defaults;
pub mod error;
pub mod resolver;
pub mod session;
pub mod store;

pub use defaults::{default_access_level, generate_defaults};
pub use error::{SessionError, StoreError, TableError};
pub use resolver::PermissionResolver;
pub use session::{PermissionSession, TableOrigin};
pub use store::{
    FilePermissionStore, MemoryPermissionStore, PermissionStore, RemotePermissionStore,
    SimulatedFailure, StoreFuture, parse_permission_records,
};
