//! # ResearchDesk Models
//!
//! Domain models and DTOs shared by the service, the permission library and
//! the CLI.
//!
//! # Modules
//!
//! - [`navigation_permissions`]: access levels, permission records, request
//!   and response types
//!
//! # Example
//!
//! ```ignore
//! use researchdesk_models::{AccessLevel, NavigationPermission};
//!
//! let record = NavigationPermission::new("Grant Officer", "grants", AccessLevel::Edit);
//! assert!(record.access_level.can_edit());
//! ```

pub mod navigation_permissions;

pub use navigation_permissions::{
    AccessDecision, AccessLevel, AccessQuery, BulkReplacePermissionsDto, BulkReplaceResponse,
    MenuEntry, MenuQuery, NavigationCatalog, NavigationPermission, ParseAccessLevelError,
    UpdateAccessLevelDto,
};
