//! # ResearchDesk Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`navigation`]: resolver fallback access level
//! - [`server`]: listen address
//! - [`store`]: permission store backend selection
//!
//! # Example
//!
//! ```ignore
//! use researchdesk_config::{CorsConfig, NavigationConfig, StoreConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let navigation_config = NavigationConfig::from_env();
//! let store_config = StoreConfig::from_env();
//! ```

pub mod cors;
pub mod navigation;
pub mod server;
pub mod store;

pub use cors::CorsConfig;
pub use navigation::NavigationConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};
