//! # ResearchDesk Core
//!
//! Foundational pieces shared by every ResearchDesk crate:
//!
//! - [`errors`]: HTTP application error with response conversion
//! - [`navigation`]: the compiled catalog of job titles and navigation items
//!
//! # Example
//!
//! ```ignore
//! use researchdesk_core::errors::AppError;
//! use researchdesk_core::navigation::{JOB_TITLES, NAVIGATION_ITEMS};
//!
//! let error = AppError::unprocessable(anyhow::anyhow!("duplicate pair"));
//! let grid_size = JOB_TITLES.len() * NAVIGATION_ITEMS.len();
//! ```

pub mod errors;
pub mod navigation;

pub use errors::AppError;
pub use navigation::{JOB_TITLES, NAVIGATION_ITEMS};
