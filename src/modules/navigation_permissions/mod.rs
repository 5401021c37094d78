pub mod controller;
pub mod router;
pub mod service;

pub use router::init_navigation_permissions_router;
pub use service::NavigationPermissionService;
