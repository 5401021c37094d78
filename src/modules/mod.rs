pub mod navigation_permissions;
