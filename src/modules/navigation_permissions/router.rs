use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    bulk_replace_permissions, check_access, get_catalog, get_default_permissions, get_menu,
    list_permissions, reset_permissions, update_access_level,
};

pub fn init_navigation_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_permissions))
        .route("/bulk", post(bulk_replace_permissions))
        .route("/reset", post(reset_permissions))
        .route("/defaults", get(get_default_permissions))
        .route("/catalog", get(get_catalog))
        .route("/access", get(check_access))
        .route("/menu", get(get_menu))
        .route("/{job_title}/{navigation_item}", put(update_access_level))
}
