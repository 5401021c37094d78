use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use researchdesk_core::AppError;
use researchdesk_models::{
    AccessDecision, AccessQuery, BulkReplacePermissionsDto, BulkReplaceResponse, MenuEntry,
    MenuQuery, NavigationCatalog, NavigationPermission, UpdateAccessLevelDto,
};

use crate::modules::navigation_permissions::service::NavigationPermissionService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[utoipa::path(
    get,
    path = "/api/navigation-permissions",
    responses(
        (status = 200, description = "Stored permission table", body = Vec<NavigationPermission>),
        (status = 503, description = "Permission store unavailable", body = ErrorResponse)
    ),
    tag = "Navigation Permissions"
)]
#[instrument(skip(state))]
pub async fn list_permissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<NavigationPermission>>, AppError> {
    let permissions = NavigationPermissionService::list_permissions(state.store.as_ref()).await?;
    Ok(Json(permissions))
}

#[utoipa::path(
    post,
    path = "/api/navigation-permissions/bulk",
    request_body = BulkReplacePermissionsDto,
    responses(
        (status = 200, description = "Table replaced", body = BulkReplaceResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 422, description = "Invalid record or duplicate pair", body = ErrorResponse),
        (status = 503, description = "Permission store unavailable", body = ErrorResponse)
    ),
    tag = "Navigation Permissions"
)]
#[instrument(skip(state, dto))]
pub async fn bulk_replace_permissions(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkReplacePermissionsDto>,
) -> Result<Json<BulkReplaceResponse>, AppError> {
    let response = NavigationPermissionService::bulk_replace(&state.session, dto).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/navigation-permissions/{job_title}/{navigation_item}",
    params(
        ("job_title" = String, Path, description = "Job title"),
        ("navigation_item" = String, Path, description = "Navigation item identifier")
    ),
    request_body = UpdateAccessLevelDto,
    responses(
        (status = 200, description = "Access level changed", body = AccessDecision),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 422, description = "Job title or navigation item breaks the record rules", body = ErrorResponse)
    ),
    tag = "Navigation Permissions"
)]
#[instrument(skip(state))]
pub async fn update_access_level(
    State(state): State<AppState>,
    Path((job_title, navigation_item)): Path<(String, String)>,
    ValidatedJson(dto): ValidatedJson<UpdateAccessLevelDto>,
) -> Result<Json<AccessDecision>, AppError> {
    let decision = NavigationPermissionService::set_access_level(
        &state.session,
        &job_title,
        &navigation_item,
        dto.access_level,
    )
    .await?;
    Ok(Json(decision))
}

#[utoipa::path(
    post,
    path = "/api/navigation-permissions/reset",
    responses(
        (status = 200, description = "Defaults restored", body = BulkReplaceResponse)
    ),
    tag = "Navigation Permissions"
)]
#[instrument(skip(state))]
pub async fn reset_permissions(State(state): State<AppState>) -> Json<BulkReplaceResponse> {
    Json(NavigationPermissionService::reset_to_defaults(&state.session).await)
}

#[utoipa::path(
    get,
    path = "/api/navigation-permissions/defaults",
    responses(
        (status = 200, description = "Generated default table", body = Vec<NavigationPermission>)
    ),
    tag = "Navigation Permissions"
)]
pub async fn get_default_permissions() -> Json<Vec<NavigationPermission>> {
    Json(NavigationPermissionService::default_permissions())
}

#[utoipa::path(
    get,
    path = "/api/navigation-permissions/catalog",
    responses(
        (status = 200, description = "Job titles, navigation items and access levels", body = NavigationCatalog)
    ),
    tag = "Navigation Permissions"
)]
pub async fn get_catalog() -> Json<NavigationCatalog> {
    Json(NavigationCatalog::compiled())
}

#[utoipa::path(
    get,
    path = "/api/navigation-permissions/access",
    params(
        ("job_title" = String, Query, description = "Job title"),
        ("navigation_item" = String, Query, description = "Navigation item identifier")
    ),
    responses(
        (status = 200, description = "Resolved access for the pair", body = AccessDecision)
    ),
    tag = "Navigation Permissions"
)]
#[instrument(skip(state))]
pub async fn check_access(
    State(state): State<AppState>,
    Query(query): Query<AccessQuery>,
) -> Json<AccessDecision> {
    Json(NavigationPermissionService::check_access(
        &state.session,
        &query.job_title,
        &query.navigation_item,
    ))
}

#[utoipa::path(
    get,
    path = "/api/navigation-permissions/menu",
    params(
        ("job_title" = String, Query, description = "Job title")
    ),
    responses(
        (status = 200, description = "Visible navigation entries in menu order", body = Vec<MenuEntry>)
    ),
    tag = "Navigation Permissions"
)]
#[instrument(skip(state))]
pub async fn get_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Json<Vec<MenuEntry>> {
    Json(NavigationPermissionService::menu(
        &state.session,
        &query.job_title,
    ))
}
