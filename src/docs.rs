use utoipa::OpenApi;

use researchdesk_models::{
    AccessDecision, AccessLevel, BulkReplacePermissionsDto, BulkReplaceResponse, MenuEntry,
    NavigationCatalog, NavigationPermission, UpdateAccessLevelDto,
};

use crate::modules::navigation_permissions::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::navigation_permissions::controller::list_permissions,
        crate::modules::navigation_permissions::controller::bulk_replace_permissions,
        crate::modules::navigation_permissions::controller::update_access_level,
        crate::modules::navigation_permissions::controller::reset_permissions,
        crate::modules::navigation_permissions::controller::get_default_permissions,
        crate::modules::navigation_permissions::controller::get_catalog,
        crate::modules::navigation_permissions::controller::check_access,
        crate::modules::navigation_permissions::controller::get_menu,
    ),
    components(
        schemas(
            AccessLevel,
            NavigationPermission,
            BulkReplacePermissionsDto,
            BulkReplaceResponse,
            UpdateAccessLevelDto,
            AccessDecision,
            MenuEntry,
            NavigationCatalog,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Navigation Permissions", description = "Role-based visibility and edit rights for application sections")
    ),
    info(
        title = "ResearchDesk Navigation Permissions API",
        version = "0.1.0",
        description = "Permission store and resolver for the ResearchDesk navigation menu.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
