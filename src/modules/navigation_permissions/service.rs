use tracing::{info, instrument, warn};
use validator::Validate;

use researchdesk_core::AppError;
use researchdesk_models::{
    AccessDecision, AccessLevel, BulkReplacePermissionsDto, BulkReplaceResponse, MenuEntry,
    NavigationPermission,
};
use researchdesk_observability::{track_access_check, track_permission_change};
use researchdesk_permissions::{
    PermissionSession, PermissionStore, SessionError, StoreError, generate_defaults,
};

use crate::validator::validation_error;

fn store_error(err: StoreError) -> AppError {
    warn!(error = %err, kind = err.kind(), "Permission store call failed");
    AppError::store_unavailable(err)
}

pub struct NavigationPermissionService;

impl NavigationPermissionService {
    /// Full collection as held by the durable store.
    #[instrument(skip(store), fields(backend = store.backend()))]
    pub async fn list_permissions(
        store: &dyn PermissionStore,
    ) -> Result<Vec<NavigationPermission>, AppError> {
        store.load().await.map_err(store_error)
    }

    /// Replace the whole table, waiting for the store before answering.
    #[instrument(skip(session, dto), fields(count = dto.permissions.len()))]
    pub async fn bulk_replace(
        session: &PermissionSession,
        dto: BulkReplacePermissionsDto,
    ) -> Result<BulkReplaceResponse, AppError> {
        let count = session.save(dto.permissions).await.map_err(|err| match err {
            SessionError::Table(e) => AppError::unprocessable(e),
            SessionError::Store(e) => store_error(e),
        })?;

        track_permission_change("bulk");
        info!(count, "Navigation permissions replaced");
        Ok(BulkReplaceResponse { count })
    }

    /// Change one pair. Path identifiers follow the same rules as records
    /// in a bulk replace.
    #[instrument(skip(session))]
    pub async fn set_access_level(
        session: &PermissionSession,
        job_title: &str,
        navigation_item: &str,
        access_level: AccessLevel,
    ) -> Result<AccessDecision, AppError> {
        NavigationPermission::new(job_title, navigation_item, access_level)
            .validate()
            .map_err(|errors| validation_error(&errors))?;

        let decision = session
            .set_access_level(job_title, navigation_item, access_level)
            .await
            .map_err(AppError::unprocessable)?;
        track_permission_change("set");
        Ok(decision)
    }

    #[instrument(skip(session))]
    pub async fn reset_to_defaults(session: &PermissionSession) -> BulkReplaceResponse {
        let count = session.reset_to_defaults().await;
        track_permission_change("reset");
        BulkReplaceResponse { count }
    }

    pub fn default_permissions() -> Vec<NavigationPermission> {
        generate_defaults()
    }

    #[instrument(skip(session))]
    pub fn check_access(
        session: &PermissionSession,
        job_title: &str,
        navigation_item: &str,
    ) -> AccessDecision {
        let decision = session.decision(job_title, navigation_item);
        track_access_check(decision.access_level.as_str());
        decision
    }

    #[instrument(skip(session))]
    pub fn menu(session: &PermissionSession, job_title: &str) -> Vec<MenuEntry> {
        session.menu(job_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use researchdesk_config::NavigationConfig;
    use researchdesk_permissions::{MemoryPermissionStore, SimulatedFailure};

    async fn session(store: Arc<MemoryPermissionStore>) -> PermissionSession {
        PermissionSession::start(store, &NavigationConfig::default()).await
    }

    #[tokio::test]
    async fn test_bulk_replace_maps_duplicates_to_unprocessable() {
        let session = session(Arc::new(MemoryPermissionStore::new())).await;
        let dto = BulkReplacePermissionsDto {
            permissions: vec![
                NavigationPermission::new("Investigator", "reports", AccessLevel::View),
                NavigationPermission::new("Investigator", "reports", AccessLevel::Hide),
            ],
        };

        let err = NavigationPermissionService::bulk_replace(&session, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_bulk_replace_maps_store_failure_to_unavailable() {
        let store = Arc::new(MemoryPermissionStore::new());
        let session = session(store.clone()).await;
        store.set_save_failure(Some(SimulatedFailure::Unreachable));

        let dto = BulkReplacePermissionsDto {
            permissions: vec![NavigationPermission::new(
                "Investigator",
                "reports",
                AccessLevel::View,
            )],
        };
        let err = NavigationPermissionService::bulk_replace(&session, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_bulk_replace_refuses_blank_job_title() {
        let session = session(Arc::new(MemoryPermissionStore::new())).await;
        let dto = BulkReplacePermissionsDto {
            permissions: vec![NavigationPermission::new("   ", "reports", AccessLevel::View)],
        };

        let err = NavigationPermissionService::bulk_replace(&session, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_set_access_level_refuses_unusable_identifiers() {
        let store = Arc::new(MemoryPermissionStore::new());
        let session = session(store.clone()).await;
        let long = "r".repeat(150);

        for (job, item) in [(" ", "reports"), (long.as_str(), "reports"), ("Investigator", "")] {
            let err = NavigationPermissionService::set_access_level(
                &session,
                job,
                item,
                AccessLevel::View,
            )
            .await
            .unwrap_err();
            assert_eq!(err.status, axum::http::StatusCode::UNPROCESSABLE_ENTITY, "{job:?}");
        }

        // The refused edits never reached the table, so later saves still load.
        NavigationPermissionService::set_access_level(
            &session,
            "Investigator",
            "reports",
            AccessLevel::Hide,
        )
        .await
        .unwrap();
        session.flush().await;
        let reopened = PermissionSession::start(store, &NavigationConfig::default()).await;
        assert!(matches!(
            reopened.origin(),
            researchdesk_permissions::TableOrigin::Store { .. }
        ));
        assert!(reopened.is_hidden("Investigator", "reports"));
    }
}
