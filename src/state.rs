use std::sync::Arc;

use researchdesk_config::{CorsConfig, NavigationConfig, StoreConfig};
use researchdesk_db::connect_store;
use researchdesk_observability::PrometheusHandle;
use researchdesk_permissions::{PermissionSession, PermissionStore};

/// Shared service state.
///
/// `store` is the durable backend served by `GET /api/navigation-permissions`;
/// `session` is the service's own resolver over the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PermissionStore>,
    pub session: Arc<PermissionSession>,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Start the permission session against `store` (seeding it when empty).
    pub async fn new(
        store: Arc<dyn PermissionStore>,
        navigation_config: &NavigationConfig,
        cors_config: CorsConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        let session = PermissionSession::start(Arc::clone(&store), navigation_config).await;

        Self {
            store,
            session: Arc::new(session),
            cors_config,
            metrics,
        }
    }
}

pub async fn init_app_state(
    store_config: &StoreConfig,
    metrics: Option<PrometheusHandle>,
) -> anyhow::Result<AppState> {
    let store = connect_store(store_config).await?;

    Ok(AppState::new(
        store,
        &NavigationConfig::from_env(),
        CorsConfig::from_env(),
        metrics,
    )
    .await)
}
