//! A resolver session talking to the service over HTTP.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use common::{BASE, setup_test_app};
use researchdesk::state::AppState;
use researchdesk_config::NavigationConfig;
use researchdesk_models::AccessLevel;
use researchdesk_permissions::{
    MemoryPermissionStore, PermissionSession, PermissionStore, RemotePermissionStore,
    SimulatedFailure, StoreError, TableOrigin, generate_defaults,
};

async fn serve(store: Arc<MemoryPermissionStore>) -> (SocketAddr, AppState) {
    let (app, state) = setup_test_app(store).await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn remote(addr: SocketAddr) -> RemotePermissionStore {
    RemotePermissionStore::new(format!("http://{}{}", addr, BASE))
}

#[tokio::test]
async fn test_remote_load_returns_service_table() {
    let (addr, _) = serve(Arc::new(MemoryPermissionStore::new())).await;

    let records = remote(addr).load().await.unwrap();

    assert_eq!(records, generate_defaults());
}

#[tokio::test]
async fn test_session_over_http_round_trips_edits() {
    let backing = Arc::new(MemoryPermissionStore::new());
    let (addr, _) = serve(backing.clone()).await;

    let session = PermissionSession::start(Arc::new(remote(addr)), &NavigationConfig::default()).await;
    assert_eq!(
        session.origin(),
        TableOrigin::Store {
            records: generate_defaults().len()
        }
    );

    session
        .set_access_level("Investigator", "reports", AccessLevel::Hide)
        .await
        .unwrap();
    session.close().await;

    let stored = backing
        .records()
        .into_iter()
        .find(|r| r.matches("Investigator", "reports"))
        .unwrap();
    assert_eq!(stored.access_level, AccessLevel::Hide);

    let reopened =
        PermissionSession::start(Arc::new(remote(addr)), &NavigationConfig::default()).await;
    assert!(reopened.is_hidden("Investigator", "reports"));
}

#[tokio::test]
async fn test_service_outage_surfaces_as_status() {
    let backing = Arc::new(MemoryPermissionStore::new());
    let (addr, _) = serve(backing.clone()).await;
    backing.set_load_failure(Some(SimulatedFailure::Unreachable));

    let err = remote(addr).load().await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 503 }), "{err:?}");

    // A session facing the outage still resolves from defaults.
    let session = PermissionSession::start(Arc::new(remote(addr)), &NavigationConfig::default()).await;
    assert!(matches!(session.origin(), TableOrigin::Defaults { .. }));
    assert!(session.is_hidden("PhD Student", "contracts"));
}

#[tokio::test]
async fn test_remote_bulk_save_with_duplicates_is_rejected() {
    let (addr, _) = serve(Arc::new(MemoryPermissionStore::new())).await;
    let duplicate = vec![
        researchdesk_models::NavigationPermission::new("Investigator", "reports", AccessLevel::View),
        researchdesk_models::NavigationPermission::new("Investigator", "reports", AccessLevel::Hide),
    ];

    let err = remote(addr).bulk_save(&duplicate).await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 422 }), "{err:?}");
}
