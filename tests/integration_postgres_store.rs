//! PostgreSQL backend. Needs `DATABASE_URL`; run with `cargo test -- --ignored`.

use std::sync::Arc;

use researchdesk_config::NavigationConfig;
use researchdesk_db::PgPermissionStore;
use researchdesk_models::{AccessLevel, NavigationPermission};
use researchdesk_permissions::{PermissionSession, PermissionStore, TableOrigin, generate_defaults};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_empty_table_loads_as_empty(pool: PgPool) {
    let store = PgPermissionStore::new(pool);
    assert!(store.load().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_bulk_save_replaces_and_keeps_order(pool: PgPool) {
    let store = PgPermissionStore::new(pool);
    let defaults = generate_defaults();

    store.bulk_save(&defaults).await.unwrap();
    assert_eq!(store.load().await.unwrap(), defaults);

    let single = vec![NavigationPermission::new(
        "Investigator",
        "reports",
        AccessLevel::Hide,
    )];
    store.bulk_save(&single).await.unwrap();
    assert_eq!(store.load().await.unwrap(), single);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_check_constraint_rejects_unknown_level(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO navigation_permissions (job_title, navigation_item, access_level, position) VALUES ($1, $2, $3, $4)",
    )
    .bind("Investigator")
    .bind("reports")
    .bind("admin")
    .bind(0_i32)
    .execute(&pool)
    .await;

    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_session_seeds_postgres_once(pool: PgPool) {
    let store = Arc::new(PgPermissionStore::new(pool));

    let first = PermissionSession::start(store.clone(), &NavigationConfig::default()).await;
    assert_eq!(first.origin(), TableOrigin::Defaults { seeded: true });

    let second = PermissionSession::start(store, &NavigationConfig::default()).await;
    assert_eq!(
        second.origin(),
        TableOrigin::Store {
            records: generate_defaults().len()
        }
    );
}
