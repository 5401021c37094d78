//! PostgreSQL permission store.
//!
//! The table is replaced wholesale: one transaction deletes every row and
//! inserts the new table in multi-value batches. Rows keep their table
//! position so a load returns records in the order they were saved.

use researchdesk_models::{AccessLevel, NavigationPermission};
use researchdesk_permissions::store::{PermissionStore, StoreFuture};
use researchdesk_permissions::{StoreError, TableError, resolver::check_table};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

/// 4 params per row; stays well below the PostgreSQL bind limit.
const BATCH_SIZE: usize = 1000;

#[derive(Debug, FromRow)]
struct PermissionRow {
    job_title: String,
    navigation_item: String,
    access_level: String,
}

impl TryFrom<PermissionRow> for NavigationPermission {
    type Error = StoreError;

    fn try_from(row: PermissionRow) -> Result<Self, Self::Error> {
        let access_level: AccessLevel = row
            .access_level
            .parse()
            .map_err(|e: researchdesk_models::ParseAccessLevelError| {
                StoreError::Malformed(e.to_string())
            })?;

        Ok(NavigationPermission {
            job_title: row.job_title,
            navigation_item: row.navigation_item,
            access_level,
        })
    }
}

fn backend_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unreachable(err.to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Malformed(err.to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct PgPermissionStore {
    pool: PgPool,
}

impl PgPermissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_chunk(
    tx: &mut Transaction<'_, Postgres>,
    offset: usize,
    permissions: &[NavigationPermission],
) -> Result<(), sqlx::Error> {
    if permissions.is_empty() {
        return Ok(());
    }

    let mut query = String::from(
        "INSERT INTO navigation_permissions (job_title, navigation_item, access_level, position) VALUES ",
    );
    for i in 0..permissions.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 4;
        query.push_str(&format!("(${}, ${}, ${}, ${})", p + 1, p + 2, p + 3, p + 4));
    }

    let mut q = sqlx::query(&query);
    for (i, permission) in permissions.iter().enumerate() {
        q = q
            .bind(&permission.job_title)
            .bind(&permission.navigation_item)
            .bind(permission.access_level.as_str())
            .bind((offset + i) as i32);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

impl PermissionStore for PgPermissionStore {
    #[instrument(skip(self))]
    fn load(&self) -> StoreFuture<'_, Vec<NavigationPermission>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, PermissionRow>(
                r#"
                SELECT job_title, navigation_item, access_level
                FROM navigation_permissions
                ORDER BY position, job_title, navigation_item
                "#,
            )
            .fetch_all(&self.pool)
            .await
            .map_err(backend_error)?;

            debug!(rows = rows.len(), "Loaded navigation permission rows");
            rows.into_iter().map(NavigationPermission::try_from).collect()
        })
    }

    #[instrument(skip(self, permissions), fields(count = permissions.len()))]
    fn bulk_save<'a>(&'a self, permissions: &'a [NavigationPermission]) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            // The primary key would reject duplicates mid-transaction; fail early instead.
            check_table(permissions).map_err(|e: TableError| {
                StoreError::Backend(e.to_string())
            })?;

            let mut tx = self.pool.begin().await.map_err(backend_error)?;

            sqlx::query("DELETE FROM navigation_permissions")
                .execute(&mut *tx)
                .await
                .map_err(backend_error)?;

            for (chunk_index, chunk) in permissions.chunks(BATCH_SIZE).enumerate() {
                insert_chunk(&mut tx, chunk_index * BATCH_SIZE, chunk)
                    .await
                    .map_err(backend_error)?;
            }

            tx.commit().await.map_err(backend_error)?;
            Ok(())
        })
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(level: &str) -> PermissionRow {
        PermissionRow {
            job_title: "Investigator".to_string(),
            navigation_item: "reports".to_string(),
            access_level: level.to_string(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let permission = NavigationPermission::try_from(row("view")).unwrap();
        assert_eq!(permission.access_level, AccessLevel::View);
        assert_eq!(permission.id(), "Investigator:reports");
    }

    #[test]
    fn test_unknown_level_in_row_is_malformed() {
        let err = NavigationPermission::try_from(row("admin")).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_pool_errors_are_unreachable() {
        assert!(matches!(
            backend_error(sqlx::Error::PoolTimedOut),
            StoreError::Unreachable(_)
        ));
        assert!(matches!(
            backend_error(sqlx::Error::RowNotFound),
            StoreError::Backend(_)
        ));
    }
}
