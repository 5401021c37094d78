//! HTTP permission store.
//!
//! Talks to the store service:
//!
//! - `GET {base_url}` returns the collection as a JSON array
//! - `POST {base_url}/bulk` with `{"permissions": [...]}` replaces it
//!
//! No timeout and no retry are applied; callers decide what a failure means.

use researchdesk_models::NavigationPermission;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{PermissionStore, StoreFuture, parse_permission_records};
use crate::error::StoreError;

#[derive(Serialize)]
struct BulkReplaceBody<'a> {
    permissions: &'a [NavigationPermission],
}

#[derive(Debug, Clone)]
pub struct RemotePermissionStore {
    base_url: String,
    client: reqwest::Client,
}

impl RemotePermissionStore {
    /// `base_url` is the collection URL, e.g.
    /// `http://localhost:3000/api/navigation-permissions`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bulk_url(&self) -> String {
        format!("{}/bulk", self.base_url)
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_decode() {
        StoreError::Malformed(err.to_string())
    } else {
        StoreError::Unreachable(err.to_string())
    }
}

impl PermissionStore for RemotePermissionStore {
    #[instrument(skip(self), fields(url = %self.base_url))]
    fn load(&self) -> StoreFuture<'_, Vec<NavigationPermission>> {
        Box::pin(async move {
            let response = self
                .client
                .get(&self.base_url)
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(StoreError::Status {
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(transport_error)?;
            debug!(bytes = body.len(), "Loaded permission collection");
            parse_permission_records(&body)
        })
    }

    #[instrument(skip(self, permissions), fields(url = %self.base_url, count = permissions.len()))]
    fn bulk_save<'a>(&'a self, permissions: &'a [NavigationPermission]) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.bulk_url())
                .json(&BulkReplaceBody { permissions })
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(StoreError::Status {
                    status: status.as_u16(),
                });
            }

            Ok(())
        })
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = RemotePermissionStore::new("http://localhost:3000/api/navigation-permissions/");
        assert_eq!(
            store.base_url(),
            "http://localhost:3000/api/navigation-permissions"
        );
        assert_eq!(
            store.bulk_url(),
            "http://localhost:3000/api/navigation-permissions/bulk"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_unreachable() {
        // Port 9 on loopback: nothing listens, the connection is refused.
        let store = RemotePermissionStore::new("http://127.0.0.1:9/api/navigation-permissions");
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Unreachable(_)), "{err:?}");
    }
}
