//! Local file permission store.
//!
//! The table lives in one JSON array file. A missing or blank file is an
//! empty store. Saves go to a sibling temp file that is renamed over the
//! target, so a crash mid-write leaves the previous table intact.

use std::path::PathBuf;

use researchdesk_models::NavigationPermission;
use tokio::fs;
use tracing::debug;

use super::{PermissionStore, StoreFuture, parse_permission_records};
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct FilePermissionStore {
    path: PathBuf,
}

impl FilePermissionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "navigation_permissions.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PermissionStore for FilePermissionStore {
    fn load(&self) -> StoreFuture<'_, Vec<NavigationPermission>> {
        Box::pin(async move {
            let bytes = match fs::read(&self.path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %self.path.display(), "Permission file missing, treating as empty");
                    return Ok(Vec::new());
                }
                Err(e) => return Err(e.into()),
            };

            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Vec::new());
            }

            parse_permission_records(&bytes)
        })
    }

    fn bulk_save<'a>(&'a self, permissions: &'a [NavigationPermission]) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let body = serde_json::to_vec_pretty(permissions)
                .map_err(|e| StoreError::Backend(e.to_string()))?;

            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }

            let temp_path = self.temp_path();
            fs::write(&temp_path, body).await?;
            fs::rename(&temp_path, &self.path).await?;

            Ok(())
        })
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::generate_defaults;
    use researchdesk_models::AccessLevel;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePermissionStore::new(dir.path().join("permissions.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_returns_same_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePermissionStore::new(dir.path().join("nested/permissions.json"));
        let defaults = generate_defaults();

        store.bulk_save(&defaults).await.unwrap();

        assert_eq!(store.load().await.unwrap(), defaults);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePermissionStore::new(dir.path().join("permissions.json"));

        store.bulk_save(&generate_defaults()).await.unwrap();
        let single = vec![NavigationPermission::new(
            "Investigator",
            "reports",
            AccessLevel::Hide,
        )];
        store.bulk_save(&single).await.unwrap();

        assert_eq!(store.load().await.unwrap(), single);
    }

    #[tokio::test]
    async fn test_garbage_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FilePermissionStore::new(path);
        assert!(store.load().await.unwrap_err().is_malformed());
    }

    #[tokio::test]
    async fn test_blank_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions.json");
        std::fs::write(&path, "  \n").unwrap();

        let store = FilePermissionStore::new(path);
        assert!(store.load().await.unwrap().is_empty());
    }
}
