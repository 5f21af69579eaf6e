//! Credential store implementations.
//!
//! `FileCredentialStore` keeps the bearer token and login email in
//! `credentials.toml` under the Daybook config directory.
//! `MemoryCredentialStore` holds them in process only.

use crate::paths::DaybookPaths;
use crate::storage::SecureTomlFile;
use async_trait::async_trait;
use daybook_core::credential::CredentialStore;
use daybook_core::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Contents of `credentials.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    login_email: Option<String>,
}

/// File-backed credential store.
pub struct FileCredentialStore {
    file: SecureTomlFile<StoredCredentials>,
}

impl FileCredentialStore {
    /// Uses the default location (`<config_dir>/daybook/credentials.toml`).
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(DaybookPaths::credentials_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: SecureTomlFile::new(path),
        }
    }

    fn read(&self) -> Result<StoredCredentials> {
        Ok(self.file.load()?.unwrap_or_default())
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut StoredCredentials),
    {
        self.file.update(StoredCredentials::default(), f)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.read()?.access_token)
    }

    async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.read()?.refresh_token)
    }

    async fn save_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()> {
        tracing::debug!("[CredentialStore] Saving tokens to {:?}", self.file.path());
        self.modify(|stored| {
            stored.access_token = Some(access_token.to_string());
            if let Some(refresh) = refresh_token {
                stored.refresh_token = Some(refresh.to_string());
            }
        })
    }

    async fn clear_tokens(&self) -> Result<()> {
        tracing::debug!("[CredentialStore] Clearing tokens");
        self.modify(|stored| {
            stored.access_token = None;
            stored.refresh_token = None;
        })
    }

    async fn login_email(&self) -> Result<Option<String>> {
        Ok(self.read()?.login_email)
    }

    async fn save_login_email(&self, email: &str) -> Result<()> {
        self.modify(|stored| stored.login_email = Some(email.to_string()))
    }

    async fn clear_login_email(&self) -> Result<()> {
        self.modify(|stored| stored.login_email = None)
    }
}

/// In-process credential store.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<StoredCredentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds an access token.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(StoredCredentials {
                access_token: Some(token.into()),
                ..StoredCredentials::default()
            }),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.inner.read().await.access_token.clone())
    }

    async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.inner.read().await.refresh_token.clone())
    }

    async fn save_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.access_token = Some(access_token.to_string());
        if let Some(refresh) = refresh_token {
            inner.refresh_token = Some(refresh.to_string());
        }
        Ok(())
    }

    async fn clear_tokens(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.access_token = None;
        inner.refresh_token = None;
        Ok(())
    }

    async fn login_email(&self) -> Result<Option<String>> {
        Ok(self.inner.read().await.login_email.clone())
    }

    async fn save_login_email(&self, email: &str) -> Result<()> {
        self.inner.write().await.login_email = Some(email.to_string());
        Ok(())
    }

    async fn clear_login_email(&self) -> Result<()> {
        self.inner.write().await.login_email = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_path(temp_dir.path().join("credentials.toml"));

        assert!(store.access_token().await.unwrap().is_none());

        store.save_tokens("access-1", Some("refresh-1")).await.unwrap();
        store.save_login_email("me@example.com").await.unwrap();

        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("refresh-1"));
        assert_eq!(store.login_email().await.unwrap().as_deref(), Some("me@example.com"));
    }

    #[tokio::test]
    async fn test_clear_tokens_keeps_email() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_path(temp_dir.path().join("credentials.toml"));
        store.save_tokens("access-1", None).await.unwrap();
        store.save_login_email("me@example.com").await.unwrap();

        store.clear_tokens().await.unwrap();

        assert!(store.access_token().await.unwrap().is_none());
        assert_eq!(store.login_email().await.unwrap().as_deref(), Some("me@example.com"));

        store.clear_login_email().await.unwrap();
        assert!(store.login_email().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_without_refresh_keeps_previous_refresh() {
        let store = MemoryCredentialStore::new();
        store.save_tokens("a1", Some("r1")).await.unwrap();
        store.save_tokens("a2", None).await.unwrap();

        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("r1"));
    }
}
