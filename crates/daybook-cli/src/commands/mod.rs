pub mod auth;
pub mod render;
pub mod session;

use anyhow::Result;
use daybook_application::{AuthUseCase, ChatSessionUseCase};
use daybook_core::api::{AuthApi, DiaryApi};
use daybook_core::config::ClientConfig;
use daybook_core::credential::CredentialStore;
use daybook_infrastructure::{ApiClient, ConfigService, FileCredentialStore, HttpDiaryApi};
use std::sync::Arc;

/// Collaborators shared by every command.
pub struct Context {
    pub config: ClientConfig,
    credentials: Arc<dyn CredentialStore>,
    backend: Arc<HttpDiaryApi>,
}

impl Context {
    pub fn load(base_url_override: Option<&str>) -> Result<Self> {
        let config = ConfigService::new_default()?.load_required(base_url_override)?;
        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new_default()?);
        let client = ApiClient::new(&config, credentials.clone())?;

        Ok(Self {
            config,
            credentials,
            backend: Arc::new(HttpDiaryApi::new(client)),
        })
    }

    pub fn auth(&self) -> AuthUseCase {
        let api: Arc<dyn AuthApi> = self.backend.clone();
        AuthUseCase::new(api, self.credentials.clone())
    }

    pub fn sessions(&self) -> ChatSessionUseCase {
        let api: Arc<dyn DiaryApi> = self.backend.clone();
        ChatSessionUseCase::new(api)
    }
}
