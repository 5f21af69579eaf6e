//! Authentication use case.

use daybook_core::api::{AuthApi, SignupRequest};
use daybook_core::credential::CredentialStore;
use daybook_core::error::Result;
use std::sync::Arc;

/// Logs the user in and out, keeping the credential store in sync.
pub struct AuthUseCase {
    api: Arc<dyn AuthApi>,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthUseCase {
    pub fn new(api: Arc<dyn AuthApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { api, credentials }
    }

    /// Exchanges credentials for a token and remembers the login email.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let token = self.api.login(email, password).await?;
        self.credentials.save_tokens(&token, None).await?;
        self.credentials.save_login_email(email).await?;
        tracing::info!("[AuthUseCase] Logged in as {}", email);
        Ok(())
    }

    /// Registers an account, then logs in with it.
    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.api.signup(request).await?;
        tracing::info!("[AuthUseCase] Account created for {}", request.email);
        self.login(&request.email, &request.password).await
    }

    /// Forgets the tokens and the remembered email.
    pub async fn logout(&self) -> Result<()> {
        self.credentials.clear_tokens().await?;
        self.credentials.clear_login_email().await?;
        tracing::info!("[AuthUseCase] Logged out");
        Ok(())
    }

    /// The email of the last successful login, if it was not logged out.
    pub async fn current_login_email(&self) -> Result<Option<String>> {
        self.credentials.login_email().await
    }

    pub async fn is_signed_in(&self) -> Result<bool> {
        Ok(self.credentials.access_token().await?.is_some())
    }
}
