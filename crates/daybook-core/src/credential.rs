//! Credential store trait.
//!
//! Defines the interface for the secure storage that holds the bearer token
//! and the remembered login email.

use crate::error::Result;
use async_trait::async_trait;

/// Storage for authentication credentials.
///
/// The session core only reads the access token; login, logout and the
/// transport's 401 handling are the only writers.
///
/// # Security Note
///
/// Implementations must never log token values.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>>;

    async fn refresh_token(&self) -> Result<Option<String>>;

    /// Stores a new access token, and the refresh token when one is given.
    async fn save_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()>;

    /// Removes both tokens.
    async fn clear_tokens(&self) -> Result<()>;

    async fn login_email(&self) -> Result<Option<String>>;

    async fn save_login_email(&self, email: &str) -> Result<()>;

    async fn clear_login_email(&self) -> Result<()>;
}
