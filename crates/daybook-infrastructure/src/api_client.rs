//! Authenticated JSON transport for the Daybook backend.

use daybook_core::config::ClientConfig;
use daybook_core::credential::CredentialStore;
use daybook_core::error::{DaybookError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Sends JSON requests with the stored bearer token attached.
///
/// A 401 response clears the stored tokens and surfaces as
/// [`DaybookError::AuthExpired`]; any other non-2xx status becomes
/// [`DaybookError::Network`] carrying the status and response body.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when no base URL is configured.
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        if !config.has_api_base_url() {
            return Err(DaybookError::config("Missing API base URL"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| DaybookError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a request and deserializes the JSON response.
    ///
    /// An empty response body is read as JSON `null`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T> {
        let text = self.execute(method, path, query, body).await?;
        parse_body(&text)
    }

    /// Sends a request whose response body is ignored.
    pub async fn request_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<()> {
        self.execute(method, path, query, body).await.map(|_| ())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("[ApiClient] {} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.credentials.access_token().await? {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DaybookError::transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DaybookError::transport(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("[ApiClient] {} {} returned 401, clearing credentials", method, path);
            if let Err(e) = self.credentials.clear_tokens().await {
                tracing::error!("[ApiClient] Failed to clear credentials: {}", e);
            }
            return Err(DaybookError::auth_expired(text));
        }

        if !status.is_success() {
            tracing::warn!("[ApiClient] {} {} failed with {}", method, path, status);
            return Err(DaybookError::network(status.as_u16(), text));
        }

        Ok(text)
    }
}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    if text.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(text)?)
}
