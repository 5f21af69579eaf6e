//! Error types for the Daybook client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Daybook client.
///
/// Every error here is scoped to the current session or command; none of
/// them is fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DaybookError {
    /// Transport or HTTP status failure.
    ///
    /// `status` is `None` when the request never produced a response
    /// (connection refused, timeout, malformed response).
    #[error("Network error ({}): {body}", display_status(.status))]
    Network { status: Option<u16>, body: String },

    /// The backend answered 401; stored credentials have been cleared.
    #[error("Authentication expired: {body}")]
    AuthExpired { body: String },

    /// A precondition was not met and the operation was skipped.
    ///
    /// Never shown to the user.
    #[error("Operation skipped: {0}")]
    ValidationNoop(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (credential and config files)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DaybookError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error from a status code and response body
    pub fn network(status: u16, body: impl Into<String>) -> Self {
        Self::Network {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Creates a Network error for a request that never got a response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            body: message.into(),
        }
    }

    /// Creates an AuthExpired error
    pub fn auth_expired(body: impl Into<String>) -> Self {
        Self::AuthExpired { body: body.into() }
    }

    /// Creates a ValidationNoop error
    pub fn noop(reason: impl Into<String>) -> Self {
        Self::ValidationNoop(reason.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. })
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::ValidationNoop(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            Self::AuthExpired { .. } => Some(401),
            _ => None,
        }
    }

    /// The text placed into a session's error slot.
    ///
    /// Prefers the backend's response body, falling back to the display text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { body, .. } | Self::AuthExpired { body } if !body.trim().is_empty() => {
                body.clone()
            }
            other => other.to_string(),
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no status".to_string(),
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DaybookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DaybookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DaybookError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DaybookError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DaybookError>`.
pub type Result<T> = std::result::Result<T, DaybookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_body() {
        let err = DaybookError::network(500, "upstream exploded");
        assert_eq!(err.user_message(), "upstream exploded");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = DaybookError::network(502, "  ");
        assert_eq!(err.user_message(), "Network error (502):   ");

        let err = DaybookError::transport("");
        assert!(err.user_message().contains("no status"));
    }

    #[test]
    fn test_auth_expired_reports_401() {
        let err = DaybookError::auth_expired("token expired");
        assert!(err.is_auth_expired());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: DaybookError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, DaybookError::Serialization { ref format, .. } if format == "JSON"));
    }
}
