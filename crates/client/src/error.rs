//! Error type for requests against the EduTalks backend

use edutalks_core::PortalError;
use thiserror::Error;

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, TLS, ...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The owning view went away before the response arrived
    #[error("Request cancelled")]
    Cancelled,

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Session persistence or validation failure
    #[error(transparent)]
    Portal(#[from] PortalError),
}

impl ClientError {
    /// Whether the failure is a transport error or a non-2xx response
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Api { .. })
    }

    /// Whether this is an "unauthorized" (401) error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Whether this is a "forbidden" (403) error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Api { status: 403, .. })
    }

    /// Whether this is a "not found" (404) error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Whether the request was abandoned by its owner
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for an inline alert or notification
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(e) => {
                if e.is_timeout() {
                    "Request timed out. Please try again.".to_string()
                } else if e.is_connect() {
                    "Unable to connect to the server. Please check your connection.".to_string()
                } else {
                    "An unexpected network error occurred.".to_string()
                }
            }
            Self::Api { status: 401, .. } => {
                "You are not signed in or your session has expired.".to_string()
            }
            Self::Api { message, .. } => message.clone(),
            Self::Parse(_) => "Received an unexpected response from the server.".to_string(),
            Self::Cancelled => "Request cancelled.".to_string(),
            Self::Config(message) => format!("Configuration problem: {message}"),
            Self::Portal(e) => e.to_string(),
        }
    }
}

/// Result type alias using ClientError
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_classification() {
        let err = ClientError::Api {
            status: 401,
            message: "Not authenticated".to_string(),
        };
        assert!(err.is_network());
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(
            err.user_message(),
            "You are not signed in or your session has expired."
        );
    }

    #[test]
    fn test_api_error_message_passthrough() {
        let err = ClientError::Api {
            status: 422,
            message: "Slug already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Slug already exists");
        assert_eq!(err.to_string(), "API error (422): Slug already exists");
    }

    #[test]
    fn test_parse_and_cancel_are_not_network() {
        assert!(!ClientError::Parse("bad".to_string()).is_network());
        assert!(!ClientError::Cancelled.is_network());
        assert!(ClientError::Cancelled.is_cancelled());
    }

    #[test]
    fn test_portal_error_conversion() {
        let err: ClientError = PortalError::InvalidSlug("Bad Slug".to_string()).into();
        assert!(err.user_message().contains("Bad Slug"));
    }
}
