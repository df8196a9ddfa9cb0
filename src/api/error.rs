//! API error types for the registration request

use thiserror::Error;

/// Errors that can occur while submitting a registration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Connection, TLS, timeout or other transport failure
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status
    #[error("registration failed with HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network(message.into())
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            body: body.into(),
        }
    }

    /// HTTP status for rejected requests
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        assert_eq!(ApiError::http(409, "duplicate").status(), Some(409));
        assert_eq!(ApiError::network("refused").status(), None);
    }

    #[test]
    fn test_display() {
        let err = ApiError::http(409, "Email already registered");
        assert_eq!(
            err.to_string(),
            "registration failed with HTTP 409: Email already registered"
        );

        let err = ApiError::network("connection refused");
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
