//! Backend API error types.

use crate::errors::QwatchError;

/// The request never produced a usable response body.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Unreadable response from {url}: {message}")]
    Decode { url: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend no longer accepts the session token.
    #[error("Session rejected by the backend ({message}). Run 'qwatch login' again")]
    AuthExpired { message: String },

    /// The backend processed the request and answered `success: false`.
    #[error("Backend refused the request: {message}")]
    Rejected { message: String },
}

impl ApiError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. })
    }
}

impl QwatchError for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            TransportError::Request { .. } => "TRANSPORT_REQUEST_FAILED",
            TransportError::Status { .. } => "TRANSPORT_BAD_STATUS",
            TransportError::Decode { .. } => "TRANSPORT_DECODE_FAILED",
        }
    }
}

impl QwatchError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport(e) => e.error_code(),
            ApiError::AuthExpired { .. } => "AUTH_EXPIRED",
            ApiError::Rejected { .. } => "REQUEST_REJECTED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. } | ApiError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let error = ApiError::from(TransportError::Status {
            url: "http://127.0.0.1:8080/get_dashboard".to_string(),
            status: 502,
        });
        assert_eq!(
            error.to_string(),
            "http://127.0.0.1:8080/get_dashboard answered with HTTP 502"
        );
        assert_eq!(error.error_code(), "TRANSPORT_BAD_STATUS");
        assert!(!error.is_user_error());
        assert!(!error.is_auth_expired());
    }

    #[test]
    fn test_auth_expired() {
        let error = ApiError::AuthExpired {
            message: "Access Denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Session rejected by the backend (Access Denied). Run 'qwatch login' again"
        );
        assert_eq!(error.error_code(), "AUTH_EXPIRED");
        assert!(error.is_user_error());
        assert!(error.is_auth_expired());
    }

    #[test]
    fn test_rejected() {
        let error = ApiError::Rejected {
            message: "Query not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Backend refused the request: Query not found"
        );
        assert_eq!(error.error_code(), "REQUEST_REJECTED");
    }

    #[test]
    fn test_decode_error() {
        let error = TransportError::Decode {
            url: "http://x/ping".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(error.error_code(), "TRANSPORT_DECODE_FAILED");
        assert!(error.to_string().contains("expected value"));
    }
}
