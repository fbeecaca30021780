//! Session error types.

use std::path::PathBuf;

use crate::errors::QwatchError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Not logged in. Run 'qwatch login' first")]
    NotLoggedIn,

    #[error("Login rejected for user '{username}'")]
    LoginRejected { username: String },

    #[error("Failed to access session file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl QwatchError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotLoggedIn => "NOT_LOGGED_IN",
            SessionError::LoginRejected { .. } => "LOGIN_REJECTED",
            SessionError::Io { .. } => "SESSION_IO_ERROR",
            SessionError::Parse { .. } => "SESSION_PARSE_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SessionError::NotLoggedIn | SessionError::LoginRejected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_logged_in() {
        let error = SessionError::NotLoggedIn;
        assert_eq!(error.to_string(), "Not logged in. Run 'qwatch login' first");
        assert_eq!(error.error_code(), "NOT_LOGGED_IN");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_login_rejected() {
        let error = SessionError::LoginRejected {
            username: "ana".to_string(),
        };
        assert_eq!(error.to_string(), "Login rejected for user 'ana'");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_io_error() {
        let error = SessionError::Io {
            path: PathBuf::from("/tmp/session.json"),
            source: std::io::Error::other("read-only"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to access session file '/tmp/session.json': read-only"
        );
        assert_eq!(error.error_code(), "SESSION_IO_ERROR");
        assert!(!error.is_user_error());
    }
}
