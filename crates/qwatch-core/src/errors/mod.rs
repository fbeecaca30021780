use std::error::Error;

/// Base trait for all application errors
pub trait QwatchError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type QwatchResult<T> = Result<T, Box<dyn QwatchError>>;

impl QwatchError for qwatch_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            qwatch_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            qwatch_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            qwatch_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            qwatch_config::ConfigError::ConfigParseError { .. }
                | qwatch_config::ConfigError::InvalidConfiguration { .. }
        )
    }
}

impl QwatchError for qwatch_paths::PathError {
    fn error_code(&self) -> &'static str {
        match self {
            qwatch_paths::PathError::HomeNotFound => "HOME_NOT_FOUND",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
