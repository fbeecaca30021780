//! Configuration validation logic.

use crate::defaults::MAX_REFRESH_INTERVAL_SECS;
use crate::errors::ConfigError;
use crate::types::QwatchConfig;

/// URL schemes the backend client can talk to.
pub const VALID_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Validate a QwatchConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `server.url` must start with `http://` or `https://`
/// - `server.timeout_secs` must be greater than 0
/// - `monitor.refresh_interval_secs` must be within `1..=86400` (one day)
/// - `alerts.volume` must be within `0.0..=1.0`
pub fn validate_config(config: &QwatchConfig) -> Result<(), ConfigError> {
    let url = config.server.url();
    if !VALID_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Invalid server url '{}'. It must start with {}",
                url,
                VALID_SCHEMES.join(" or ")
            ),
        });
    }

    if config.server.timeout_secs() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "server.timeout_secs must be greater than 0".to_string(),
        });
    }

    let interval = config.monitor.refresh_interval_secs();
    if interval == 0 || interval > MAX_REFRESH_INTERVAL_SECS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "monitor.refresh_interval_secs must be between 1 and {}, got {}",
                MAX_REFRESH_INTERVAL_SECS, interval
            ),
        });
    }

    let volume = config.alerts.volume();
    if !(0.0..=1.0).contains(&volume) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("alerts.volume must be between 0.0 and 1.0, got {volume}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&QwatchConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_refresh_interval_rejected() {
        let mut config = QwatchConfig::default();
        config.monitor.refresh_interval_secs = Some(0);

        let result = validate_config(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_refresh_interval_upper_bound() {
        let mut config = QwatchConfig::default();
        config.monitor.refresh_interval_secs = Some(MAX_REFRESH_INTERVAL_SECS);
        assert!(validate_config(&config).is_ok());

        config.monitor.refresh_interval_secs = Some(MAX_REFRESH_INTERVAL_SECS + 1);
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("86401"));

        config.monitor.refresh_interval_secs = Some(u64::MAX / 2);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_scheme_rejected() {
        let mut config = QwatchConfig::default();
        config.server.url = Some("localhost:8080".to_string());

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("localhost:8080"));
    }

    #[test]
    fn test_https_accepted() {
        let mut config = QwatchConfig::default();
        config.server.url = Some("https://watch.example".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = QwatchConfig::default();
        config.server.timeout_secs = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_volume_bounds() {
        let mut config = QwatchConfig::default();
        config.alerts.volume = Some(0.0);
        assert!(validate_config(&config).is_ok());
        config.alerts.volume = Some(1.5);
        assert!(validate_config(&config).is_err());
        config.alerts.volume = Some(-0.1);
        assert!(validate_config(&config).is_err());
    }
}
