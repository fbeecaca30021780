//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.qwatch/config.toml`
//! 3. **Environment** - `QWATCH_SERVER_URL`, `QWATCH_REFRESH_INTERVAL_SECS`
//! 4. **CLI arguments** - Command-line flags (highest priority, see [`apply_cli_overrides`])

use std::fs;
use std::path::Path;

use qwatch_paths::QwatchPaths;
use tracing::debug;

use crate::errors::ConfigError;
use crate::types::{AlertsConfig, CliOverrides, MonitorConfig, QwatchConfig, ServerConfig};
use crate::validation::validate_config;

pub const ENV_SERVER_URL: &str = "QWATCH_SERVER_URL";
pub const ENV_REFRESH_INTERVAL_SECS: &str = "QWATCH_REFRESH_INTERVAL_SECS";

fn is_file_not_found(e: &ConfigError) -> bool {
    matches!(e, ConfigError::IoError { source } if source.kind() == std::io::ErrorKind::NotFound)
}

/// Load configuration from defaults, the user file and the environment.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed, an environment value is
/// malformed, or validation fails. A missing config file is not an error.
pub fn load_hierarchy() -> Result<QwatchConfig, ConfigError> {
    let paths = QwatchPaths::resolve().map_err(|e| ConfigError::InvalidConfiguration {
        message: e.to_string(),
    })?;
    load_hierarchy_from(&paths)
}

/// Same as [`load_hierarchy`] with an explicit `~/.qwatch` layout.
pub fn load_hierarchy_from(paths: &QwatchPaths) -> Result<QwatchConfig, ConfigError> {
    let mut config = QwatchConfig::default();

    match load_config_file(&paths.user_config()) {
        Ok(user_config) => config = merge_configs(config, user_config),
        Err(e) if !is_file_not_found(&e) => return Err(e),
        Err(_) => debug!(
            event = "config.loading.user_config_missing",
            path = %paths.user_config().display()
        ),
    }

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<QwatchConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Override values replace base values only if present.
pub fn merge_configs(base: QwatchConfig, override_config: QwatchConfig) -> QwatchConfig {
    QwatchConfig {
        server: ServerConfig {
            url: override_config.server.url.or(base.server.url),
            timeout_secs: override_config
                .server
                .timeout_secs
                .or(base.server.timeout_secs),
        },
        monitor: MonitorConfig {
            refresh_interval_secs: override_config
                .monitor
                .refresh_interval_secs
                .or(base.monitor.refresh_interval_secs),
        },
        alerts: AlertsConfig {
            enabled: override_config.alerts.enabled.or(base.alerts.enabled),
            source: override_config.alerts.source.or(base.alerts.source),
            default_sound: override_config
                .alerts
                .default_sound
                .or(base.alerts.default_sound),
            sounds_dir: override_config.alerts.sounds_dir.or(base.alerts.sounds_dir),
            volume: override_config.alerts.volume.or(base.alerts.volume),
        },
    }
}

/// Apply environment overrides. `lookup` is `std::env::var` in production.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut QwatchConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_SERVER_URL) {
        config.server.url = Some(url.trim().to_string());
    }

    if let Some(raw) = non_empty(ENV_REFRESH_INTERVAL_SECS) {
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidConfiguration {
                message: format!("{ENV_REFRESH_INTERVAL_SECS}='{raw}' is not a number: {e}"),
            })?;
        config.monitor.refresh_interval_secs = Some(secs);
    }

    Ok(())
}

/// Apply command-line flags on top of a loaded config and re-validate.
pub fn apply_cli_overrides(
    mut config: QwatchConfig,
    overrides: &CliOverrides,
) -> Result<QwatchConfig, ConfigError> {
    if let Some(url) = &overrides.server_url {
        config.server.url = Some(url.clone());
    }
    if let Some(secs) = overrides.refresh_interval_secs {
        config.monitor.refresh_interval_secs = Some(secs);
    }
    if overrides.mute {
        config.alerts.enabled = Some(false);
    }
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_user_config(dir: &TempDir, content: &str) -> QwatchPaths {
        let paths = QwatchPaths::from_dir(dir.path().to_path_buf());
        fs::write(paths.user_config(), content).unwrap();
        paths
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = QwatchPaths::from_dir(dir.path().join("absent"));
        temp_env::with_vars_unset([ENV_SERVER_URL, ENV_REFRESH_INTERVAL_SECS], || {
            let config = load_hierarchy_from(&paths).unwrap();
            assert_eq!(config.monitor.refresh_interval_secs(), 15);
            assert_eq!(config.server.url(), "http://127.0.0.1:8080");
        });
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = write_user_config(
            &dir,
            "[server]\nurl = \"https://watch.example\"\n[monitor]\nrefresh_interval_secs = 30\n",
        );
        temp_env::with_vars_unset([ENV_SERVER_URL, ENV_REFRESH_INTERVAL_SECS], || {
            let config = load_hierarchy_from(&paths).unwrap();
            assert_eq!(config.server.url(), "https://watch.example");
            assert_eq!(config.monitor.refresh_interval_secs(), 30);
            assert_eq!(config.server.timeout_secs(), 10);
        });
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let paths = write_user_config(&dir, "[monitor]\nrefresh_interval_secs = 30\n");
        temp_env::with_vars(
            [
                (ENV_SERVER_URL, Some("http://10.0.0.2:9000")),
                (ENV_REFRESH_INTERVAL_SECS, Some("5")),
            ],
            || {
                let config = load_hierarchy_from(&paths).unwrap();
                assert_eq!(config.server.url(), "http://10.0.0.2:9000");
                assert_eq!(config.monitor.refresh_interval_secs(), 5);
            },
        );
    }

    #[test]
    fn test_malformed_env_interval_fails() {
        let dir = TempDir::new().unwrap();
        let paths = QwatchPaths::from_dir(dir.path().to_path_buf());
        temp_env::with_vars(
            [
                (ENV_SERVER_URL, None),
                (ENV_REFRESH_INTERVAL_SECS, Some("soon")),
            ],
            || {
                let result = load_hierarchy_from(&paths);
                assert!(matches!(
                    result,
                    Err(ConfigError::InvalidConfiguration { .. })
                ));
            },
        );
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let paths = write_user_config(&dir, "[monitor\nrefresh_interval_secs = ");
        temp_env::with_vars_unset([ENV_SERVER_URL, ENV_REFRESH_INTERVAL_SECS], || {
            let result = load_hierarchy_from(&paths);
            assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
        });
    }

    #[test]
    fn test_zero_interval_in_file_fails_validation() {
        let dir = TempDir::new().unwrap();
        let paths = write_user_config(&dir, "[monitor]\nrefresh_interval_secs = 0\n");
        temp_env::with_vars_unset([ENV_SERVER_URL, ENV_REFRESH_INTERVAL_SECS], || {
            let result = load_hierarchy_from(&paths);
            assert!(matches!(
                result,
                Err(ConfigError::InvalidConfiguration { .. })
            ));
        });
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut config = QwatchConfig::default();
        apply_env_overrides(&mut config, |_| Some("  ".to_string())).unwrap();
        assert!(config.server.url.is_none());
        assert!(config.monitor.refresh_interval_secs.is_none());
    }

    #[test]
    fn test_merge_prefers_override() {
        let mut base = QwatchConfig::default();
        base.server.url = Some("http://base".to_string());
        base.alerts.volume = Some(0.2);
        base.alerts.sounds_dir = Some(PathBuf::from("/base"));

        let mut over = QwatchConfig::default();
        over.server.url = Some("http://over".to_string());

        let merged = merge_configs(base, over);
        assert_eq!(merged.server.url(), "http://over");
        assert_eq!(merged.alerts.volume(), 0.2);
        assert_eq!(merged.alerts.sounds_dir, Some(PathBuf::from("/base")));
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = QwatchConfig::default();
        config.monitor.refresh_interval_secs = Some(30);
        let overrides = CliOverrides {
            server_url: Some("https://cli.example".to_string()),
            refresh_interval_secs: Some(2),
            mute: true,
        };
        let config = apply_cli_overrides(config, &overrides).unwrap();
        assert_eq!(config.server.url(), "https://cli.example");
        assert_eq!(config.monitor.refresh_interval_secs(), 2);
        assert!(!config.alerts.enabled());
    }

    #[test]
    fn test_cli_overrides_are_validated() {
        let overrides = CliOverrides {
            server_url: Some("ftp://nope".to_string()),
            ..Default::default()
        };
        let result = apply_cli_overrides(QwatchConfig::default(), &overrides);
        assert!(result.is_err());
    }
}
