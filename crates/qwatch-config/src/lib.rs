//! # qwatch-config
//!
//! TOML configuration types, loading and validation for qwatch.
//!
//! Depends only on `qwatch-paths`.

mod defaults;
mod loading;
mod validation;

pub mod errors;
pub mod types;

pub use defaults::{DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_SOUND, MAX_REFRESH_INTERVAL_SECS};
pub use errors::ConfigError;
pub use loading::{
    ENV_REFRESH_INTERVAL_SECS, ENV_SERVER_URL, apply_cli_overrides, apply_env_overrides,
    load_config_file, load_hierarchy, load_hierarchy_from, merge_configs,
};
pub use types::{
    AlertsConfig, CliOverrides, MonitorConfig, QwatchConfig, ServerConfig, SoundSourceKind,
};
pub use validation::{VALID_SCHEMES, validate_config};

impl QwatchConfig {
    /// Load configuration from the hierarchy of config sources.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// Layer command-line flags on top and re-validate.
    pub fn with_cli_overrides(self, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        loading::apply_cli_overrides(self, overrides)
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.monitor.refresh_interval_secs())
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.server.timeout_secs())
    }
}
