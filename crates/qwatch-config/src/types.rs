//! Configuration types.
//!
//! Fields are `Option<T>` so that hierarchy merging only lets explicitly-set
//! values override lower-priority sources. Accessor methods apply the
//! built-in defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Root of `~/.qwatch/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QwatchConfig {
    /// Backend location and request limits.
    #[serde(default)]
    pub server: ServerConfig,

    /// Live board refresh cadence.
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Audible alerts for new matches.
    #[serde(default)]
    pub alerts: AlertsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the monitoring backend.
    /// Default: "http://127.0.0.1:8080"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Per-request timeout in seconds.
    /// Default: 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(defaults::DEFAULT_SERVER_URL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(defaults::DEFAULT_TIMEOUT_SECS)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between two board refreshes.
    /// Default: 15
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
}

impl MonitorConfig {
    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval_secs
            .unwrap_or(defaults::DEFAULT_REFRESH_INTERVAL_SECS)
    }
}

/// Where alert sounds are loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundSourceKind {
    /// Downloaded from the backend's sound endpoint.
    #[default]
    Remote,
    /// Read from the local sounds directory.
    Local,
}

impl std::fmt::Display for SoundSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoundSourceKind::Remote => write!(f, "remote"),
            SoundSourceKind::Local => write!(f, "local"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Play a sound when a query newly matches.
    /// Default: true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SoundSourceKind>,

    /// Sound used when a query has no `alert_sound` of its own.
    /// Default: "notification.wav"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sound: Option<String>,

    /// Directory for the local sound source. Default: `~/.qwatch/sounds`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sounds_dir: Option<PathBuf>,

    /// Playback volume, 0.0 to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl AlertsConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn source(&self) -> SoundSourceKind {
        self.source.unwrap_or_default()
    }

    pub fn default_sound(&self) -> &str {
        self.default_sound
            .as_deref()
            .unwrap_or(defaults::DEFAULT_SOUND)
    }

    pub fn volume(&self) -> f32 {
        self.volume.unwrap_or(defaults::DEFAULT_VOLUME)
    }
}

/// Values given on the command line. Highest priority.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub refresh_interval_secs: Option<u64>,
    pub mute: bool,
}
