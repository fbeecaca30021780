//! Built-in fallback values.

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 15;
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 86_400;
pub const DEFAULT_SOUND: &str = "notification.wav";
pub const DEFAULT_VOLUME: f32 = 1.0;
