use std::env;

use crate::shared::utils::RetryPolicy;

/// Run-wide settings. Defaults mirror the service limits: 50-item source
/// pages, 100-track write batches.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// HTTP timeout applied to both clients, in seconds.
    pub request_timeout_secs: u64,
    /// Maximum identifiers per playlist-tracks write call.
    pub batch_size: usize,
    /// Client-side pacing of destination requests.
    pub requests_per_second: f64,
    pub retry: RetryPolicy,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            batch_size: 100,
            requests_per_second: 5.0,
            retry: RetryPolicy::spotify(),
        }
    }
}

impl MigrationConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var("TUNEBRIDGE_HTTP_TIMEOUT_SECS") {
            match value.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout_secs = secs,
                _ => log::warn!(
                    "Ignoring invalid TUNEBRIDGE_HTTP_TIMEOUT_SECS value: {}",
                    value
                ),
            }
        }

        config
    }
}
