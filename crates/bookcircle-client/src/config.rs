//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the client starts with zero
//! configuration.

use std::path::PathBuf;

/// Client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Directory holding the storage record instead of the platform
    /// data directory.
    /// Env: `BOOKCIRCLE_DATA_DIR`
    /// Default: unset (platform data directory).
    pub data_dir: Option<PathBuf>,

    /// Skip the simulated auth/upload latency. Intended for tests and
    /// scripted runs.
    /// Env: `BOOKCIRCLE_SKIP_DELAYS` (true/false)
    /// Default: `false`
    pub skip_delays: bool,
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("BOOKCIRCLE_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(val) = std::env::var("BOOKCIRCLE_SKIP_DELAYS") {
            config.skip_delays = val == "true" || val == "1";
        }

        config
    }

    /// Configuration for tests: no persistence delays, no env reads.
    pub fn fast() -> Self {
        Self {
            data_dir: None,
            skip_delays: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_keeps_delays() {
        let config = ClientConfig::default();
        assert!(!config.skip_delays);
        assert!(config.data_dir.is_none());
    }
}
