//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `SHOPEASY_DATA_DIR` - Directory holding `storage.json` (default: .shopeasy)
//! - `SHOPEASY_PROFILE_KEY` - Storage key of the profile document (default: userProfile)
//! - `SHOPEASY_REVEAL_DELAY_MS` - Pause before the title moves (default: 2000)
//! - `SHOPEASY_REVEAL_DURATION_MS` - Length of the title move (default: 800)
//! - `SHOPEASY_HEADER_FADE_MS` - Header controls fade-in (default: 400)
//! - `SHOPEASY_CONTENT_FADE_MS` - Browse content fade-in (default: 600)
//! - `SHOPEASY_VIEWPORT_HEIGHT` - Viewport height in points (default: 844)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::profile::DEFAULT_PROFILE_KEY;
use crate::reveal::RevealTimings;

const DEFAULT_DATA_DIR: &str = ".shopeasy";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Directory for the JSON key-value store
    pub data_dir: PathBuf,
    /// Key the profile document is stored under
    pub profile_key: String,
    /// Reveal animation timings
    pub reveal: RevealTimings,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            profile_key: DEFAULT_PROFILE_KEY.to_string(),
            reveal: RevealTimings::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);
        let defaults = RevealTimings::default();

        let data_dir = PathBuf::from(vars.get_or_default("SHOPEASY_DATA_DIR", DEFAULT_DATA_DIR));
        let profile_key = vars.get_or_default("SHOPEASY_PROFILE_KEY", DEFAULT_PROFILE_KEY);
        if profile_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPEASY_PROFILE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let reveal = RevealTimings {
            intro_delay: vars.get_millis("SHOPEASY_REVEAL_DELAY_MS", defaults.intro_delay)?,
            transform_duration: vars
                .get_millis("SHOPEASY_REVEAL_DURATION_MS", defaults.transform_duration)?,
            header_fade: vars.get_millis("SHOPEASY_HEADER_FADE_MS", defaults.header_fade)?,
            content_fade: vars.get_millis("SHOPEASY_CONTENT_FADE_MS", defaults.content_fade)?,
            viewport_height: vars
                .get_parsed("SHOPEASY_VIEWPORT_HEIGHT")?
                .unwrap_or(defaults.viewport_height),
        };
        if !reveal.viewport_height.is_finite() || reveal.viewport_height <= 0.0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPEASY_VIEWPORT_HEIGHT".to_string(),
                "must be a positive number".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            profile_key,
            reveal,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    /// Get and parse an optional variable.
    fn get_parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        (self.0)(key)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }

    /// Get a duration given in whole milliseconds.
    fn get_millis(&self, key: &str, default: Duration) -> Result<Duration, ConfigError> {
        Ok(self
            .get_parsed::<u64>(key)?
            .map_or(default, Duration::from_millis))
    }
}
