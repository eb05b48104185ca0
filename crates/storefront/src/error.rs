//! Unified error handling.
//!
//! Provides a unified `AppError` type for front ends that drive several
//! storefront components at once. Each component keeps its own error enum.

use shopeasy_core::PriceError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::profile::ProfileError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A profile operation failed.
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Price arithmetic failed.
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error was caused by user input rather than the environment.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Profile(err) => err.is_validation(),
            Self::BadRequest(_) => true,
            Self::Config(_) | Self::Price(_) => false,
        }
    }
}

/// Result type alias for storefront front ends.
pub type Result<T> = std::result::Result<T, AppError>;
