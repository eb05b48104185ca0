//! Profile lifecycle error types.

use thiserror::Error;

use shopeasy_core::EmailError;

use super::{ProfileField, ProfileMode};
use crate::storage::StorageError;

/// A draft failed save-time validation. Nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty after trimming.
    #[error("please fill in all required fields ({0} is missing)")]
    MissingRequiredField(ProfileField),

    /// The email does not have the `local@domain.tld` shape.
    #[error("please enter a valid email address: {0}")]
    MalformedEmail(#[source] EmailError),
}

/// Writing the profile document failed. The draft is kept.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The store rejected the write.
    #[error("failed to save profile: {0}")]
    Write(#[source] StorageError),

    /// The profile could not be encoded as JSON.
    #[error("failed to encode profile: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors returned by [`ProfileManager`](super::ProfileManager) operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Save-time validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The profile could not be persisted.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The operation is not available in the current mode.
    #[error("cannot {operation} while {mode}")]
    InvalidTransition {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Mode the manager was in.
        mode: ProfileMode,
    },
}

impl ProfileError {
    /// Whether this is a validation failure the user can fix by editing.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
