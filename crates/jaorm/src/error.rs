//! Error types for jaorm

use thiserror::Error;

/// Result type alias for jaorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Errors raised while compiling a statement.
///
/// Every variant describes bad input at the call site. None of them is
/// transient, so retrying with the same arguments always fails again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrmError {
    /// The operation needs an identifier and the resource has none (or an empty one).
    #[error("invalid ID")]
    InvalidId,

    /// INSERT needs the resource identifier to be set.
    #[error("ID is required")]
    IdRequired,

    /// A transform updater was given a resource without an attribute bag.
    #[error("not updatable object")]
    NotUpdatableObject,

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OrmError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this is an invalid id error
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, Self::InvalidId)
    }

    /// Check if this is a missing id error
    pub fn is_id_required(&self) -> bool {
        matches!(self, Self::IdRequired)
    }

    /// Check if this is a not updatable object error
    pub fn is_not_updatable(&self) -> bool {
        matches!(self, Self::NotUpdatableObject)
    }
}

impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
