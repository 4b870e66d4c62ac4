//! Error types for the resolution engine

use thiserror::Error;

/// Resolution engine errors
#[derive(Debug, Error)]
pub enum RbacError {
    /// A rule condition failed to evaluate.
    ///
    /// The predicate's own error is carried as-is; use
    /// `anyhow::Error::downcast_ref` to recover the original type.
    #[error(transparent)]
    Condition(#[from] anyhow::Error),

    /// The actor -> target relation loops back on itself
    #[error("Circular rule chain: {0}")]
    CircularRule(String),
}

impl RbacError {
    /// True when the error came from a condition predicate
    pub fn is_condition(&self) -> bool {
        matches!(self, Self::Condition(_))
    }
}

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, RbacError>;
