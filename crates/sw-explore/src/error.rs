//! Error types for exploration.

use sw_core::StarId;
use sw_store::StoreError;
use thiserror::Error;

/// Result type for exploration operations.
pub type ExploreResult<T> = Result<T, ExploreError>;

/// Errors that can occur while exploring a universe.
#[derive(Debug, Error)]
pub enum ExploreError {
    /// The explorer stands at an address that holds no star.
    #[error("lost in space: no star at address {0}")]
    Lost(StarId),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ExploreError {
    /// Returns true if the underlying store reported a missing universe.
    pub fn is_not_generated(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotGenerated))
    }
}
