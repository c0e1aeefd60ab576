//! Error types for the universe store.

use sw_core::{CoreError, StarId};
use sw_generator::GenError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or querying a universe.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No star with this id exists.
    #[error("star not found: {0}")]
    StarNotFound(StarId),

    /// A write tried to reuse an existing star id.
    #[error("integrity violation: star {0} already exists")]
    DuplicateStar(StarId),

    /// The store holds no generated universe yet.
    #[error("no universe has been generated in this store")]
    NotGenerated,

    /// A generation run asked for a different extent than the persisted universe.
    #[error("universe size mismatch: store has {stored}, requested {requested}")]
    UniverseMismatch {
        /// Extent recorded in the store.
        stored: f64,
        /// Extent of the rejected run.
        requested: f64,
    },

    /// The generation parameters were invalid.
    #[error("invalid generation config: {0}")]
    Config(#[from] GenError),

    /// A stored row held a value that does not map to an entity.
    #[error("corrupt row: {0}")]
    InvalidRow(#[from] CoreError),

    /// A stored key had an unexpected shape.
    #[error("corrupt key in {table}: expected {expected} bytes, found {found}")]
    MalformedKey {
        /// The table the key was read from.
        table: &'static str,
        /// Expected key length.
        expected: usize,
        /// Actual key length.
        found: usize,
    },

    /// A row could not be encoded or decoded.
    #[error("row encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    /// The storage engine could not be opened, read, or written.
    #[error("storage unavailable: {0}")]
    Storage(#[from] heed::Error),

    /// The store directory could not be created.
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns true if this error reports a missing star.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StarNotFound(_))
    }
}
