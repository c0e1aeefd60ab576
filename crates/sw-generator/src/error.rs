/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur when configuring a generation run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenError {
    /// The universe extent must be a finite, positive number.
    #[error("invalid universe size: {0} (must be finite and greater than 0)")]
    InvalidUniverseSize(f64),
}
