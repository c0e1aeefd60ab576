/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when interpreting entity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A stellar class label did not match any known class.
    #[error("unknown star class: \"{0}\"")]
    UnknownStarKind(String),

    /// A planet class label did not match any known class.
    #[error("unknown planet class: \"{0}\"")]
    UnknownPlanetKind(String),
}
