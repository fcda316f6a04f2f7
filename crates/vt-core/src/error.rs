/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when mutating a character record.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    /// A macro with the same name (case-insensitive) is already stored.
    #[error("a macro named '{0}' already exists")]
    MacroExists(String),

    /// No macro with the given name is stored.
    #[error("no macro named '{0}' found")]
    MacroNotFound(String),

    /// The macro name is not a plain identifier.
    #[error("invalid macro name: '{0}'")]
    InvalidMacroName(String),

    /// A track does not hold enough points to pay a cost.
    #[error("not enough {track}: have {current}, need {needed}")]
    InsufficientTrack {
        /// Name of the track that was debited.
        track: String,
        /// Value the track held.
        current: i32,
        /// Points that were requested.
        needed: i32,
    },
}
