//! Error types for the relish engine

use thiserror::Error;

/// Result type alias for engine operations
pub type ReplResult<T> = Result<T, ReplError>;

/// Errors arising from a single input line.
///
/// None of these terminate a session: every variant is reported to the
/// user and contained to the line that produced it.
#[derive(Error, Debug)]
pub enum ReplError {
    /// Expansion referenced an alias that is not defined
    #[error("Unknown alias: '{0}'")]
    UnknownAlias(String),

    /// Alias definition used a malformed name
    #[error("Invalid alias name: '{0}' (must start with '@' and be a valid identifier)")]
    InvalidAliasName(String),

    /// Alias definition with an empty replacement expression
    #[error("Alias expression cannot be empty.")]
    EmptyAliasExpression,

    /// `!N` recall with an index that is not in the history log
    #[error("No command at index {0}")]
    RecallIndex(i64),

    /// Opaque failure surfaced by the plugged-in interpreter
    #[error("{0}")]
    Eval(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
