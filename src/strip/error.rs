//! Error types for the comment stripper

use thiserror::Error;

/// Result type for stripping operations
pub type StripResult<T> = Result<T, StripError>;

/// Errors that can occur while stripping comments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StripError {
    /// The source could not be split into tokens
    #[error("tokenize error at line {line}, column {column}: {message}")]
    Tokenize {
        /// 1-based line of the offending character
        line: usize,
        /// 0-based column (in characters) of the offending character
        column: usize,
        message: String,
    },
}
