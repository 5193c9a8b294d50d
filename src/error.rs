//! Global error handling for arcscan
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::strip::StripError;

/// Global error type for arcscan operations
#[derive(Error, Debug)]
pub enum ArcError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A `.gitignore` file could not be read
    #[error("Error reading {}: {source}", path.display())]
    UnreadableGitignore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File content is not valid UTF-8 text
    #[error("Could not read file due to encoding issues: {}", path.display())]
    UndecodableFileContent { path: PathBuf },

    /// The comment stripper rejected the file
    #[error("Could not strip comments from {}: {source}", path.display())]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: StripError,
    },

    /// Path not found
    #[error("{0} is neither file nor directory")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ArcError {
    /// Process exit code for a fatal error of this kind
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PathNotFound(_)
            | Self::InvalidArgument(_)
            | Self::UndecodableFileContent { .. }
            | Self::MalformedSource { .. } => 1,
            Self::Io(_) | Self::UnreadableGitignore { .. } => 2,
        }
    }
}

/// Specialized Result type for arcscan operations
pub type Result<T> = std::result::Result<T, ArcError>;

/// Creates an ArcError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ArcError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ArcError::PathNotFound("x".into()).exit_code(), 1);
        assert_eq!(ArcError::InvalidArgument("x".into()).exit_code(), 1);
        assert_eq!(
            ArcError::UndecodableFileContent { path: PathBuf::from("a") }.exit_code(),
            1
        );
        assert_eq!(ArcError::Io(io::Error::new(io::ErrorKind::Other, "disk")).exit_code(), 2);
    }
}
