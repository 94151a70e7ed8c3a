//! Error types for chunked transfers

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Error type for transfer operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Source path does not resolve to a readable file
    #[error("file not found: {}", path.display())]
    #[diagnostic(
        code(vellum::transfer::not_found),
        help("Check that the path exists and points to a regular file")
    )]
    NotFound {
        /// The path that failed to resolve
        path: Box<Path>,
    },

    /// Cooperative cancellation observed at a chunk boundary
    #[error("{operation} cancelled")]
    #[diagnostic(code(vellum::transfer::cancelled))]
    Cancelled {
        /// Operation that was cancelled (e.g., "read", "write")
        operation: String,
    },

    /// I/O error from the underlying storage
    #[error("I/O {operation} failed{}", path.as_ref().map_or(String::new(), |p| format!(": {}", p.display())))]
    #[diagnostic(
        code(vellum::transfer::io),
        help("Check file permissions and free disk space")
    )]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path that caused the error, if available
        path: Option<Box<Path>>,
        /// Operation that failed (e.g., "read", "write", "rename")
        operation: String,
    },

    /// Bytes could not be decoded under the requested text encoding
    #[error("cannot decode {} as UTF-8", path.display())]
    #[diagnostic(
        code(vellum::transfer::encoding),
        help("The file is not valid UTF-8; a lossy read substitutes U+FFFD for invalid sequences")
    )]
    Encoding {
        /// The underlying decode error
        #[source]
        source: std::str::Utf8Error,
        /// Path of the undecodable file
        path: Box<Path>,
    },
}

impl Error {
    /// Create a not found error
    #[must_use]
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().into(),
        }
    }

    /// Create a cancellation error
    #[must_use]
    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    /// Create an I/O error with path context
    #[must_use]
    pub fn io(
        source: std::io::Error,
        path: impl AsRef<Path>,
        operation: impl Into<String>,
    ) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().into()),
            operation: operation.into(),
        }
    }

    /// Create an encoding error
    #[must_use]
    pub fn encoding(source: std::str::Utf8Error, path: impl AsRef<Path>) -> Self {
        Self::Encoding {
            source,
            path: path.as_ref().into(),
        }
    }

    /// Whether this error is a deliberate cancellation rather than a failure.
    ///
    /// Callers use this to tell a user-initiated abort apart from an I/O
    /// error that deserves surfacing.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result type for transfer operations
pub type Result<T> = std::result::Result<T, Error>;
