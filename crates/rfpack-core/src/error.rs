//! Error types for deployment archive packaging.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackageError`.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Errors that can occur while building a deployment archive.
///
/// Nothing here is recovered from internally: every variant aborts the run
/// and is handed back to the caller unchanged.
#[derive(Error, Debug)]
pub enum PackageError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed at a specific path.
    #[error("cannot traverse {}: {source}", path.display())]
    Walk {
        /// Path the walker was visiting.
        path: PathBuf,
        /// Underlying walker error.
        #[source]
        source: walkdir::Error,
    },

    /// A source file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    ReadEntry {
        /// File being added to the archive.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The ZIP writer rejected an operation.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Relative path cannot be represented as a ZIP entry name.
    #[error("path is not valid UTF-8: {}", path.display())]
    InvalidEntryName {
        /// Offending path relative to the traversal root.
        path: PathBuf,
    },

    /// Traversal root is missing or is not a directory.
    #[error("traversal root not found: {}", path.display())]
    RootNotFound {
        /// Configured root directory.
        path: PathBuf,
    },

    /// Compression level outside the Deflate range.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// Rejected level.
        level: u8,
    },
}

impl PackageError {
    /// Returns the filesystem path associated with this error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfpack_core::PackageError;
    /// use std::path::{Path, PathBuf};
    ///
    /// let err = PackageError::RootNotFound {
    ///     path: PathBuf::from("missing"),
    /// };
    /// assert_eq!(err.path(), Some(Path::new("missing")));
    ///
    /// let err = PackageError::InvalidCompressionLevel { level: 0 };
    /// assert_eq!(err.path(), None);
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Walk { path, .. }
            | Self::ReadEntry { path, .. }
            | Self::InvalidEntryName { path }
            | Self::RootNotFound { path } => Some(path),
            Self::Io(_) | Self::Archive(_) | Self::InvalidCompressionLevel { .. } => None,
        }
    }
}
