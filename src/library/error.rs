//! Error types for library generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::{SpecError, TemplateError};

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors that can occur while generating or writing a library.
///
/// Every variant is fatal to a generation run.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Failed to open or read a file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to create an output directory.
    #[error("Failed to create directory: {path}")]
    CreateDir {
        /// Path to the directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The persisted UUID cache is malformed.
    #[error("Corrupt UUID cache at line {line}: {message}")]
    CacheCorrupt {
        /// 1-based line of the offending record.
        line: u64,
        /// Description of what's wrong.
        message: String,
    },

    /// A part cannot be laid out.
    #[error("Invalid part: {0}")]
    Spec(#[from] SpecError),

    /// A name or description template could not be applied.
    #[error("Invalid template: {0}")]
    Template(#[from] TemplateError),
}

impl LibraryError {
    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a cache corruption error.
    pub fn cache_corrupt(line: u64, message: impl Into<String>) -> Self {
        Self::CacheCorrupt {
            line,
            message: message.into(),
        }
    }
}
