//! Error types for repometa.

use std::fmt;
use std::path::PathBuf;

/// The main error type for repometa operations.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred.
    Io(std::io::Error),

    /// The specified path was not found.
    PathNotFound(PathBuf),

    /// The requested object was not found in the object store.
    ObjectNotFound(String),

    /// The requested reference was not found.
    RefNotFound(String),

    /// The provided string is not a valid object ID.
    InvalidOid(String),

    /// A pack index file is truncated or malformed.
    InvalidPackIndex {
        /// Path to the index file.
        path: PathBuf,
        /// The reason for invalidity.
        reason: String,
    },

    /// Invalid UTF-8 sequence encountered.
    InvalidUtf8,

    /// Zlib decompression failed.
    DecompressionFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::PathNotFound(path) => write!(f, "path not found: {}", path.display()),
            Error::ObjectNotFound(oid) => write!(f, "object not found: {}", oid),
            Error::RefNotFound(name) => write!(f, "reference not found: {}", name),
            Error::InvalidOid(s) => write!(f, "invalid object id: {}", s),
            Error::InvalidPackIndex { path, reason } => {
                write!(f, "invalid pack index {}: {}", path.display(), reason)
            }
            Error::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            Error::DecompressionFailed => write!(f, "zlib decompression failed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for repometa operations.
pub type Result<T> = std::result::Result<T, Error>;
