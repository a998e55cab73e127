//! Filesystem read helpers.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Reads the entire contents of a file as bytes.
///
/// # Arguments
///
/// * `path` - The path to the file to read.
///
/// # Returns
///
/// The file contents as a byte vector, or an error if the file cannot be read.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::PathNotFound(path.as_ref().to_path_buf())
        } else {
            Error::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // F-001: read_file returns file contents
    #[test]
    fn test_read_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data");
        fs::write(&path, b"hello").unwrap();

        assert_eq!(read_file(&path).unwrap(), b"hello");
    }

    // F-002: read_file maps missing files to PathNotFound
    #[test]
    fn test_read_file_not_found() {
        let temp = TempDir::new().unwrap();
        let result = read_file(temp.path().join("missing"));
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }
}
