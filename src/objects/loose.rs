//! Loose object reading.
//!
//! Loose objects live in `.git/objects/` as individual zlib-compressed
//! files, one per id, named by splitting the 40-hex id into a 2-char
//! directory and a 38-char filename.

use std::fs;
use std::path::{Path, PathBuf};

use super::oid::Oid;
use crate::error::{Error, Result};
use crate::infra::inflate_raw_capped;

/// The object-type tag a decompressed payload must start with.
const COMMIT_TAG: &[u8] = b"commit";

/// Size of the zlib stream header skipped before raw inflation.
const ZLIB_HEADER_BYTES: usize = 2;

/// Output ceiling for a decompressed loose object.
///
/// Objects larger than this are truncated at the ceiling rather than read
/// in full. Raising it changes which commits can be read completely.
pub const MAX_OBJECT_SIZE: usize = 8 * 1024;

/// Converts an Oid to the path of its loose object file.
///
/// For example, `da39a3ee5e6b4b0d3255bfef95601890afd80709` becomes
/// `objects/da/39a3ee5e6b4b0d3255bfef95601890afd80709`.
pub fn object_path(objects_dir: &Path, oid: &Oid) -> PathBuf {
    let hex = oid.to_hex();
    objects_dir.join(&hex[..2]).join(&hex[2..])
}

/// Reads a loose commit object and returns its body.
///
/// The stored payload has the form `commit <size>\0<body>`; everything up to
/// and including the first NUL byte is stripped. A payload that does not
/// start with the `commit` tag (or has no NUL) is treated as not found, the
/// same as a missing file.
///
/// # Arguments
///
/// * `objects_dir` - Path to the `.git/objects` directory.
/// * `oid` - The object ID to read.
///
/// # Returns
///
/// `Ok(Some(body))` for a readable commit, `Ok(None)` when the object is
/// absent or not a commit, or an error for unreadable/corrupt files.
pub fn read(objects_dir: &Path, oid: &Oid) -> Result<Option<Vec<u8>>> {
    let path = object_path(objects_dir, oid);
    let compressed = match fs::read(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };

    if compressed.len() <= ZLIB_HEADER_BYTES {
        return Err(Error::DecompressionFailed);
    }

    // The zlib magic is skipped up front; the rest is a raw DEFLATE stream.
    let payload = inflate_raw_capped(&compressed[ZLIB_HEADER_BYTES..], MAX_OBJECT_SIZE)?;

    if !payload.starts_with(COMMIT_TAG) {
        return Ok(None);
    }

    match payload.iter().position(|&b| b == 0) {
        Some(nul) => Ok(Some(payload[nul + 1..].to_vec())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::deflate::compress_to_vec_zlib;
    use tempfile::TempDir;

    const TEST_OID: &str = "ab39a3ee5e6b4b0d3255bfef95601890afd80709";

    /// Writes a compressed object file for `oid` with the given stored payload.
    fn write_object(objects_dir: &Path, oid: &Oid, payload: &[u8]) {
        let path = object_path(objects_dir, oid);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, compress_to_vec_zlib(payload, 6)).unwrap();
    }

    fn commit_payload(body: &str) -> Vec<u8> {
        let mut payload = format!("commit {}\0", body.len()).into_bytes();
        payload.extend_from_slice(body.as_bytes());
        payload
    }

    // L-001: object_path splits the id into directory and filename
    #[test]
    fn test_object_path() {
        let oid = Oid::from_hex(TEST_OID).unwrap();
        let path = object_path(Path::new("/repo/.git/objects"), &oid);
        assert!(path.ends_with("ab/39a3ee5e6b4b0d3255bfef95601890afd80709"));
    }

    // L-002: read returns the body after the NUL-terminated header
    #[test]
    fn test_read_commit_body() {
        let temp = TempDir::new().unwrap();
        let oid = Oid::from_hex(TEST_OID).unwrap();
        write_object(temp.path(), &oid, &commit_payload("tree abc\n\nhello"));

        let body = read(temp.path(), &oid).unwrap().unwrap();
        assert_eq!(body, b"tree abc\n\nhello");
    }

    // L-003: a missing object is Ok(None), not an error
    #[test]
    fn test_read_missing() {
        let temp = TempDir::new().unwrap();
        let oid = Oid::from_hex(TEST_OID).unwrap();
        assert!(read(temp.path(), &oid).unwrap().is_none());
    }

    // L-004: a non-commit payload is treated as not found
    #[test]
    fn test_read_non_commit() {
        let temp = TempDir::new().unwrap();
        let oid = Oid::from_hex(TEST_OID).unwrap();
        write_object(temp.path(), &oid, b"blob 5\0hello");

        assert!(read(temp.path(), &oid).unwrap().is_none());
    }

    // L-005: a payload without a NUL separator is treated as not found
    #[test]
    fn test_read_missing_nul() {
        let temp = TempDir::new().unwrap();
        let oid = Oid::from_hex(TEST_OID).unwrap();
        write_object(temp.path(), &oid, b"commit 5 hello");

        assert!(read(temp.path(), &oid).unwrap().is_none());
    }

    // L-006: corrupted compressed data is an error
    #[test]
    fn test_read_corrupt() {
        let temp = TempDir::new().unwrap();
        let oid = Oid::from_hex(TEST_OID).unwrap();
        let path = object_path(temp.path(), &oid);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0x78, 0x9C, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap();

        let result = read(temp.path(), &oid);
        assert!(matches!(result, Err(Error::DecompressionFailed)));
    }

    // L-007: payloads beyond the ceiling come back truncated, not failed
    #[test]
    fn test_read_truncates_large_object() {
        let temp = TempDir::new().unwrap();
        let oid = Oid::from_hex(TEST_OID).unwrap();
        let big_body = "x".repeat(MAX_OBJECT_SIZE * 2);
        write_object(temp.path(), &oid, &commit_payload(&big_body));

        let body = read(temp.path(), &oid).unwrap().unwrap();
        // Header bytes count against the ceiling, so the body is a bit
        // shorter than the cap itself.
        let header_len = format!("commit {}\0", big_body.len()).len();
        assert_eq!(body.len(), MAX_OBJECT_SIZE - header_len);
        assert!(body.iter().all(|&b| b == b'x'));
    }
}
