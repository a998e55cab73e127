//! Object lookup across the loose store and pack files.

use std::fs;
use std::path::{Path, PathBuf};

use super::loose;
use super::oid::Oid;
use super::pack;
use crate::error::{Error, Result};

/// A read-only view of a repository's object store.
///
/// Lookups try the loose-object path first and then each pack index in the
/// pack directory in turn, stopping at the first index that knows the id.
#[derive(Debug)]
pub struct ObjectStore {
    /// Path to the objects directory (e.g., `.git/objects`).
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Creates a new ObjectStore for the given objects directory.
    ///
    /// # Arguments
    ///
    /// * `objects_dir` - Path to the `.git/objects` directory.
    pub fn new<P: AsRef<Path>>(objects_dir: P) -> Self {
        ObjectStore {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    /// Reads a commit body by its Oid.
    ///
    /// # Arguments
    ///
    /// * `oid` - The object ID to read.
    ///
    /// # Returns
    ///
    /// The commit body (header already stripped for loose objects; pack
    /// entries carry none), or `Error::ObjectNotFound` when no loose file
    /// and no pack index holds the id.
    pub fn read_commit(&self, oid: &Oid) -> Result<Vec<u8>> {
        if let Some(body) = loose::read(&self.objects_dir, oid)? {
            return Ok(body);
        }

        for idx_path in self.index_paths()? {
            if let Some(location) = pack::find_offset(&idx_path, oid)? {
                return pack::read_object_at(&location.pack_path, location.offset);
            }
        }

        Err(Error::ObjectNotFound(oid.to_hex()))
    }

    /// Lists the `.idx` files in the pack directory, sorted for a
    /// deterministic scan order.
    fn index_paths(&self) -> Result<Vec<PathBuf>> {
        let pack_dir = self.objects_dir.join("pack");
        if !pack_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&pack_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "idx") {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }
}
