//! HEAD and branch ref resolution.

use std::fs;
use std::path::Path;

use super::head::Head;
use crate::error::{Error, Result};
use crate::objects::Oid;

/// Prefix marking a symbolic reference.
const SYMBOLIC_REF_PREFIX: &str = "ref:";

/// Resolves the repository's HEAD.
///
/// The `HEAD` file either starts with `ref:` followed by a branch ref path,
/// or holds a commit id directly (detached HEAD). A branch ref resolves
/// through its loose ref file first, then through the consolidated
/// `info/refs` listing; when neither knows it the branch is unborn and the
/// id stays unset.
///
/// # Arguments
///
/// * `git_dir` - Path to the `.git` directory.
///
/// # Returns
///
/// The resolved `Head`, or an error when `HEAD` is missing, unreadable, or
/// detached on something that is not an object id.
pub fn resolve_head(git_dir: &Path) -> Result<Head> {
    let content = fs::read_to_string(git_dir.join("HEAD")).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::RefNotFound("HEAD".to_string())
        } else {
            Error::Io(e)
        }
    })?;
    let content = content.trim();

    if let Some(target) = content.strip_prefix(SYMBOLIC_REF_PREFIX) {
        let ref_path = target.trim().to_string();
        let oid = resolve_ref(git_dir, &ref_path)?;
        Ok(Head::branch(ref_path, oid))
    } else {
        let oid = Oid::from_hex(content)?;
        Ok(Head::detached(oid))
    }
}

/// Resolves a branch ref path to a commit id.
///
/// A loose ref file under the metadata directory wins; otherwise the
/// `info/refs` listing is scanned line by line (`<hex-id><ws><ref-path>`)
/// and the first line with a matching ref path supplies the id.
///
/// # Returns
///
/// `Ok(None)` when the ref exists nowhere or its id does not parse.
fn resolve_ref(git_dir: &Path, ref_path: &str) -> Result<Option<Oid>> {
    let loose_path = git_dir.join(ref_path);
    if loose_path.is_file() {
        let content = fs::read_to_string(&loose_path)?;
        return Ok(Oid::from_hex(content.trim()).ok());
    }

    let packed_path = git_dir.join("info").join("refs");
    if packed_path.is_file() {
        let content = fs::read_to_string(&packed_path)?;
        for line in content.lines() {
            let mut parts = line.split_whitespace();
            let (id, path) = match (parts.next(), parts.next()) {
                (Some(id), Some(path)) => (id, path),
                _ => continue,
            };
            if path == ref_path {
                return Ok(Oid::from_hex(id).ok());
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEST_OID: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
    const OTHER_OID: &str = "0123456789abcdef0123456789abcdef01234567";

    fn setup_git_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("refs/heads")).unwrap();
        temp
    }

    // R-001: symbolic HEAD resolves through a loose ref file
    #[test]
    fn test_resolve_symbolic_loose() {
        let temp = setup_git_dir();
        let git_dir = temp.path();

        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(git_dir.join("refs/heads/main"), format!("{}\n", TEST_OID)).unwrap();

        let head = resolve_head(git_dir).unwrap();
        assert_eq!(head.branch_ref(), Some("refs/heads/main"));
        assert_eq!(head.oid().unwrap().to_hex(), TEST_OID);
    }

    // R-002: symbolic HEAD falls back to the info/refs listing
    #[test]
    fn test_resolve_symbolic_packed() {
        let temp = setup_git_dir();
        let git_dir = temp.path();

        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::create_dir_all(git_dir.join("info")).unwrap();
        fs::write(
            git_dir.join("info/refs"),
            format!(
                "{}\trefs/heads/feature\n{}\trefs/heads/main\n",
                OTHER_OID, TEST_OID
            ),
        )
        .unwrap();

        let head = resolve_head(git_dir).unwrap();
        assert_eq!(head.branch_ref(), Some("refs/heads/main"));
        assert_eq!(head.oid().unwrap().to_hex(), TEST_OID);
    }

    // R-003: a loose ref file wins over the info/refs listing
    #[test]
    fn test_loose_ref_wins() {
        let temp = setup_git_dir();
        let git_dir = temp.path();

        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(git_dir.join("refs/heads/main"), format!("{}\n", TEST_OID)).unwrap();
        fs::create_dir_all(git_dir.join("info")).unwrap();
        fs::write(
            git_dir.join("info/refs"),
            format!("{}\trefs/heads/main\n", OTHER_OID),
        )
        .unwrap();

        let head = resolve_head(git_dir).unwrap();
        assert_eq!(head.oid().unwrap().to_hex(), TEST_OID);
    }

    // R-004: an unresolvable branch is unborn, not an error
    #[test]
    fn test_unborn_branch() {
        let temp = setup_git_dir();
        let git_dir = temp.path();

        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();

        let head = resolve_head(git_dir).unwrap();
        assert_eq!(head.branch_ref(), Some("refs/heads/main"));
        assert!(head.oid().is_none());
    }

    // R-005: a bare commit id in HEAD is a detached state
    #[test]
    fn test_detached_head() {
        let temp = setup_git_dir();
        let git_dir = temp.path();

        fs::write(git_dir.join("HEAD"), format!("{}\n", TEST_OID)).unwrap();

        let head = resolve_head(git_dir).unwrap();
        assert!(head.is_detached());
        assert_eq!(head.branch_ref(), None);
        assert_eq!(head.oid().unwrap().to_hex(), TEST_OID);
    }

    // R-006: missing HEAD maps to RefNotFound
    #[test]
    fn test_missing_head() {
        let temp = setup_git_dir();
        let result = resolve_head(temp.path());
        assert!(matches!(result, Err(Error::RefNotFound(_))));
    }

    // R-007: garbage in a detached HEAD is InvalidOid
    #[test]
    fn test_detached_garbage() {
        let temp = setup_git_dir();
        fs::write(temp.path().join("HEAD"), "not a commit id\n").unwrap();

        let result = resolve_head(temp.path());
        assert!(matches!(result, Err(Error::InvalidOid(_))));
    }

    // R-008: a loose ref with a malformed id resolves to an unborn branch
    #[test]
    fn test_loose_ref_garbage() {
        let temp = setup_git_dir();
        let git_dir = temp.path();

        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(git_dir.join("refs/heads/main"), "garbage\n").unwrap();

        let head = resolve_head(git_dir).unwrap();
        assert!(head.oid().is_none());
    }
}
