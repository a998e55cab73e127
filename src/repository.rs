//! Repository discovery and the top-level metadata query.

use std::env;
use std::path::{Path, PathBuf};

use crate::config;
use crate::objects::{CommitRecord, ObjectStore};
use crate::refs::resolve_head;

/// Metadata describing the state of a Git repository.
///
/// Built once by [`get_repository_info_at`] and immutable afterwards. Every
/// field is optional: a missing repository, a broken ref, or an unreadable
/// object leaves the affected fields unset rather than failing the query,
/// so a partially-filled (or entirely empty) value is a valid result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryInfo {
    /// The working-tree root (parent of the `.git` directory).
    source_root: Option<PathBuf>,
    /// URL of the branch's upstream remote.
    repository_url: Option<String>,
    /// The checked-out branch ref path (e.g. `refs/heads/main`).
    branch: Option<String>,
    /// The resolved commit id, as lowercase hex.
    commit_id: Option<String>,
    /// Author name.
    author_name: Option<String>,
    /// Author email.
    author_email: Option<String>,
    /// Author date as Unix seconds.
    author_date: Option<i64>,
    /// Committer name.
    committer_name: Option<String>,
    /// Committer email.
    committer_email: Option<String>,
    /// Committer date as Unix seconds.
    committer_date: Option<i64>,
    /// The commit's GPG signature block.
    gpg_signature: Option<String>,
    /// The commit message.
    message: Option<String>,
}

impl RepositoryInfo {
    /// Returns the working-tree root.
    pub fn source_root(&self) -> Option<&Path> {
        self.source_root.as_deref()
    }

    /// Returns the repository URL.
    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    /// Returns the branch ref path.
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Returns the commit id as lowercase hex.
    pub fn commit_id(&self) -> Option<&str> {
        self.commit_id.as_deref()
    }

    /// Returns the author name.
    pub fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    /// Returns the author email.
    pub fn author_email(&self) -> Option<&str> {
        self.author_email.as_deref()
    }

    /// Returns the author date as Unix seconds.
    pub fn author_date(&self) -> Option<i64> {
        self.author_date
    }

    /// Returns the committer name.
    pub fn committer_name(&self) -> Option<&str> {
        self.committer_name.as_deref()
    }

    /// Returns the committer email.
    pub fn committer_email(&self) -> Option<&str> {
        self.committer_email.as_deref()
    }

    /// Returns the committer date as Unix seconds.
    pub fn committer_date(&self) -> Option<i64> {
        self.committer_date
    }

    /// Returns the commit's GPG signature block.
    pub fn gpg_signature(&self) -> Option<&str> {
        self.gpg_signature.as_deref()
    }

    /// Returns the commit message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == RepositoryInfo::default()
    }
}

/// Finds the repository metadata directory for a path.
///
/// Starting at `start`, each ancestor is checked for a subdirectory named
/// exactly `.git`; the walk stops at the filesystem root.
///
/// # Arguments
///
/// * `start` - Path to start searching from.
///
/// # Returns
///
/// The path of the `.git` directory, or `None` when no ancestor holds one —
/// a valid "no repository" result, not an error.
pub fn find_git_dir<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    let mut current = start.as_ref().to_path_buf();

    loop {
        let candidate = current.join(".git");
        if candidate.is_dir() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Collects repository metadata starting from the process working directory.
///
/// Equivalent to [`get_repository_info_at`] with the current directory; an
/// unreadable working directory yields an empty result.
pub fn get_repository_info() -> RepositoryInfo {
    match env::current_dir() {
        Ok(dir) => get_repository_info_at(dir),
        Err(_) => RepositoryInfo::default(),
    }
}

/// Collects repository metadata starting from a path.
///
/// The pipeline runs strictly in sequence: locate the `.git` directory,
/// resolve HEAD, read and parse the commit, then resolve the remote URL
/// from the config. Each stage that fails leaves its fields unset and the
/// pipeline continues with what it has; the query itself never fails.
///
/// # Examples
///
/// ```no_run
/// let info = repometa::get_repository_info_at("path/to/project");
/// if let Some(commit) = info.commit_id() {
///     println!("HEAD is at {}", commit);
/// }
/// ```
pub fn get_repository_info_at<P: AsRef<Path>>(start: P) -> RepositoryInfo {
    let git_dir = match find_git_dir(start) {
        Some(dir) => dir,
        None => return RepositoryInfo::default(),
    };

    let mut info = RepositoryInfo {
        source_root: git_dir.parent().map(Path::to_path_buf),
        ..Default::default()
    };

    let head = resolve_head(&git_dir).ok();
    if let Some(head) = &head {
        info.branch = head.branch_ref().map(str::to_string);
        info.commit_id = head.oid().map(|oid| oid.to_hex());
    }

    if let Some(oid) = head.as_ref().and_then(|h| h.oid()) {
        let store = ObjectStore::new(git_dir.join("objects"));
        let record = store
            .read_commit(oid)
            .ok()
            .and_then(|body| String::from_utf8(body).ok())
            .map(|text| CommitRecord::parse(&text));

        if let Some(record) = record {
            if let Some(author) = record.author() {
                info.author_name = Some(author.name().to_string());
                info.author_email = Some(author.email().to_string());
                info.author_date = author.timestamp();
            }
            if let Some(committer) = record.committer() {
                info.committer_name = Some(committer.name().to_string());
                info.committer_email = Some(committer.email().to_string());
                info.committer_date = committer.timestamp();
            }
            info.gpg_signature = record.gpg_signature().map(str::to_string);
            info.message = Some(record.message().to_string());
        }
    }

    if let Ok(entries) = config::load(&git_dir.join("config")) {
        info.repository_url = config::remote_url(&entries, info.branch.as_deref());
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // RP-001: find_git_dir walks up to the repository root
    #[test]
    fn test_find_git_dir_from_subdir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("src/nested/deep")).unwrap();

        let found = find_git_dir(root.join("src/nested/deep")).unwrap();
        assert_eq!(found, root.join(".git"));
    }

    // RP-002: find_git_dir returns None without a repository
    #[test]
    fn test_find_git_dir_none() {
        let temp = TempDir::new().unwrap();
        assert!(find_git_dir(temp.path()).is_none());
    }

    // RP-003: a .git *file* (worktree pointer) is not a metadata directory
    #[test]
    fn test_find_git_dir_ignores_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".git"), "gitdir: elsewhere\n").unwrap();

        assert!(find_git_dir(temp.path()).is_none());
    }

    // RP-004: is_empty reflects the default value
    #[test]
    fn test_is_empty() {
        assert!(RepositoryInfo::default().is_empty());

        let info = RepositoryInfo {
            branch: Some("refs/heads/main".to_string()),
            ..Default::default()
        };
        assert!(!info.is_empty());
    }
}
