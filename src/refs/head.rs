//! HEAD reference representation.

use crate::objects::Oid;

/// Represents the current HEAD state of a Git repository.
///
/// HEAD either names a branch ref (normal state) or holds a commit id
/// directly (detached state). A branch whose ref cannot be resolved to a
/// commit — an unborn branch — keeps its name with no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD points to a branch ref (e.g., `refs/heads/main`).
    Branch {
        /// The branch ref path, exactly as written in HEAD.
        ref_path: String,
        /// The commit the branch points to, when it resolved.
        oid: Option<Oid>,
    },
    /// HEAD holds a commit id directly (detached state).
    Detached {
        /// The commit OID that HEAD points to.
        oid: Oid,
    },
}

impl Head {
    /// Creates a Head pointing to a branch ref.
    pub fn branch(ref_path: impl Into<String>, oid: Option<Oid>) -> Self {
        Head::Branch {
            ref_path: ref_path.into(),
            oid,
        }
    }

    /// Creates a detached Head.
    pub fn detached(oid: Oid) -> Self {
        Head::Detached { oid }
    }

    /// Returns the commit OID that HEAD points to, when known.
    pub fn oid(&self) -> Option<&Oid> {
        match self {
            Head::Branch { oid, .. } => oid.as_ref(),
            Head::Detached { oid } => Some(oid),
        }
    }

    /// Returns the branch ref path if HEAD points to a branch.
    ///
    /// Returns `None` in detached state.
    pub fn branch_ref(&self) -> Option<&str> {
        match self {
            Head::Branch { ref_path, .. } => Some(ref_path),
            Head::Detached { .. } => None,
        }
    }

    /// Returns `true` if HEAD is in detached state.
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_OID: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

    fn test_oid() -> Oid {
        Oid::from_hex(TEST_OID).unwrap()
    }

    // H-001: Head::branch carries the ref path and resolved oid
    #[test]
    fn test_head_branch() {
        let head = Head::branch("refs/heads/main", Some(test_oid()));

        assert!(!head.is_detached());
        assert_eq!(head.branch_ref(), Some("refs/heads/main"));
        assert_eq!(head.oid().unwrap().to_hex(), TEST_OID);
    }

    // H-002: an unborn branch has a ref path but no oid
    #[test]
    fn test_head_unborn_branch() {
        let head = Head::branch("refs/heads/main", None);

        assert_eq!(head.branch_ref(), Some("refs/heads/main"));
        assert!(head.oid().is_none());
    }

    // H-003: Head::detached has an oid but no branch ref
    #[test]
    fn test_head_detached() {
        let head = Head::detached(test_oid());

        assert!(head.is_detached());
        assert_eq!(head.branch_ref(), None);
        assert_eq!(head.oid().unwrap().to_hex(), TEST_OID);
    }
}
