//! Commit object text parsing.

use super::oid::Oid;

/// Marker terminating a GPG signature block inside a commit header.
const SIGNATURE_END_MARKER: &str = "END PGP SIGNATURE";

/// An author or committer signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// The name of the person.
    name: String,
    /// The email address.
    email: String,
    /// Unix timestamp (seconds since epoch). The offset that follows it in
    /// the source text only affects display and is discarded; the epoch
    /// value is already UTC-relative.
    timestamp: Option<i64>,
}

impl Signature {
    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the Unix timestamp, if one parsed.
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Parses a signature from a commit header line remainder.
    ///
    /// Format: `Name <email> timestamp timezone`
    /// Example: `John Doe <john@example.com> 1234567890 +0900`
    ///
    /// Returns `None` when the `<`/`>` brackets are missing or inverted; a
    /// non-numeric timestamp leaves only the timestamp unset.
    fn parse(s: &str) -> Option<Self> {
        let email_start = s.find('<')?;
        let email_end = s.find('>')?;

        if email_start >= email_end {
            return None;
        }

        let name = s[..email_start].trim().to_string();
        let email = s[email_start + 1..email_end].to_string();

        let timestamp = s[email_end + 1..]
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<i64>().ok());

        Some(Signature {
            name,
            email,
            timestamp,
        })
    }
}

/// A parsed commit object.
///
/// The parse is best-effort: malformed header lines leave the corresponding
/// field unset rather than failing the whole record.
#[derive(Debug, Clone, Default)]
pub struct CommitRecord {
    /// The tree this commit points to.
    tree: Option<Oid>,
    /// The first parent commit. Further parents are not retained.
    parent: Option<Oid>,
    /// The author of the changes.
    author: Option<Signature>,
    /// The person who created the commit.
    committer: Option<Signature>,
    /// The GPG signature block, captured verbatim.
    gpg_signature: Option<String>,
    /// The commit message.
    message: String,
}

impl CommitRecord {
    /// Parses a commit body.
    ///
    /// Commit format:
    /// ```text
    /// tree <sha1>
    /// parent <sha1>  (zero or more)
    /// author <signature>
    /// committer <signature>
    /// gpgsig <first signature line>
    ///  <continuation lines until END PGP SIGNATURE>
    ///
    /// <message>
    /// ```
    ///
    /// Lines matching no known header accumulate as the message, which keeps
    /// the blank separator line before the message body in place.
    pub fn parse(body: &str) -> Self {
        let mut record = CommitRecord::default();
        let mut signature_lines: Vec<&str> = Vec::new();
        let mut message_lines: Vec<&str> = Vec::new();
        let mut in_signature = false;

        for line in body.lines() {
            if in_signature {
                signature_lines.push(line);
                if line.contains(SIGNATURE_END_MARKER) {
                    in_signature = false;
                }
                continue;
            }

            if let Some(value) = line.strip_prefix("tree ") {
                record.tree = Oid::from_hex(value).ok();
            } else if let Some(value) = line.strip_prefix("parent ") {
                if record.parent.is_none() {
                    record.parent = Oid::from_hex(value).ok();
                }
            } else if let Some(value) = line.strip_prefix("author ") {
                record.author = Signature::parse(value);
            } else if let Some(value) = line.strip_prefix("committer ") {
                record.committer = Signature::parse(value);
            } else if let Some(value) = line.strip_prefix("gpgsig ") {
                signature_lines.push(value);
                in_signature = true;
            } else {
                message_lines.push(line);
            }
        }

        if !signature_lines.is_empty() {
            record.gpg_signature = Some(signature_lines.join("\n"));
        }
        record.message = message_lines.join("\n");
        record
    }

    /// Returns the tree object ID.
    pub fn tree(&self) -> Option<&Oid> {
        self.tree.as_ref()
    }

    /// Returns the first parent commit ID, if any.
    pub fn parent(&self) -> Option<&Oid> {
        self.parent.as_ref()
    }

    /// Returns the author signature.
    pub fn author(&self) -> Option<&Signature> {
        self.author.as_ref()
    }

    /// Returns the committer signature.
    pub fn committer(&self) -> Option<&Signature> {
        self.committer.as_ref()
    }

    /// Returns the GPG signature block.
    pub fn gpg_signature(&self) -> Option<&str> {
        self.gpg_signature.as_deref()
    }

    /// Returns the commit message, including the separator line that
    /// precedes it in the raw object.
    pub fn message(&self) -> &str {
        &self.message
    }
}
