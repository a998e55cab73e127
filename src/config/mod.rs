//! Git configuration reading.
//!
//! Only the slice of the config format this crate needs is modeled:
//! `[branch "<name>"]` and `[remote "<name>"]` sections with their `url`,
//! `remote`, and `merge` keys, enough to map the checked-out branch to the
//! URL of its upstream remote.

mod parser;

pub use parser::parse;

use std::path::Path;

use crate::error::{Error, Result};
use crate::infra::read_file;

/// The remote assumed when no branch entry names one.
pub const DEFAULT_REMOTE: &str = "origin";

/// One `[<type> "<name>"]` section of a config file.
///
/// Only the keys relevant to remote-URL resolution are retained; everything
/// else in the section is dropped during parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEntry {
    /// The section type (e.g. "branch", "remote").
    pub(crate) section: String,
    /// The quoted section name.
    pub(crate) name: String,
    /// The `url` key, for remote sections.
    pub(crate) url: Option<String>,
    /// The `remote` key, for branch sections.
    pub(crate) remote: Option<String>,
    /// The `merge` key (the upstream ref path), for branch sections.
    pub(crate) merge: Option<String>,
}

impl ConfigEntry {
    /// Returns the section type.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the `url` value, if present.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the `remote` value, if present.
    pub fn remote(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    /// Returns the `merge` value, if present.
    pub fn merge(&self) -> Option<&str> {
        self.merge.as_deref()
    }
}

/// Reads and parses a config file into its entries.
///
/// # Arguments
///
/// * `path` - Path to the config file (e.g. `.git/config`).
pub fn load(path: &Path) -> Result<Vec<ConfigEntry>> {
    let content = read_file(path)?;
    let text = String::from_utf8(content).map_err(|_| Error::InvalidUtf8)?;
    Ok(parse(&text))
}

/// Resolves the repository URL for a branch from parsed config entries.
///
/// The branch entry whose `merge` value equals the branch ref path names the
/// remote; without such an entry (or without a branch at all) the remote
/// defaults to `origin`. The matching remote entry's `url` is the result.
///
/// # Arguments
///
/// * `entries` - Parsed config entries.
/// * `branch` - The branch ref path (e.g. `refs/heads/main`), if known.
///
/// # Returns
///
/// The URL, or `None` when no matching remote entry carries one.
pub fn remote_url(entries: &[ConfigEntry], branch: Option<&str>) -> Option<String> {
    let remote_name = branch
        .and_then(|branch_ref| {
            entries
                .iter()
                .find(|e| e.section == "branch" && e.merge.as_deref() == Some(branch_ref))
        })
        .and_then(|e| e.remote.clone())
        .unwrap_or_else(|| DEFAULT_REMOTE.to_string());

    entries
        .iter()
        .find(|e| e.section == "remote" && e.name == remote_name)
        .and_then(|e| e.url.clone())
}
