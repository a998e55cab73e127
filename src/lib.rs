//! # repometa
//!
//! A pure Rust reader of Git repository metadata.
//!
//! This crate resolves a repository's HEAD to a commit and extracts its
//! metadata (author, committer, timestamps, signature, message, remote URL,
//! branch) without invoking the git command-line tool or linking libgit2.
//! Text config files, loose zlib-compressed objects, and binary pack
//! index/pack files are all parsed directly from their on-disk bytes.
//!
//! Extraction is best-effort by design: the result is a plain value whose
//! fields are individually optional, and a missing repository, broken ref,
//! or unreadable object leaves fields unset instead of returning an error.
//! That makes the output safe to attach as tags from instrumentation code
//! that must never take down its host process.
//!
//! ## Quick Start
//!
//! ```no_run
//! let info = repometa::get_repository_info();
//!
//! println!("repository: {:?}", info.repository_url());
//! println!("branch:     {:?}", info.branch());
//! println!("commit:     {:?}", info.commit_id());
//! println!("author:     {:?} <{:?}>", info.author_name(), info.author_email());
//! ```
//!
//! ## Module Overview
//!
//! - [`error`] - Error types and Result alias
//! - [`repository`] - Repository discovery and the `RepositoryInfo` query
//! - [`objects`] - Object ids, loose/pack object reading, commit parsing
//! - [`refs`] - HEAD resolution
//! - [`config`] - Config parsing and remote-URL resolution
//!
//! ## Scope
//!
//! Reading only. The crate never writes repository state, does not resolve
//! arbitrary revisions or tags, and does not reconstruct delta-compressed
//! pack entries; commits stored as deltas simply come back unset.

pub mod config;
pub mod error;
pub mod objects;
pub mod refs;
pub mod repository;

// Internal modules (not part of public API)
pub(crate) mod infra;

// Re-export primary types for convenient access
pub use error::{Error, Result};
pub use repository::{find_git_dir, get_repository_info, get_repository_info_at, RepositoryInfo};

// Re-export object types
pub use objects::{CommitRecord, ObjectStore, Oid, PackLocation, Signature};

// Re-export reference types
pub use refs::Head;

// Re-export config types
pub use config::ConfigEntry;
