//! Git object reading (ids, loose objects, pack files, commits).

pub mod commit;
pub mod loose;
pub mod oid;
pub mod pack;
pub mod store;

pub use commit::{CommitRecord, Signature};
pub use oid::Oid;
pub use pack::PackLocation;
pub use store::ObjectStore;
