//! Infrastructure utilities (decompression, filesystem).

pub mod compression;
pub mod fs;

pub use compression::{inflate_raw_capped, inflate_zlib};
pub use fs::read_file;
