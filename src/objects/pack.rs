//! Pack index and pack file reading.
//!
//! A pack bundles many compressed objects into one `.pack` file; the
//! sibling `.idx` file maps an object id to its byte offset in the pack.
//! This module implements the version-2 index layout: a 256-entry fan-out
//! table, a sorted 20-byte id table, a CRC table, a 31-bit offset table,
//! and a trailing 64-bit offset table for entries past the 2 GiB mark.
//!
//! Only whole (non-delta) commit entries are read back out of a pack;
//! REF_DELTA/OFS_DELTA entries are not reconstructed.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::oid::{Oid, OID_BYTES};
use crate::error::{Error, Result};
use crate::infra::{inflate_zlib, read_file};

/// Byte offset of the fan-out table (after the 4-byte magic and version).
const FANOUT_OFFSET: usize = 8;

/// Number of fan-out buckets, one per possible first byte.
const FANOUT_ENTRIES: usize = 256;

/// Byte offset of the sorted id table, immediately after the fan-out.
const OID_TABLE_OFFSET: usize = FANOUT_OFFSET + 4 * FANOUT_ENTRIES;

/// Size of one CRC table entry.
const CRC_ENTRY_SIZE: usize = 4;

/// Size of one offset table entry.
const OFFSET_ENTRY_SIZE: usize = 4;

/// Size of one large-offset table entry.
const LARGE_OFFSET_ENTRY_SIZE: usize = 8;

/// Top bit of an offset entry: set when the low 31 bits index the
/// large-offset table instead of holding the offset itself.
const LARGE_OFFSET_FLAG: u32 = 0x8000_0000;

/// Continuation bit of a pack entry's first header byte.
const CONTINUATION_FLAG: u8 = 0x80;

/// Number of header bytes consumed at a pack entry offset.
///
/// The entry-size varint can in principle span more continuation bytes;
/// this reader decodes at most one, so sizes of 2048 and above mis-decode.
const ENTRY_HEADER_BYTES: usize = 2;

/// Compressed-window multiplier applied to the decoded entry size.
///
/// The true compressed length is not recorded in the entry header, so the
/// reader takes `size * 100` bytes as the window to inflate. An entry whose
/// compressed payload exceeds that window fails to decompress.
const COMPRESSED_WINDOW_FACTOR: usize = 100;

/// The location of an object inside a pack file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackLocation {
    /// Path to the `.pack` file.
    pub pack_path: PathBuf,
    /// Byte offset of the object's entry within the pack.
    pub offset: u64,
}

/// Looks up an object id in a pack index file.
///
/// The fan-out bucket for the id's first byte bounds a slice of the sorted
/// id table; that slice is scanned for an exact byte match against the
/// hex-decoded id (which makes the lookup case-insensitive with respect to
/// the original hex string).
///
/// # Arguments
///
/// * `idx_path` - Path to the `.idx` file.
/// * `oid` - The object ID to look up.
///
/// # Returns
///
/// The pack location for the id, `Ok(None)` when the id is absent from this
/// index, or `Error::InvalidPackIndex` for a truncated table.
pub fn find_offset(idx_path: &Path, oid: &Oid) -> Result<Option<PackLocation>> {
    let data = read_file(idx_path)?;

    let first = oid.first_byte() as usize;
    let prev = if first == 0 {
        0
    } else {
        fanout_entry(&data, idx_path, first - 1)? as usize
    };
    let upper = fanout_entry(&data, idx_path, first)? as usize;
    let total = fanout_entry(&data, idx_path, FANOUT_ENTRIES - 1)? as usize;

    let mut found = None;
    for position in prev..upper {
        let start = OID_TABLE_OFFSET + OID_BYTES * position;
        let entry = slice_at(&data, idx_path, start, OID_BYTES)?;
        if entry == oid.as_bytes() {
            found = Some(position);
            break;
        }
    }

    let position = match found {
        Some(position) => position,
        None => return Ok(None),
    };

    // The CRC table sits between the id table and the offset table.
    let offsets_base = OID_TABLE_OFFSET + (OID_BYTES + CRC_ENTRY_SIZE) * total;
    let raw = read_u32_at(&data, idx_path, offsets_base + OFFSET_ENTRY_SIZE * position)?;

    let offset = if raw & LARGE_OFFSET_FLAG == 0 {
        raw as u64
    } else {
        let large_index = (raw & !LARGE_OFFSET_FLAG) as usize;
        let large_base = offsets_base + OFFSET_ENTRY_SIZE * total;
        read_u64_at(
            &data,
            idx_path,
            large_base + LARGE_OFFSET_ENTRY_SIZE * large_index,
        )?
    };

    Ok(Some(PackLocation {
        pack_path: idx_path.with_extension("pack"),
        offset,
    }))
}

/// Reads a commit body from a pack file at the given entry offset.
///
/// Two header bytes give the entry size, then a compressed window of
/// `size * 100` bytes is inflated as a zlib stream. Pack entries carry no
/// `commit <size>\0` prefix, so the inflated bytes are the commit body
/// directly.
///
/// # Arguments
///
/// * `pack_path` - Path to the `.pack` file.
/// * `offset` - Byte offset of the entry, as produced by [`find_offset`].
///
/// # Returns
///
/// The decompressed body, or an error for unreadable files, truncated
/// entries, or windows that do not contain a complete stream.
pub fn read_object_at(pack_path: &Path, offset: u64) -> Result<Vec<u8>> {
    let mut file = File::open(pack_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::PathNotFound(pack_path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;

    file.seek(SeekFrom::Start(offset))?;

    let mut header = [0u8; ENTRY_HEADER_BYTES];
    file.read_exact(&mut header)?;
    let size = entry_size(header[0], header[1]);

    let mut window = Vec::new();
    file.take((size * COMPRESSED_WINDOW_FACTOR) as u64)
        .read_to_end(&mut window)?;

    inflate_zlib(&window)
}

/// Decodes a pack entry's size from its first two header bytes.
///
/// The low 4 bits of the first byte are the low bits of the size; when the
/// continuation flag is set, the second byte contributes the next 7 bits.
/// Further continuation bytes are not decoded.
fn entry_size(first: u8, second: u8) -> usize {
    if first & CONTINUATION_FLAG == 0 {
        (first & 0x0f) as usize
    } else {
        ((second & 0x7f) as usize) * 16 + (first & 0x0f) as usize
    }
}

/// Reads the fan-out entry for a bucket (cumulative object count).
fn fanout_entry(data: &[u8], idx_path: &Path, bucket: usize) -> Result<u32> {
    read_u32_at(data, idx_path, FANOUT_OFFSET + 4 * bucket)
}

/// Returns `len` bytes at `start`, or a truncation error.
fn slice_at<'a>(data: &'a [u8], idx_path: &Path, start: usize, len: usize) -> Result<&'a [u8]> {
    data.get(start..start + len)
        .ok_or_else(|| truncated(idx_path, start))
}

/// Reads a big-endian u32 at a byte position.
fn read_u32_at(data: &[u8], idx_path: &Path, start: usize) -> Result<u32> {
    let bytes = slice_at(data, idx_path, start, 4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Reads a big-endian u64 at a byte position.
fn read_u64_at(data: &[u8], idx_path: &Path, start: usize) -> Result<u64> {
    let bytes = slice_at(data, idx_path, start, 8)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Ok(u64::from_be_bytes(buf))
}

fn truncated(idx_path: &Path, at: usize) -> Error {
    Error::InvalidPackIndex {
        path: idx_path.to_path_buf(),
        reason: format!("truncated at byte {}", at),
    }
}
