//! Zlib and raw-DEFLATE decompression utilities.

use miniz_oxide::inflate::TINFLStatus;

use crate::error::{Error, Result};

/// Decompresses a zlib-wrapped DEFLATE stream.
///
/// The zlib header is validated before decompression. Trailing bytes after
/// the end of the stream are ignored, so the input may be an over-read
/// window that merely begins with a complete stream.
///
/// # Arguments
///
/// * `data` - The zlib-compressed data to decompress.
///
/// # Returns
///
/// The decompressed data on success, or `Error::DecompressionFailed` on failure.
///
/// # Errors
///
/// Returns `Error::DecompressionFailed` if:
/// - The input is shorter than a zlib header
/// - The zlib header is invalid
/// - The compressed data is corrupted or truncated
pub fn inflate_zlib(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 2 {
        return Err(Error::DecompressionFailed);
    }

    // First byte: CMF (Compression Method and Flags)
    //   - bits 0-3: CM (Compression Method) - must be 8 for DEFLATE
    //   - bits 4-7: CINFO (Compression Info) - window size
    // Second byte: FLG (Flags)
    //   - The CMF and FLG bytes must satisfy: (CMF * 256 + FLG) % 31 == 0
    if !is_valid_zlib_header(data[0], data[1]) {
        return Err(Error::DecompressionFailed);
    }

    miniz_oxide::inflate::decompress_to_vec_zlib(data).map_err(|_| Error::DecompressionFailed)
}

/// Decompresses a raw DEFLATE stream (no zlib wrapper), capping the output.
///
/// When the decompressed data would exceed `max_size` bytes, the output is
/// truncated at the cap instead of failing; callers that accept partial
/// payloads rely on this.
///
/// # Arguments
///
/// * `data` - The raw DEFLATE data to decompress.
/// * `max_size` - The output ceiling in bytes.
///
/// # Returns
///
/// The decompressed (possibly truncated) data, or `Error::DecompressionFailed`
/// if the stream is corrupted or truncated.
pub fn inflate_raw_capped(data: &[u8], max_size: usize) -> Result<Vec<u8>> {
    match miniz_oxide::inflate::decompress_to_vec_with_limit(data, max_size) {
        Ok(out) => Ok(out),
        Err(err) if err.status == TINFLStatus::HasMoreOutput => Ok(err.output),
        Err(_) => Err(Error::DecompressionFailed),
    }
}

/// Validates a zlib header.
///
/// A valid zlib header consists of two bytes where:
/// - The compression method (low 4 bits of first byte) is 8 (DEFLATE)
/// - The window size (high 4 bits of first byte) is at most 7
/// - The checksum: (CMF * 256 + FLG) % 31 == 0
fn is_valid_zlib_header(cmf: u8, flg: u8) -> bool {
    let compression_method = cmf & 0x0F;
    if compression_method != 8 {
        return false;
    }

    let window_size = (cmf >> 4) & 0x0F;
    if window_size > 7 {
        return false;
    }

    let check = (cmf as u16) * 256 + (flg as u16);
    check % 31 == 0
}
