//! Raw deflate compression and decompression handling.

use std::io::{Read, Write};

use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};
use tracing::instrument;

use crate::error::{Error, Result};

/// Identifies how an entry's bytes are kept inside a modern TMOD data block
///
/// The format has no explicit flag for this, an entry is compressed exactly
/// when its stored size differs from its real size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Storage {
    /// Stores the data as it is
    Stored,

    /// Data is a raw deflate stream
    Deflated,
}

impl Storage {
    pub fn from_sizes(size: u32, size_compressed: u32) -> Self {
        if size_compressed == size {
            Storage::Stored
        } else {
            Storage::Deflated
        }
    }
}

/// Inflate a raw deflate stream (no zlib or gzip envelope)
#[instrument(skip_all, fields(input = data.len()), err)]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    DeflateDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(Error::CorruptPayload)?;
    Ok(out)
}

/// Deflate `data` with the default compression level, without any envelope
#[instrument(skip_all, fields(input = data.len()), err)]
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
