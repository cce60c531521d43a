//! Base types for structure of TMOD file.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use binrw::{meta::ReadEndian, BinRead};

use crate::compression::Storage;
use crate::cursor::ByteReader;
use crate::error::{Error, Result};
use crate::integrity::DIGEST_LEN;

/// Magic bytes every TMOD file begins with
pub const MAGIC: &[u8; 4] = b"TMOD";

/// Size in bytes of the opaque signature blob
pub const SIGNATURE_LEN: usize = 256;

/// First minor version that uses the indexed layout
pub const MODERN_CUTOFF_MINOR: u32 = 11;

/// A dot separated, purely numeric format version such as `0.10.1.5`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatVersion {
    raw: String,
    components: Vec<u32>,
}

impl FormatVersion {
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The on-disk layout this version was written with
    pub fn layout(&self) -> Layout {
        // `FromStr` guarantees at least two components
        if self.components[1] >= MODERN_CUTOFF_MINOR {
            Layout::Modern
        } else {
            Layout::Legacy
        }
    }
}

impl FromStr for FormatVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let components = s
            .split('.')
            .map(|c| c.parse::<u32>())
            .collect::<core::result::Result<Vec<_>, _>>()
            .map_err(|_| Error::UnsupportedVersion(s.to_owned()))?;

        if components.len() < 2 {
            return Err(Error::UnsupportedVersion(s.to_owned()));
        }

        Ok(FormatVersion {
            raw: s.to_owned(),
            components,
        })
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The two incompatible payload layouts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Whole payload is one deflate stream with entries inlined
    Legacy,

    /// Uncompressed index followed by a block of per-entry data
    Modern,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Legacy => f.write_str("legacy"),
            Layout::Modern => f.write_str("modern"),
        }
    }
}

/// Fixed-width tail of the header, following the version string
#[derive(BinRead, Debug, Clone, PartialEq)]
#[br(little)]
pub(crate) struct HeaderSeal {
    pub digest: [u8; DIGEST_LEN],
    pub signature: [u8; SIGNATURE_LEN],
    pub declared_len: u32,
}

impl HeaderSeal {
    pub const SIZE: usize = DIGEST_LEN + SIGNATURE_LEN + 4;
}

/// Fixed-width part of a modern index record, following its path
#[derive(BinRead, Debug, Copy, Clone, PartialEq, Eq)]
#[br(little)]
pub(crate) struct RecordSizes {
    pub size: u32,
    pub size_compressed: u32,
}

impl RecordSizes {
    pub const SIZE: usize = 8;
}

/// Take `size` bytes off the reader and decode them as `T`
///
/// The length check happens on the reader so a short input is reported as
/// [`Error::TruncatedInput`] with the real offset.
pub(crate) fn read_record<T>(reader: &mut ByteReader<'_>, size: usize) -> Result<T>
where
    T: BinRead + ReadEndian,
    for<'b> T::Args<'b>: Default,
{
    let bytes = reader.read_fixed(size)?;
    Ok(T::read_args(&mut Cursor::new(bytes), Default::default())?)
}

/// TMOD file header
///
/// Everything in front of the payload. The payload begins immediately after
/// `declared_len` and runs to the end of the file.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveHeader {
    /// Version of the format that wrote this file
    pub version: FormatVersion,

    /// SHA-1 of every byte following the header
    pub digest: [u8; DIGEST_LEN],

    /// Opaque signature, never verified
    pub signature: [u8; SIGNATURE_LEN],

    /// Payload length as written by the packer, informational only
    pub declared_len: u32,
}

impl ArchiveHeader {
    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let magic = reader.read_fixed(MAGIC.len()).map_err(|_| Error::NotAnArchive {
            found: reader.rest().to_vec(),
        })?;
        if magic != MAGIC {
            return Err(Error::NotAnArchive {
                found: magic.to_vec(),
            });
        }

        let version = reader.read_string()?.parse::<FormatVersion>()?;
        let seal: HeaderSeal = read_record(reader, HeaderSeal::SIZE)?;

        Ok(ArchiveHeader {
            version,
            digest: seal.digest,
            signature: seal.signature,
            declared_len: seal.declared_len,
        })
    }

    pub fn layout(&self) -> Layout {
        self.version.layout()
    }
}

/// Name and version of the packed mod
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModInfo {
    pub name: String,
    pub version: String,
}

impl ModInfo {
    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(ModInfo {
            name: reader.read_string()?,
            version: reader.read_string()?,
        })
    }
}

/// Index record of the modern layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRecord {
    /// Path of the entry inside the archive
    pub path: String,

    /// Size of the entry once extracted
    pub size: u32,

    /// Size of the entry as stored in the data block
    pub size_compressed: u32,

    /// Offset of the stored bytes from the start of the data block
    pub offset: u64,

    /// Absolute offset of the data block in the file
    pub(crate) base_offset: u64,
}

impl IndexRecord {
    pub fn storage(&self) -> Storage {
        Storage::from_sizes(self.size, self.size_compressed)
    }

    /// Absolute offset in the file where this entry's stored bytes begin
    pub fn data_start(&self) -> u64 {
        self.base_offset + self.offset
    }

    /// Absolute offset one past the last stored byte
    pub fn data_end(&self) -> u64 {
        self.data_start() + self.size_compressed as u64
    }
}

/// A file extracted from the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Relative path of the file, exactly as stored.
    ///
    /// # Warnings
    ///
    /// The path is not sanitized. It may be absolute or contain `..`
    /// components, so joining it onto an output directory can write outside
    /// of that directory.
    pub path: String,

    /// Extracted contents
    pub data: Vec<u8>,
}
