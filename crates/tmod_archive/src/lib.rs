//! This library handles reading and extracting **TMOD** mod archives.
//!
//! # TMOD Archive Format Documentation
//!
//! A TMOD file packs the files of a game mod together with the mod's name and version. There are
//! two incompatible payload layouts, chosen by the format version written in the header.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: 0x544D4F44 ("TMOD")                               |
//! | 0x0004         | Format version         | 1+N bytes: length-prefixed UTF-8 string, e.g. `0.10.1.5`   |
//! | var            | Content digest         | 20 bytes: SHA-1 of every byte after the declared length    |
//! | var            | Signature              | 256 bytes: opaque, not verified                            |
//! | var            | Declared length        | 4 bytes: payload length, informational only                |
//! | var            | Payload                | Remaining bytes, see below                                 |
//!
//! Strings are a single unsigned length byte followed by that many UTF-8 bytes, so no string can
//! exceed 255 bytes.
//!
//! ### Layout selection
//!
//! The version string is split on `.` and every component must be a decimal number. When the
//! second component is `11` or greater the modern layout is used, otherwise the legacy one. The
//! first component is never inspected.
//!
//! ### Legacy payload
//!
//! The whole payload is a single raw deflate stream (no zlib or gzip envelope). Inflated it holds:
//!
//! - **Mod name**: string
//! - **Mod version**: string
//! - **Entry count**: 4 bytes
//! - **Entries**: for each entry a path string, a 4-byte size and `size` bytes of data
//!
//! ### Modern payload
//!
//! The payload starts uncompressed:
//!
//! - **Mod name**: string
//! - **Mod version**: string
//! - **Entry count**: 4 bytes
//! - **Index**: for each entry a path string, a 4-byte size and a 4-byte stored size
//!
//! Directly after the index follows the data block. Entries are stored back to back in index
//! order, so an entry starts at the sum of the stored sizes of all entries before it. An entry is
//! a raw deflate stream when its stored size differs from its size, and stored verbatim otherwise.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.tmod`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Integrity**: a digest mismatch is reported through [`integrity::Integrity`] but does not
//!   prevent reading the archive
//!

pub mod compression;
pub mod cursor;
pub mod error;
pub mod integrity;
pub mod read;
pub mod types;

pub use compression::Storage;
pub use integrity::Integrity;
pub use read::TmodArchive;
pub use types::{Entry, Layout};
