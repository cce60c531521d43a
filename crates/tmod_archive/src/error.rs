//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// The archive could not be opened from the filesystem
    #[error("unable to open {path}")]
    FilesystemError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// file does not start with the TMOD magic
    #[error("file is not a tmod archive (found magic {found:02X?})")]
    #[diagnostic(help("tmod archives always begin with the bytes `TMOD`"))]
    NotAnArchive { found: Vec<u8> },

    /// the version string is not made of dot-separated numbers
    #[error("unsupported tmod version {0:?}")]
    UnsupportedVersion(String),

    /// a read ran past the end of the available bytes
    #[error("truncated input: wanted {wanted} bytes at offset {offset}, only {available} available")]
    TruncatedInput {
        offset: u64,
        wanted: u64,
        available: u64,
    },

    /// a length-prefixed string was not valid UTF-8
    #[error("invalid UTF-8 string at offset {offset}")]
    InvalidEncoding {
        offset: u64,
        #[source]
        source: std::str::Utf8Error,
    },

    /// a deflate stream could not be decoded
    #[error("corrupt deflate payload")]
    CorruptPayload(#[source] std::io::Error),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
