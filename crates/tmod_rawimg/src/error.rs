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

    /// pixel section is shorter than the dimensions require
    #[error("raw image is truncated: expected {expected} bytes of pixels, found {actual}")]
    TruncatedPixels { expected: usize, actual: usize },

    /// dimensions cannot be stored in a PNG
    #[error("a {width}x{height} image cannot be encoded, both dimensions must be between 1 and 2^31-1")]
    InvalidDimensions { width: u32, height: u32 },

    /// dimensions do not fit in memory
    #[error("raw image of {width}x{height} is too large")]
    ImageTooLarge { width: u32, height: u32 },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
