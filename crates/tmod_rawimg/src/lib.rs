//! This library converts the **rawimg** pixel dumps shipped inside TMOD archives into PNG files.
//!
//! # Raw Image Format Documentation
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Version                | 4 bytes: dump format version, ignored                      |
//! | 0x0004         | Width                  | 4 bytes: width in pixels                                   |
//! | 0x0008         | Height                 | 4 bytes: height in pixels                                  |
//! | 0x000C         | Pixels                 | width * height * 4 bytes: RGBA, rows top to bottom         |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.rawimg`
//! - **Endianness**: Little-endian for all multi-byte integers
//!
//! # PNG Output
//!
//! Images are written as 8 bit RGBA, non-interlaced, with every scanline using filter type
//! `None`. See [`encode`] for the chunk layout.
//!

pub mod convert;
pub mod encode;
pub mod error;
pub mod types;

pub use convert::{convert_file, Conversion};
pub use encode::{encode, encode_to};
pub use types::RawImage;
