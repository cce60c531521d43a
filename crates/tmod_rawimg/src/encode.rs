//! PNG encoding.
//!
//! Produces the smallest valid PNG layout: the signature followed by an
//! `IHDR`, a single `IDAT` and an `IEND` chunk. Scanlines are never
//! predicted, every row is written with filter type `None`.

use std::io::{Cursor, Write};

use binrw::BinWrite;
use byteorder::{BigEndian, WriteBytesExt};
use crc::{Crc, CRC_32_ISO_HDLC};
use flate2::{write::ZlibEncoder, Compression};
use tracing::{instrument, trace};

use crate::error::{Error, Result};
use crate::types::RawImage;

/// Bytes every PNG file begins with
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest value allowed for a chunk length or an image dimension
pub const PNG_MAX: u32 = (1 << 31) - 1;

const PNG_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_TYPE_NONE: u8 = 0;

/// Body of the `IHDR` chunk
#[derive(BinWrite, Debug, Copy, Clone, PartialEq)]
#[bw(big)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    /// Always 0, deflate
    pub compression: u8,
    /// Always 0, adaptive filtering with a filter byte per scanline
    pub filter: u8,
    /// Always 0, no interlacing
    pub interlace: u8,
}

impl ImageHeader {
    /// Header for an 8 bit per channel RGBA image
    pub fn rgba8(width: u32, height: u32) -> Self {
        ImageHeader {
            width,
            height,
            bit_depth: 8,
            color_type: COLOR_TYPE_RGBA,
            compression: 0,
            filter: 0,
            interlace: 0,
        }
    }
}

/// Write a length, tag, body and CRC framed chunk
pub fn write_chunk<W: Write>(writer: &mut W, tag: &[u8; 4], body: &[u8]) -> Result<()> {
    let mut digest = PNG_CRC.digest();
    digest.update(tag);
    digest.update(body);

    writer.write_u32::<BigEndian>(body.len() as u32)?;
    writer.write_all(tag)?;
    writer.write_all(body)?;
    writer.write_u32::<BigEndian>(digest.finalize())?;

    trace!(tag = %String::from_utf8_lossy(tag), len = body.len(), "wrote chunk");
    Ok(())
}

/// Zlib compressed scanlines, each prefixed with its filter byte
fn image_data(image: &RawImage) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for row in image.rows() {
        encoder.write_u8(FILTER_TYPE_NONE)?;
        encoder.write_all(row)?;
    }
    Ok(encoder.finish()?)
}

/// Encode `image` as PNG into `writer`
#[instrument(skip_all, fields(width = image.width(), height = image.height()), err)]
pub fn encode_to<W: Write>(image: &RawImage, mut writer: W) -> Result<()> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 || width > PNG_MAX || height > PNG_MAX {
        return Err(Error::InvalidDimensions { width, height });
    }

    let mut header = Vec::with_capacity(13);
    ImageHeader::rgba8(width, height).write(&mut Cursor::new(&mut header))?;

    let data = image_data(image)?;

    writer.write_all(&PNG_SIGNATURE)?;
    write_chunk(&mut writer, b"IHDR", &header)?;
    // decoders concatenate consecutive IDAT chunks, so oversized streams are split
    for part in data.chunks(PNG_MAX as usize) {
        write_chunk(&mut writer, b"IDAT", part)?;
    }
    write_chunk(&mut writer, b"IEND", &[])?;
    writer.flush()?;

    Ok(())
}

/// Encode `image` as an in-memory PNG file
pub fn encode(image: &RawImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_to(image, &mut out)?;
    Ok(out)
}
