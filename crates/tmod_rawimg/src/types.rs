//! Raw image layout.

use std::io::Read;

use binrw::{io::NoSeek, BinRead};
use tracing::instrument;

use crate::error::{Error, Result};

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Raw image header
///
/// Three little endian integers in front of the pixel data.
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[br(little)]
pub struct RawImageHeader {
    /// Version of the dump format, not used for decoding
    pub version: u32,

    pub width: u32,

    pub height: u32,
}

impl RawImageHeader {
    /// Size in bytes of the pixel section described by this header
    pub fn pixels_len(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(Error::ImageTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// An uncompressed RGBA image, rows stored top to bottom
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    header: RawImageHeader,
    pixels: Vec<u8>,
}

impl RawImage {
    /// Build an image from RGBA pixels, `pixels` must hold exactly `width * height` pixels
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let header = RawImageHeader {
            version: 1,
            width,
            height,
        };
        let expected = header.pixels_len()?;
        if pixels.len() != expected {
            return Err(Error::TruncatedPixels {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(RawImage { header, pixels })
    }

    /// Read a raw image dump. Bytes after the pixel section are ignored.
    #[instrument(skip_all, err)]
    pub fn read<R: Read>(mut reader: R) -> Result<Self> {
        let header = RawImageHeader::read(&mut NoSeek::new(&mut reader))?;
        let expected = header.pixels_len()?;

        let mut pixels = Vec::new();
        reader
            .by_ref()
            .take(expected as u64)
            .read_to_end(&mut pixels)?;
        if pixels.len() != expected {
            return Err(Error::TruncatedPixels {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(RawImage { header, pixels })
    }

    pub fn header(&self) -> &RawImageHeader {
        &self.header
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterate over the rows of pixels, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let stride = self.width() as usize * BYTES_PER_PIXEL;
        // a zero width image still has `height` empty rows
        (0..self.height() as usize).map(move |y| &self.pixels[y * stride..(y + 1) * stride])
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{RawImage, RawImageHeader};

    #[test]
    fn read_raw_image() -> Result<()> {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x10, 0x20, 0x30, 0x40,  0x50, 0x60, 0x70, 0x80,
            // trailing garbage
            0xAA,
        ]);

        let image = RawImage::read(input)?;
        assert_eq!(
            *image.header(),
            RawImageHeader {
                version: 1,
                width: 2,
                height: 1
            }
        );
        assert_eq!(
            image.pixels(),
            &[0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80]
        );

        Ok(())
    }

    #[test]
    fn read_truncated_pixels() {
        #[rustfmt::skip]
        let input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x10, 0x20, 0x30, 0x40,
        ]);

        assert!(matches!(
            RawImage::read(input),
            Err(Error::TruncatedPixels {
                expected: 16,
                actual: 4
            })
        ));
    }

    #[test]
    fn read_truncated_header() {
        let input = Cursor::new(vec![0x01, 0x00, 0x00, 0x00, 0x02]);
        assert!(matches!(RawImage::read(input), Err(Error::BinRWError(_))));
    }

    #[test]
    fn new_checks_length() {
        assert!(RawImage::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            RawImage::new(2, 2, vec![0; 15]),
            Err(Error::TruncatedPixels { .. })
        ));
    }

    #[test]
    fn rows() -> Result<()> {
        let image = RawImage::new(1, 3, (0..12).collect())?;
        let rows = image.rows().collect::<Vec<_>>();
        let expected: Vec<&[u8]> = vec![&[0, 1, 2, 3], &[4, 5, 6, 7], &[8, 9, 10, 11]];
        assert_eq!(rows, expected);

        Ok(())
    }
}
