//! Bounds-checked little-endian reader over an in-memory buffer.
//!
//! Every length in a TMOD file is attacker controlled, so each read is checked
//! against the bytes that remain and reported as [`Error::TruncatedInput`]
//! instead of panicking or relying on the underlying source.

use byteorder::{ByteOrder, LittleEndian};
use std::str;

use crate::error::{Error, Result};

/// Sequential reader over a byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Current absolute offset into the buffer
    pub fn position(&self) -> u64 {
        self.pos as u64
    }

    /// Number of bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// All bytes from the cursor to the end, without advancing
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Seeking exactly to the end is allowed, anything past it is truncated input.
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        if pos > self.data.len() as u64 {
            return Err(Error::TruncatedInput {
                offset: pos,
                wanted: 0,
                available: 0,
            });
        }
        self.pos = pos as usize;
        Ok(())
    }

    /// Read exactly `n` bytes
    pub fn read_fixed(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::TruncatedInput {
                offset: self.position(),
                wanted: n as u64,
                available: self.remaining() as u64,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_fixed(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_fixed(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_fixed(4)?))
    }

    /// Read a string prefixed by a single unsigned length byte
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u8()? as usize;
        let offset = self.position();
        let raw = self.read_fixed(len)?;
        str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|source| Error::InvalidEncoding { offset, source })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::cursor::ByteReader;
    use crate::error::{Error, Result};

    #[test]
    fn read_primitives() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x2A, 0x00, 0x00, 0x00,
            0x05, 0x68, 0x65, 0x6C, 0x6C, 0x6F,
            0xFF, 0xFE,
        ];

        let mut reader = ByteReader::new(&input);
        assert_eq!(reader.read_u32()?, 42);
        assert_eq!(reader.read_string()?, "hello");
        assert_eq!(reader.position(), 10);
        assert_eq!(reader.read_array::<2>()?, [0xFF, 0xFE]);
        assert_eq!(reader.remaining(), 0);

        Ok(())
    }

    #[test]
    fn empty_string() -> Result<()> {
        let mut reader = ByteReader::new(&[0x00, 0x01]);
        assert_eq!(reader.read_string()?, "");
        assert_eq!(reader.rest(), &[0x01]);

        Ok(())
    }

    #[test]
    fn read_past_end() {
        let mut reader = ByteReader::new(&[0x01, 0x02, 0x03]);
        match reader.read_u32() {
            Err(Error::TruncatedInput {
                offset,
                wanted,
                available,
            }) => {
                assert_eq!((offset, wanted, available), (0, 4, 3));
            }
            other => panic!("expected truncated input, got {other:?}"),
        }
        // cursor does not move on failure
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn string_prefix_exceeds_input() {
        let mut reader = ByteReader::new(&[0x09, 0x61, 0x62]);
        assert!(matches!(
            reader.read_string(),
            Err(Error::TruncatedInput { wanted: 9, .. })
        ));
    }

    #[test]
    fn string_invalid_utf8() {
        let mut reader = ByteReader::new(&[0x02, 0xC3, 0x28]);
        assert!(matches!(
            reader.read_string(),
            Err(Error::InvalidEncoding { offset: 1, .. })
        ));
    }

    #[test]
    fn seek_bounds() -> Result<()> {
        let mut reader = ByteReader::new(&[0x00; 8]);
        reader.seek(8)?;
        assert_eq!(reader.remaining(), 0);
        assert!(reader.seek(9).is_err());
        reader.seek(4)?;
        assert_eq!(reader.read_u32()?, 0);

        Ok(())
    }
}
