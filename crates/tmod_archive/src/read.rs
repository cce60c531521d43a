//! Types for reading TMOD archives
//!

use std::{
    fmt::{self, Debug},
    fs::File,
    io::Read,
    path::Path,
};
use tracing::{debug, instrument, trace};

use crate::{
    compression::{self, Storage},
    cursor::ByteReader,
    error::{Error, Result},
    integrity::{self, Integrity},
    types::{read_record, ArchiveHeader, Entry, IndexRecord, Layout, ModInfo, RecordSizes},
};

/// Layout specific state needed to produce the entries
enum Body {
    Legacy {
        /// The inflated payload
        payload: Vec<u8>,
        /// Offset in `payload` of the first entry
        entries_start: usize,
    },
    Modern { records: Vec<IndexRecord> },
}

/// TMOD archive reader
///
/// Parsing the archive reads the header, checks the content digest and
/// decodes the mod info and entry count. The entries themselves are only read
/// once [`TmodArchive::entries`] is iterated, so inspecting a header never
/// touches the entry data.
///
/// ```no_run
/// fn list_tmod_contents(path: &std::path::Path) -> tmod_archive::error::Result<()> {
///     let tmod = tmod_archive::TmodArchive::open(path)?;
///
///     println!("{} v{}", tmod.info().name, tmod.info().version);
///     for entry in tmod.entries() {
///         let entry = entry?;
///         println!("{}: {} bytes", entry.path, entry.data.len());
///     }
///
///     Ok(())
/// }
/// ```
pub struct TmodArchive {
    data: Vec<u8>,
    header: ArchiveHeader,
    integrity: Integrity,
    info: ModInfo,
    count: u32,
    body: Body,
}

impl Debug for TmodArchive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TmodArchive")
            .field("header", &self.header)
            .field("integrity", &self.integrity)
            .field("info", &self.info)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl TmodArchive {
    /// Open and parse the archive at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<TmodArchive> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::FilesystemError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Read the whole source and parse it as an archive
    pub fn from_reader(mut reader: impl Read) -> Result<TmodArchive> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::new(data)
    }

    /// Parse an archive held in memory
    #[instrument(skip_all, fields(len = data.len()), err)]
    pub fn new(data: Vec<u8>) -> Result<TmodArchive> {
        let mut reader = ByteReader::new(&data);
        let header = ArchiveHeader::read(&mut reader)?;
        debug!(version = %header.version, layout = %header.layout(), "read header");

        // Both layouts sign everything that follows the header, including the
        // modern index block, so this has to happen before it is consumed.
        let integrity = integrity::verify(&header.digest, reader.rest());

        let (info, count, body) = match header.layout() {
            Layout::Legacy => Self::read_legacy(reader.rest())?,
            Layout::Modern => Self::read_modern(&mut reader)?,
        };
        debug!(name = %info.name, version = %info.version, count, "read mod info");

        Ok(TmodArchive {
            data,
            header,
            integrity,
            info,
            count,
            body,
        })
    }

    fn read_legacy(packed: &[u8]) -> Result<(ModInfo, u32, Body)> {
        let payload = compression::decompress(packed)?;
        trace!(packed = packed.len(), unpacked = payload.len(), "inflated payload");

        let mut reader = ByteReader::new(&payload);
        let info = ModInfo::read(&mut reader)?;
        let count = reader.read_u32()?;
        let entries_start = reader.position() as usize;

        Ok((
            info,
            count,
            Body::Legacy {
                payload,
                entries_start,
            },
        ))
    }

    fn read_modern(reader: &mut ByteReader<'_>) -> Result<(ModInfo, u32, Body)> {
        let info = ModInfo::read(reader)?;
        let count = reader.read_u32()?;

        // count is untrusted, the records themselves bound the allocation
        let mut records = Vec::with_capacity((count as usize).min(reader.remaining() / 9));
        let mut offset = 0u64;
        for _ in 0..count {
            let path = reader.read_string()?;
            let RecordSizes {
                size,
                size_compressed,
            } = read_record(reader, RecordSizes::SIZE)?;
            records.push(IndexRecord {
                path,
                size,
                size_compressed,
                offset,
                base_offset: 0,
            });
            offset += size_compressed as u64;
        }

        let base_offset = reader.position();
        records.iter_mut().for_each(|r| r.base_offset = base_offset);
        trace!(base_offset, data_len = offset, "read index block");

        Ok((info, count, Body::Modern { records }))
    }

    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    pub fn layout(&self) -> Layout {
        self.header.layout()
    }

    /// Result of checking the declared digest against the payload
    pub fn integrity(&self) -> Integrity {
        self.integrity
    }

    pub fn info(&self) -> &ModInfo {
        &self.info
    }

    /// Number of entries declared by the archive
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Whether this archive declares no entries
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The index block of a modern archive, empty for legacy archives
    pub fn records(&self) -> &[IndexRecord] {
        match &self.body {
            Body::Legacy { .. } => &[],
            Body::Modern { records } => records,
        }
    }

    /// Iterate over the entries in archive order.
    ///
    /// Iteration stops after the first error.
    pub fn entries(&self) -> Entries<'_> {
        let state = match &self.body {
            Body::Legacy {
                payload,
                entries_start,
            } => {
                // entries_start was reached while parsing the same buffer
                let reader = ByteReader::new(&payload[*entries_start..]);
                EntriesState::Legacy {
                    reader,
                    remaining: self.count,
                }
            }
            Body::Modern { records } => EntriesState::Modern {
                reader: ByteReader::new(&self.data),
                records: records.iter(),
            },
        };
        Entries { state, done: false }
    }

    /// Unwrap and return the raw bytes of the archive
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

enum EntriesState<'a> {
    Legacy {
        reader: ByteReader<'a>,
        remaining: u32,
    },
    Modern {
        reader: ByteReader<'a>,
        records: std::slice::Iter<'a, IndexRecord>,
    },
}

/// Iterator over the entries of a [`TmodArchive`]
pub struct Entries<'a> {
    state: EntriesState<'a>,
    done: bool,
}

impl Entries<'_> {
    fn next_entry(&mut self) -> Option<Result<Entry>> {
        match &mut self.state {
            EntriesState::Legacy { reader, remaining } => {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
                Some(read_inline_entry(reader))
            }
            EntriesState::Modern { reader, records } => {
                records.next().map(|record| read_indexed_entry(reader, record))
            }
        }
    }
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.next_entry();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

fn read_inline_entry(reader: &mut ByteReader<'_>) -> Result<Entry> {
    let path = reader.read_string()?;
    let size = reader.read_u32()?;
    let data = reader.read_fixed(size as usize)?.to_vec();
    trace!(%path, size, "read inline entry");
    Ok(Entry { path, data })
}

fn read_indexed_entry(reader: &mut ByteReader<'_>, record: &IndexRecord) -> Result<Entry> {
    reader.seek(record.data_start())?;
    let stored = reader.read_fixed(record.size_compressed as usize)?;
    let data = match record.storage() {
        Storage::Stored => stored.to_vec(),
        Storage::Deflated => compression::decompress(stored)?,
    };
    trace!(path = %record.path, storage = ?record.storage(), "read indexed entry");
    Ok(Entry {
        path: record.path.clone(),
        data,
    })
}
