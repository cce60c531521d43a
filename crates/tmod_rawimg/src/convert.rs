//! Converting raw image dumps on disk.

use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

use crate::{encode::encode, error::Result, types::RawImage};

/// File extension of raw image dumps
pub const RAWIMG_EXTENSION: &str = "rawimg";

/// What [`convert_file`] did
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// A new PNG was written
    Written,

    /// The destination already existed and was left untouched
    Skipped,
}

/// Whether `path` names a raw image dump
pub fn is_rawimg(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext == RAWIMG_EXTENSION)
}

/// The PNG path written next to a raw image
pub fn png_path_for(path: impl AsRef<Path>) -> PathBuf {
    path.as_ref().with_extension("png")
}

/// Convert the raw image at `src` into a PNG at `dst`.
///
/// Anything already present at `dst`, file or directory, is never overwritten
/// and the conversion is reported as [`Conversion::Skipped`].
#[instrument(skip_all, fields(src = %src.as_ref().display()), err)]
pub fn convert_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<Conversion> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if dst.exists() {
        debug!("{} already exists", dst.display());
        return Ok(Conversion::Skipped);
    }

    let image = RawImage::read(BufReader::new(File::open(src)?))?;
    let png = encode(&image)?;

    let mut out = match File::create_new(dst) {
        Ok(out) => out,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!("{} appeared while converting", dst.display());
            return Ok(Conversion::Skipped);
        }
        Err(e) => return Err(e.into()),
    };
    out.write_all(&png)?;

    debug!(width = image.width(), height = image.height(), "wrote {}", dst.display());
    Ok(Conversion::Written)
}
