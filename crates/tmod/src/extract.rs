//! Extracting archives to disk.

use bon::Builder;
use miette::{miette, Context, IntoDiagnostic, Report, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tmod_archive::{Integrity, Layout, TmodArchive};
use tmod_rawimg::{
    convert::{is_rawimg, png_path_for},
    convert_file, Conversion,
};
use tracing::{debug, error, info, instrument, warn};

/// Prefix of the directory an archive is extracted into
pub const OUTPUT_PREFIX: &str = "unpacked_";

/// Options for how archives should be extracted
#[derive(Debug, Clone, Builder)]
pub struct ExtractOptions {
    /// Log every extracted entry at `info` instead of `debug`
    #[builder(default)]
    pub verbose: bool,

    /// Convert extracted `.rawimg` files to `.png`
    #[builder(default)]
    pub convert_images: bool,

    /// Only report the archive headers, write nothing
    #[builder(default)]
    pub header_only: bool,

    /// Directory the per-archive output directories are created in
    #[builder(default = PathBuf::from("."), into)]
    pub output_root: PathBuf,
}

impl ExtractOptions {
    /// The directory entries of `archive` are written to
    pub fn output_dir_for(&self, archive: &Path) -> Result<PathBuf> {
        let name = archive
            .file_name()
            .ok_or(miette!("{} has no file name", archive.display()))?;
        Ok(self
            .output_root
            .join(format!("{OUTPUT_PREFIX}{}", name.to_string_lossy())))
    }
}

/// What happened while extracting a single archive
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractSummary {
    pub archive: PathBuf,
    pub output: PathBuf,
    pub layout: Layout,
    pub integrity: Integrity,
    /// Entry count declared by the archive
    pub entries: usize,
    pub written: usize,
    pub converted: usize,
}

/// Results of processing several files, one failure never stops the others
#[derive(Debug)]
pub struct BatchReport<T> {
    pub completed: Vec<T>,
    pub failed: Vec<(PathBuf, Report)>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        BatchReport {
            completed: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchReport<T> {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Run `process` over every path, recording and logging failures
    pub fn run<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
        mut process: impl FnMut(&Path) -> Result<T>,
    ) -> Self {
        let mut report = BatchReport::default();
        for path in paths {
            let path = path.as_ref();
            match process(path) {
                Ok(done) => report.completed.push(done),
                Err(e) => {
                    error!("couldn't process {}: {e:?}", path.display());
                    report.failed.push((path.to_path_buf(), e));
                }
            }
        }
        report
    }

    /// Turn a report with failures into an error
    pub fn into_result(self) -> Result<Vec<T>> {
        if self.is_success() {
            return Ok(self.completed);
        }
        Err(miette!(
            "{} of {} files could not be processed",
            self.failed.len(),
            self.failed.len() + self.completed.len()
        ))
    }
}

/// Extract every archive in `paths`
pub fn extract_all<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
    options: &ExtractOptions,
) -> BatchReport<ExtractSummary> {
    BatchReport::run(paths, |path| extract_archive(path, options))
}

/// Report the header of the archive at `path` and, unless only headers were
/// requested, write its entries below [`ExtractOptions::output_dir_for`].
#[instrument(skip_all, fields(archive = %path.display()))]
pub fn extract_archive(path: &Path, options: &ExtractOptions) -> Result<ExtractSummary> {
    info!("=== processing {} ===", path.display());
    let tmod = TmodArchive::open(path)?;

    let header = tmod.header();
    info!("TMOD version  : {}", header.version);
    info!("content SHA-1 : {}", hex::encode(header.digest));
    debug!("signature     : {}", hex::encode(header.signature));
    match tmod.integrity() {
        Integrity::Matched => info!("[OK] payload SHA-1 matches the declared one"),
        Integrity::Mismatched { computed } => {
            warn!("[!!] payload SHA-1 : {}", hex::encode(computed));
            warn!("declared and actual SHA-1 differ, the archive could have been tampered with");
            warn!("extracting anyway");
        }
    }

    info!("name          : {}", tmod.info().name);
    info!("version       : {}", tmod.info().version);
    info!("archive has {} files ({} layout)", tmod.len(), tmod.layout());

    let mut summary = ExtractSummary {
        archive: path.to_path_buf(),
        output: options.output_dir_for(path)?,
        layout: tmod.layout(),
        integrity: tmod.integrity(),
        entries: tmod.len(),
        written: 0,
        converted: 0,
    };

    if options.header_only {
        return Ok(summary);
    }

    fs::create_dir_all(&summary.output)
        .into_diagnostic()
        .context(format!("creating {}", summary.output.display()))?;

    for (i, entry) in tmod.entries().enumerate() {
        let entry = entry.context(format!("reading entry {} of {}", i + 1, tmod.len()))?;

        if options.verbose {
            info!("extracting {}", entry.path);
        } else {
            debug!("extracting {}", entry.path);
        }

        let target = summary.output.join(&entry.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .into_diagnostic()
                .context(format!("creating {}", parent.display()))?;
        }
        fs::write(&target, &entry.data)
            .into_diagnostic()
            .context(format!("creating {}", target.display()))?;
        summary.written += 1;

        if options.convert_images && is_rawimg(&target) {
            let png = png_path_for(&target);
            match convert_file(&target, &png) {
                Ok(Conversion::Written) => {
                    info!("converted {}", png.display());
                    summary.converted += 1;
                }
                Ok(Conversion::Skipped) => debug!("{} already exists", png.display()),
                // the raw file itself was extracted fine, keep going
                Err(e) => warn!("couldn't convert {}: {e}", target.display()),
            }
        }
    }

    info!("=== done, {} files written ===", summary.written);
    Ok(summary)
}

/// Convert standalone raw images to PNG files next to them
pub fn convert_all<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> BatchReport<Conversion> {
    BatchReport::run(paths, |path| {
        let png = png_path_for(path);
        let conversion = convert_file(path, &png)
            .context(format!("converting {}", path.display()))?;
        match conversion {
            Conversion::Written => info!("wrote {}", png.display()),
            Conversion::Skipped => info!("{} already exists, skipping", png.display()),
        }
        Ok(conversion)
    })
}
