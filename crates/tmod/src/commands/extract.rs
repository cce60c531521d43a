use clap::Args;
use miette::Result;
use std::path::PathBuf;
use tracing::info;

use crate::extract::{extract_all, ExtractOptions};

#[derive(Args)]
pub struct ExtractArgs {
    /// Input TMOD files
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Directory to create the `unpacked_<name>` directories in
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Log every extracted file
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Convert extracted rawimg files to PNG
    #[arg(short, long, default_value_t = false)]
    convert_images: bool,

    /// Only print the archive headers, don't extract anything
    #[arg(long, default_value_t = false)]
    header_only: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let options = ExtractOptions::builder()
            .verbose(self.verbose)
            .convert_images(self.convert_images)
            .header_only(self.header_only)
            .output_root(&self.output)
            .build();

        let summaries = extract_all(&self.files, &options).into_result()?;
        let written: usize = summaries.iter().map(|s| s.written).sum();
        info!("processed {} archives, {} files written", summaries.len(), written);

        Ok(())
    }
}
