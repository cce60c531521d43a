use clap::Args;
use miette::Result;
use std::path::PathBuf;

use crate::extract::convert_all;

#[derive(Args)]
pub struct ConvertArgs {
    /// Input rawimg files
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

impl ConvertArgs {
    pub fn handle(&self) -> Result<()> {
        convert_all(&self.files).into_result()?;
        Ok(())
    }
}
