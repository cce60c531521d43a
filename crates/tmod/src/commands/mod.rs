pub mod convert;
pub mod extract;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Extract TMOD files into directories named after them
    Extract(extract::ExtractArgs),
    /// Convert rawimg files into PNG files next to them
    Convert(convert::ConvertArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Extract(extract) => extract.handle(),
            Commands::Convert(convert) => convert.handle(),
        }
    }
}
