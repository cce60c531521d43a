use clap::Parser;
use miette::Result;
use tmod::{commands::Commands, logs::LogFormat};

/// Extract TMOD mod archives and convert the raw images inside them
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log line format
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    better_panic::install();

    let cli = Cli::parse();
    tmod::logs::init(cli.log_format, cli.quiet)?;

    cli.command.handle()
}
