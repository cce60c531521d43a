//! Logging setup for the command line tool

use std::io::IsTerminal;

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// How log lines are written to stderr
#[derive(ValueEnum, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One short line per event
    #[default]
    Compact,

    /// One JSON object per event
    Json,
}

/// Level used when `RUST_LOG` is not set
pub fn default_level(quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `quiet`.
pub fn init(format: LogFormat, quiet: bool) -> Result<()> {
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let fmt = match format {
        LogFormat::Compact => fmt
            .with_ansi(std::io::stderr().is_terminal())
            .with_file(true)
            .with_line_number(true)
            .without_time()
            .compact()
            .boxed(),
        LogFormat::Json => fmt.json().with_ansi(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt)
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level(quiet).into())
                .from_env_lossy(),
        )
        .try_init()
        .into_diagnostic()
}
