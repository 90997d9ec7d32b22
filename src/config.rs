use crate::types::Schema;
use clap::{Parser, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor `--log-level` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Parser)]
#[command(name = "masking-to-bed")]
#[command(about = "Write the soft-masked (lowercase) regions of a FASTA file as BED intervals")]
pub struct MaskToBedConfig {
    /// FASTA file to scan
    #[arg(value_name = "FASTA")]
    pub fasta: PathBuf,

    /// Log level (trace, debug, info, warn, error); logs go to stderr
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "check-samplesheet")]
#[command(about = "Validate and transform a tabular samplesheet")]
#[command(after_help = "Example: check-samplesheet samplesheet.csv samplesheet.valid.csv")]
pub struct SamplesheetConfig {
    /// Tabular input samplesheet in CSV or TSV format
    #[arg(value_name = "FILE_IN")]
    pub file_in: PathBuf,

    /// Transformed output samplesheet in CSV format
    #[arg(value_name = "FILE_OUT")]
    pub file_out: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Samplesheet layout to enforce
    #[arg(long, value_enum, default_value_t = SchemaChoice::Auto)]
    pub schema: SchemaChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaChoice {
    /// Legacy if the header has `assembly_accession`, current otherwise
    Auto,
    Current,
    Legacy,
}

impl SchemaChoice {
    pub fn schema(self) -> Option<Schema> {
        match self {
            SchemaChoice::Auto => None,
            SchemaChoice::Current => Some(Schema::Current),
            SchemaChoice::Legacy => Some(Schema::Legacy),
        }
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` directives win when they parse; otherwise `log_level` is used.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}
