use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use asmkit::{
    config::{MaskToBedConfig, init_tracing},
    formats::scan_masked_regions,
};

fn main() -> ExitCode {
    let config = MaskToBedConfig::parse();
    init_tracing(&config.log_level);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<asmkit::Error>()
                .map_or(1, asmkit::Error::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(config: &MaskToBedConfig) -> anyhow::Result<()> {
    let file = File::open(&config.fasta)
        .with_context(|| format!("failed to open {}", config.fasta.display()))?;

    let stdout = io::stdout().lock();
    let summary = scan_masked_regions(BufReader::new(file), BufWriter::new(stdout))
        .with_context(|| format!("failed to scan {}", config.fasta.display()))?;

    tracing::info!(
        sequences = summary.sequences,
        intervals = summary.runs,
        masked_bases = summary.masked_bases,
        total_bases = summary.total_bases,
        "wrote masked regions of {:?}",
        config.fasta
    );
    if summary.sequences == 0 {
        tracing::warn!("no FASTA records found in {:?}", config.fasta);
    }

    Ok(())
}
