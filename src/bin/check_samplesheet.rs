use clap::Parser;
use std::process::ExitCode;

use asmkit::{
    config::{SamplesheetConfig, init_tracing},
    samplesheet::check_samplesheet,
};

fn main() -> ExitCode {
    let config = SamplesheetConfig::parse();
    init_tracing(&config.log_level);

    match check_samplesheet(&config.file_in, &config.file_out, config.schema.schema()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
