//! Integration tests for asmkit
//!
//! These tests use fixture files in tests/data/ and the built binaries.

use asmkit::formats::{MaskRuns, scan_masked_regions};
use asmkit::samplesheet::check_samplesheet;
use asmkit::{Error, MaskRun, Schema};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::{Command, Output};

const MASKED_BED: &str = "\
chr1\t4\t8
chr1\t12\t18
chrM\t4\t13
scaffold_7\t0\t10
";

fn test_data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn masking_to_bed(path: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_masking-to-bed"))
        .arg(path)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn check_samplesheet_bin(file_in: &PathBuf, file_out: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_check-samplesheet"))
        .arg(file_in)
        .arg(file_out)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_scan_fixture() {
    let file = File::open(test_data("masked.fa")).unwrap();
    let mut out = Vec::new();
    let summary = scan_masked_regions(BufReader::new(file), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), MASKED_BED);
    assert_eq!(summary.sequences, 4);
    assert_eq!(summary.runs, 4);
    assert_eq!(summary.masked_bases, 4 + 6 + 9 + 10);
}

#[test]
fn test_scan_fixture_runs_are_sorted_within_chrom() {
    let file = File::open(test_data("masked.fa")).unwrap();
    let runs: Vec<MaskRun> = MaskRuns::new(BufReader::new(file))
        .collect::<asmkit::Result<_>>()
        .unwrap();

    for pair in runs.windows(2) {
        if pair[0].chrom == pair[1].chrom {
            // maximal runs never touch
            assert!(pair[0].end < pair[1].start);
        }
    }
}

#[test]
fn test_masking_to_bed_binary() {
    let output = masking_to_bed(&test_data("masked.fa"));
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), MASKED_BED);
}

#[test]
fn test_masking_to_bed_rejects_headerless_input() {
    let output = masking_to_bed(&test_data("headerless.fa"));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 1"), "stderr: {stderr}");
    assert!(stderr.contains("before any '>' header"), "stderr: {stderr}");
}

#[test]
fn test_masking_to_bed_missing_file() {
    let output = masking_to_bed(&test_data("does_not_exist.fa"));
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to open"), "stderr: {stderr}");
}

#[test]
fn test_masking_to_bed_keeps_runs_before_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_header.fa");
    std::fs::write(&path, ">s\nAAacAA\nAc\n>\nACGT\n").unwrap();

    let output = masking_to_bed(&path);
    assert!(!output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "s\t2\t4\ns\t7\t8\n");
}

#[test]
fn test_check_samplesheet_tsv() {
    let dir = tempfile::tempdir().unwrap();
    let file_out = dir.path().join("nested/out/samplesheet.valid.csv");

    let sheet = check_samplesheet(&test_data("samplesheet.tsv"), &file_out, None).unwrap();
    assert_eq!(sheet.schema(), Schema::Current);
    assert_eq!(sheet.rows().len(), 2);

    let written = std::fs::read_to_string(&file_out).unwrap();
    assert_eq!(
        written,
        "species_dir,assembly_name,ensembl_species_name,annotation_method,geneset_version\n\
         /data/insects/Noctua_fimbriata,ilNocFimb1.1,Noctua_fimbriata,braker,2022_03\n\
         /data/echinoderms/Asterias_rubens,eAstRub1.3,Asterias_rubens,ensembl,\n"
    );
}

#[test]
fn test_check_samplesheet_bad_accession() {
    let dir = tempfile::tempdir().unwrap();
    let file_out = dir.path().join("out.csv");

    let err = check_samplesheet(&test_data("samplesheet_bad_accession.csv"), &file_out, None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRow { line: 3, .. }));
    assert!(!file_out.exists());
}

#[test]
fn test_check_samplesheet_binary_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let file_out = dir.path().join("out.csv");

    let output = check_samplesheet_bin(&test_data("samplesheet.tsv"), &file_out);
    assert!(output.status.success());
    assert!(file_out.exists());

    let output = check_samplesheet_bin(&test_data("samplesheet_bad_accession.csv"), &file_out);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("On line 3."), "stderr: {stderr}");

    let output = check_samplesheet_bin(&test_data("missing.csv"), &file_out);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_errors_reach_stderr_with_logging_off() {
    let output = Command::new(env!("CARGO_BIN_EXE_masking-to-bed"))
        .arg(test_data("headerless.fa"))
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 1: sequence data found before any '>' header"), "stderr: {stderr}");

    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_check-samplesheet"))
        .arg(test_data("samplesheet_bad_accession.csv"))
        .arg(dir.path().join("out.csv"))
        .args(["--log-level", "off"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("On line 3."), "stderr: {stderr}");
}

#[test]
fn test_masking_to_bed_non_utf8_input() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("latin1_header.fa");
    std::fs::write(&path, b">chr1 M\xfcller\nACgt\n").unwrap();
    let output = masking_to_bed(&path);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "chr1\t2\t4\n");

    let path = dir.path().join("latin1_sequence.fa");
    std::fs::write(&path, b">chr1\nACgtA\nAC\xfcgt\n").unwrap();
    let output = masking_to_bed(&path);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "chr1\t2\t4\n");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 3: invalid UTF-8"), "stderr: {stderr}");
    // the cause is printed once
    assert_eq!(stderr.matches("invalid UTF-8").count(), 1, "stderr: {stderr}");
}
