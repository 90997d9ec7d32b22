//! Sequence and interval formats.
//!
//! - [`MaskRuns`] / [`MaskScanner`] - find soft-masked (lowercase) runs in FASTA
//! - [`BedWriter`] - write runs as BED3 intervals
//!
//! # Coordinates
//!
//! Positions count sequence characters from 0 within each FASTA record.
//! Emitted intervals are half-open `[start, end)`, as BED expects, so a
//! fully lowercase record of length `L` yields `(name, 0, L)`.

mod bed;
mod fasta;

pub use bed::BedWriter;
pub use fasta::{MaskRuns, MaskScanner, ScanSummary, parse_header_name, scan_masked_regions};
