use serde::{Deserialize, Serialize};
use std::fmt;

/// A maximal run of soft-masked (lowercase) bases in one sequence.
///
/// Coordinates are BED-style: `start` is 0-based inclusive, `end` is
/// 0-based exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskRun {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl MaskRun {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Renders the run as a BED3 line (without the trailing newline).
impl fmt::Display for MaskRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.end)
    }
}

pub const ASSEMBLY_ACCESSION: &str = "assembly_accession";
pub const ASSEMBLY_NAME: &str = "assembly_name";
pub const SPECIES_DIR: &str = "species_dir";
pub const ENSEMBL_SPECIES_NAME: &str = "ensembl_species_name";
pub const ANNOTATION_METHOD: &str = "annotation_method";
pub const GENESET_VERSION: &str = "geneset_version";

/// Samplesheet layouts accepted by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    #[default]
    Current,
    /// Older sheets keyed on the GenBank assembly accession.
    Legacy,
}

impl Schema {
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Schema::Current => &[
                SPECIES_DIR,
                ASSEMBLY_NAME,
                ENSEMBL_SPECIES_NAME,
                ANNOTATION_METHOD,
                GENESET_VERSION,
            ],
            Schema::Legacy => &[
                ASSEMBLY_ACCESSION,
                ASSEMBLY_NAME,
                SPECIES_DIR,
                ENSEMBL_SPECIES_NAME,
                GENESET_VERSION,
            ],
        }
    }

    /// Columns whose combined values must be unique across all rows.
    pub fn key_columns(&self) -> &'static [&'static str] {
        match self {
            Schema::Current => &[ASSEMBLY_NAME, GENESET_VERSION],
            Schema::Legacy => &[ASSEMBLY_ACCESSION, GENESET_VERSION],
        }
    }

    /// Pick the schema implied by a header row.
    pub fn detect<S: AsRef<str>>(header: &[S]) -> Self {
        if header.iter().any(|h| h.as_ref() == ASSEMBLY_ACCESSION) {
            Schema::Legacy
        } else {
            Schema::Current
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Current => f.write_str("current"),
            Schema::Legacy => f.write_str("legacy"),
        }
    }
}
