use crate::types::Schema;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("line {line}: sequence data found before any '>' header")]
    SequenceBeforeHeader { line: usize },

    #[error("line {line}: header has no sequence name")]
    MissingSequenceName { line: usize },

    #[error("line {line}: invalid UTF-8")]
    InvalidEncoding { line: usize },

    #[error("the given samplesheet does not appear to contain a header")]
    MissingHeader,

    #[error("the {schema} samplesheet must contain the column headers: {}", .missing.join(", "))]
    MissingColumns {
        schema: Schema,
        missing: Vec<&'static str>,
    },

    #[error("{message} On line {line}.")]
    InvalidRow { line: u64, message: String },

    #[error("duplicate entry ({key}) on line {line}, first seen on line {first_line}")]
    DuplicateRow {
        line: u64,
        first_line: u64,
        key: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NotFound(_) => 2,
            _ => 1,
        }
    }
}
