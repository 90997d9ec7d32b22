//! Samplesheet validation and normalisation.
//!
//! A samplesheet is a delimited table with one genome assembly per row. The
//! validator sniffs the delimiter, picks a [`Schema`] from the header, checks
//! every row with a [`RowChecker`], and writes the accepted table back out
//! as comma-separated text with the original header.
//!
//! ```
//! use asmkit::samplesheet::Samplesheet;
//!
//! let text = "species_dir\tassembly_name\tensembl_species_name\tannotation_method\tgeneset_version\n\
//!             /data/Noctua_fimbriata\tilNocFimb1.1\tNoctua_fimbriata\tbraker\t2022_03\n";
//! let sheet = Samplesheet::parse(text, None)?;
//!
//! let mut out = Vec::new();
//! sheet.write_csv(&mut out)?;
//! assert!(String::from_utf8(out).unwrap().starts_with("species_dir,assembly_name,"));
//! # Ok::<(), asmkit::Error>(())
//! ```

mod checker;
mod sniff;

pub use checker::RowChecker;
pub use sniff::{Dialect, SNIFF_LINES, has_header, sniff, sniff_delimiter};

use crate::types::Schema;
use crate::{Error, Result};
use csv::StringRecord;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// A fully validated samplesheet
#[derive(Debug, Clone)]
pub struct Samplesheet {
    schema: Schema,
    header: StringRecord,
    rows: Vec<StringRecord>,
}

impl Samplesheet {
    /// Parse and validate a whole samplesheet.
    ///
    /// `schema` forces a layout; `None` picks one from the header. Stops at
    /// the first invalid row.
    pub fn parse(text: &str, schema: Option<Schema>) -> Result<Self> {
        let dialect = sniff(text)?;
        if !dialect.has_header {
            return Err(Error::MissingHeader);
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(dialect.delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let header = reader.headers()?.clone();
        let schema =
            schema.unwrap_or_else(|| Schema::detect(&header.iter().collect::<Vec<_>>()));
        debug!(
            delimiter = %char::from(dialect.delimiter).escape_default(),
            %schema,
            "sniffed samplesheet"
        );

        let mut checker = RowChecker::new(schema, &header)?;
        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map_or(i as u64 + 2, |position| position.line());
            checker.validate(&record, line)?;
            rows.push(record);
        }

        Ok(Self {
            schema,
            header,
            rows,
        })
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn header(&self) -> &StringRecord {
        &self.header
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Write the table as comma-separated text, short rows padded to the header width.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        writer.write_record(&self.header)?;
        for row in &self.rows {
            let padding = self.header.len().saturating_sub(row.len());
            writer.write_record(row.iter().chain(std::iter::repeat_n("", padding)))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Validate `file_in` and write the normalised table to `file_out`.
///
/// The output's parent directory is created if needed. Nothing is written
/// unless every row passes.
pub fn check_samplesheet(
    file_in: &Path,
    file_out: &Path,
    schema: Option<Schema>,
) -> Result<Samplesheet> {
    if !file_in.is_file() {
        return Err(Error::NotFound(file_in.to_path_buf()));
    }

    let text = fs::read_to_string(file_in)?;
    let sheet = Samplesheet::parse(&text, schema)?;

    if let Some(parent) = file_out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(file_out)?;
    sheet.write_csv(BufWriter::new(file))?;

    info!(
        rows = sheet.rows.len(),
        columns = sheet.header().len(),
        schema = %sheet.schema,
        output = %file_out.display(),
        "samplesheet validated"
    );
    Ok(sheet)
}
