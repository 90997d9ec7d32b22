use crate::types::{
    ANNOTATION_METHOD, ASSEMBLY_ACCESSION, ASSEMBLY_NAME, ENSEMBL_SPECIES_NAME, GENESET_VERSION,
    SPECIES_DIR, Schema,
};
use crate::{Error, Result};
use csv::StringRecord;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static ACCESSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^GCA_[0-9]{9}\.[0-9]+$").expect("valid accession pattern"));

static GENESET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^20[0-9]{2}_[01][0-9]$").expect("valid geneset pattern"));

/// Validates samplesheet rows one at a time and tracks key uniqueness.
pub struct RowChecker {
    schema: Schema,
    columns: HashMap<&'static str, usize>,
    width: usize,
    seen: HashMap<Vec<String>, u64>,
}

impl RowChecker {
    /// Build a checker for `header`, failing if any required column is absent.
    pub fn new(schema: Schema, header: &StringRecord) -> Result<Self> {
        let mut columns = HashMap::new();
        let mut missing = Vec::new();

        for &name in schema.required_columns() {
            match header.iter().position(|h| h == name) {
                Some(idx) => {
                    columns.insert(name, idx);
                }
                None => missing.push(name),
            }
        }

        if !missing.is_empty() {
            return Err(Error::MissingColumns { schema, missing });
        }

        Ok(Self {
            schema,
            columns,
            width: header.len(),
            seen: HashMap::new(),
        })
    }

    /// Check one row; `line` is its 1-based line number in the input.
    pub fn validate(&mut self, record: &StringRecord, line: u64) -> Result<()> {
        let invalid = |message: String| Error::InvalidRow { line, message };

        if record.len() > self.width {
            return Err(invalid(format!(
                "Row has {} fields but the header has {}.",
                record.len(),
                self.width
            )));
        }

        if self.schema == Schema::Legacy {
            self.check_accession(record).map_err(invalid)?;
        }
        self.check_assembly_name(record).map_err(invalid)?;
        self.check_species_dir(record).map_err(invalid)?;
        self.check_ensembl_name(record).map_err(invalid)?;
        if self.schema == Schema::Current {
            self.check_annotation_method(record).map_err(invalid)?;
        }
        self.check_geneset(record).map_err(invalid)?;

        self.check_unique(record, line)
    }

    fn field<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.columns
            .get(column)
            .and_then(|&idx| record.get(idx))
            .unwrap_or("")
    }

    fn check_accession(&self, record: &StringRecord) -> std::result::Result<(), String> {
        let accession = self.field(record, ASSEMBLY_ACCESSION);
        required(accession, "Accession number")?;
        if !ACCESSION_PATTERN.is_match(accession) {
            return Err(format!(
                "Accession numbers must match {}.",
                ACCESSION_PATTERN.as_str()
            ));
        }
        Ok(())
    }

    fn check_assembly_name(&self, record: &StringRecord) -> std::result::Result<(), String> {
        let name = self.field(record, ASSEMBLY_NAME);
        required(name, "Assembly name")?;
        no_whitespace(name, "Assembly name")
    }

    fn check_species_dir(&self, record: &StringRecord) -> std::result::Result<(), String> {
        required(self.field(record, SPECIES_DIR), "Species directory")
    }

    fn check_ensembl_name(&self, record: &StringRecord) -> std::result::Result<(), String> {
        let name = self.field(record, ENSEMBL_SPECIES_NAME);
        required(name, "Ensembl name")?;
        no_whitespace(name, "Ensembl name")
    }

    fn check_annotation_method(&self, record: &StringRecord) -> std::result::Result<(), String> {
        let method = self.field(record, ANNOTATION_METHOD);
        required(method, "Annotation method")?;
        no_whitespace(method, "Annotation method")
    }

    /// Empty geneset versions are allowed.
    fn check_geneset(&self, record: &StringRecord) -> std::result::Result<(), String> {
        let version = self.field(record, GENESET_VERSION);
        if !version.is_empty() && !GENESET_PATTERN.is_match(version) {
            return Err(format!(
                "Geneset versions must match {}.",
                GENESET_PATTERN.as_str()
            ));
        }
        Ok(())
    }

    fn check_unique(&mut self, record: &StringRecord, line: u64) -> Result<()> {
        let key_columns = self.schema.key_columns();
        let key: Vec<String> = key_columns
            .iter()
            .map(|column| self.field(record, column).to_string())
            .collect();

        if let Some(&first_line) = self.seen.get(&key) {
            let key = key_columns
                .iter()
                .zip(&key)
                .map(|(column, value)| format!("{}={}", column, value))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::DuplicateRow {
                line,
                first_line,
                key,
            });
        }

        self.seen.insert(key, line);
        Ok(())
    }
}

fn required(value: &str, what: &str) -> std::result::Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} is required.", what));
    }
    Ok(())
}

fn no_whitespace(value: &str, what: &str) -> std::result::Result<(), String> {
    if value.chars().any(char::is_whitespace) {
        return Err(format!("{} must not contain whitespace.", what));
    }
    Ok(())
}
