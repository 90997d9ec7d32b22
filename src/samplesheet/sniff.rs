use crate::Result;
use std::collections::HashSet;

/// Number of leading lines inspected when guessing the layout.
pub const SNIFF_LINES: usize = 10;

/// Delimiters tried, in order of preference.
const CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Detected layout of a delimited text table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub has_header: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

/// Guess the delimiter and header presence from the first [`SNIFF_LINES`] lines.
pub fn sniff(text: &str) -> Result<Dialect> {
    let head: Vec<&str> = text
        .lines()
        .take(SNIFF_LINES)
        .filter(|line| !line.trim().is_empty())
        .collect();

    let delimiter = sniff_delimiter(&head).unwrap_or(b',');
    let has_header = has_header(&head, delimiter)?;

    Ok(Dialect {
        delimiter,
        has_header,
    })
}

/// A delimiter wins if it appears in the first line and the same number of
/// times on every sampled line. Without a consistent candidate, the one most
/// frequent in the first line is used.
pub fn sniff_delimiter(lines: &[&str]) -> Option<u8> {
    let first = lines.first()?;
    let count = |line: &str, delim: u8| line.bytes().filter(|&b| b == delim).count();

    let consistent = CANDIDATES.iter().copied().find(|&delim| {
        let expected = count(first, delim);
        expected > 0 && lines.iter().all(|line| count(line, delim) == expected)
    });

    consistent.or_else(|| {
        CANDIDATES
            .iter()
            .copied()
            .map(|delim| (delim, count(first, delim)))
            .filter(|&(_, n)| n > 0)
            // max_by_key keeps the last maximum; reverse so ties favour preference order
            .rev()
            .max_by_key(|&(_, n)| n)
            .map(|(delim, _)| delim)
    })
}

/// The first row reads as a header when every cell is non-empty, distinct,
/// and not a number.
pub fn has_header(lines: &[&str], delimiter: u8) -> Result<bool> {
    let Some(first) = lines.first() else {
        return Ok(false);
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_reader(first.as_bytes());

    let Some(record) = reader.records().next().transpose()? else {
        return Ok(false);
    };

    let mut seen = HashSet::new();
    Ok(record.iter().all(|cell| {
        let cell = cell.trim();
        !cell.is_empty() && cell.parse::<f64>().is_err() && seen.insert(cell)
    }))
}
