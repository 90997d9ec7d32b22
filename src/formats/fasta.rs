use super::BedWriter;
use crate::types::MaskRun;
use crate::{Error, Result};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tracing::debug;

const HEADER_MARKER: char = '>';

/// Whether the scanner is currently inside a soft-masked run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum GapState {
    #[default]
    Outside,
    Inside {
        start: u64,
    },
}

/// Counters accumulated over one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    pub sequences: u64,
    pub runs: u64,
    pub masked_bases: u64,
    pub total_bases: u64,
}

impl ScanSummary {
    fn record(&mut self, run: &MaskRun) {
        self.runs += 1;
        self.masked_bases += run.len();
    }
}

/// Line-driven state machine that turns soft-masked FASTA into mask runs.
///
/// Feed it every line of the input in order with [`MaskScanner::scan_line`],
/// then call [`MaskScanner::finish`] to flush a run left open at end of input.
/// Line breaks inside a record neither reset the position nor close a run.
#[derive(Debug, Default)]
pub struct MaskScanner {
    chrom: Option<String>,
    position: u64,
    state: GapState,
    line_number: usize,
    summary: ScanSummary,
}

impl MaskScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one input line, pushing every run it closes onto `out`.
    pub fn scan_line(&mut self, line: &str, out: &mut Vec<MaskRun>) -> Result<()> {
        self.line_number += 1;
        let line = strip_line_terminator(line);

        if line.starts_with(HEADER_MARKER) {
            self.start_sequence(line, out)
        } else {
            self.scan_sequence(line, out)
        }
    }

    /// Process one raw input line.
    ///
    /// Sequence lines must be valid UTF-8. Header lines only need a valid
    /// name token, since the description after it is never used.
    pub fn scan_bytes(&mut self, line: &[u8], out: &mut Vec<MaskRun>) -> Result<()> {
        let err = match std::str::from_utf8(line) {
            Ok(text) => return self.scan_line(text, out),
            Err(err) => err,
        };

        let valid = std::str::from_utf8(&line[..err.valid_up_to()]).unwrap_or_default();
        if line.starts_with(b">") && valid.contains(char::is_whitespace) {
            return self.scan_line(valid, out);
        }

        self.line_number += 1;
        Err(Error::InvalidEncoding {
            line: self.line_number,
        })
    }

    /// Close a run still open at end of input.
    pub fn finish(&mut self) -> Option<MaskRun> {
        self.close_run()
    }

    pub fn summary(&self) -> ScanSummary {
        self.summary
    }

    fn start_sequence(&mut self, line: &str, out: &mut Vec<MaskRun>) -> Result<()> {
        // A run reaching the end of the previous record ends at its length.
        if let Some(run) = self.close_run() {
            out.push(run);
        }

        let name = parse_header_name(line).ok_or(Error::MissingSequenceName {
            line: self.line_number,
        })?;
        debug!(chrom = name, line = self.line_number, "scanning sequence");

        self.position = 0;
        self.chrom = Some(name.to_string());
        self.summary.sequences += 1;
        Ok(())
    }

    fn scan_sequence(&mut self, line: &str, out: &mut Vec<MaskRun>) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }
        let Some(chrom) = self.chrom.as_deref() else {
            return Err(Error::SequenceBeforeHeader {
                line: self.line_number,
            });
        };

        for c in line.chars() {
            match self.state {
                GapState::Outside if c.is_lowercase() => {
                    self.state = GapState::Inside {
                        start: self.position,
                    };
                }
                GapState::Inside { start } if c.is_uppercase() => {
                    let run = MaskRun::new(chrom, start, self.position);
                    self.summary.record(&run);
                    out.push(run);
                    self.state = GapState::Outside;
                }
                _ => {}
            }
            self.position += 1;
            self.summary.total_bases += 1;
        }
        Ok(())
    }

    fn close_run(&mut self) -> Option<MaskRun> {
        let GapState::Inside { start } = std::mem::take(&mut self.state) else {
            return None;
        };
        let run = MaskRun::new(self.chrom.clone()?, start, self.position);
        self.summary.record(&run);
        Some(run)
    }
}

/// Sequence name of a header line: its first whitespace-delimited token
/// with the leading `>` removed. `None` when that token is empty.
pub fn parse_header_name(line: &str) -> Option<&str> {
    line.split_whitespace()
        .next()?
        .strip_prefix(HEADER_MARKER)
        .filter(|name| !name.is_empty())
}

fn strip_line_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}

/// Streaming iterator over the mask runs of a FASTA reader.
///
/// Reads one line at a time and only buffers the runs that line closed, so
/// memory use is bounded by the longest line. After an error the iterator
/// first yields any runs completed before it, then the error, then stops.
pub struct MaskRuns<R> {
    reader: R,
    scanner: MaskScanner,
    buf: Vec<u8>,
    closed: Vec<MaskRun>,
    pending: VecDeque<MaskRun>,
    error: Option<Error>,
    done: bool,
}

impl<R: BufRead> MaskRuns<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            scanner: MaskScanner::new(),
            buf: Vec::new(),
            closed: Vec::new(),
            pending: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    pub fn summary(&self) -> ScanSummary {
        self.scanner.summary()
    }

    fn advance(&mut self) {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                self.pending.extend(self.scanner.finish());
            }
            Ok(_) => {
                let scanned = self.scanner.scan_bytes(&self.buf, &mut self.closed);
                self.pending.extend(self.closed.drain(..));
                if let Err(e) = scanned {
                    self.error = Some(e);
                    self.done = true;
                }
            }
            Err(e) => {
                self.error = Some(e.into());
                self.done = true;
            }
        }
    }
}

impl<R: BufRead> Iterator for MaskRuns<R> {
    type Item = Result<MaskRun>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(run) = self.pending.pop_front() {
                return Some(Ok(run));
            }
            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }
            if self.done {
                return None;
            }
            self.advance();
        }
    }
}

/// Scan `reader` and write every mask run as a BED3 line to `writer`.
///
/// Records are written as soon as their run closes; on a malformed input the
/// records completed so far have already been written when the error returns.
pub fn scan_masked_regions<R: BufRead, W: Write>(reader: R, writer: W) -> Result<ScanSummary> {
    let mut runs = MaskRuns::new(reader);
    let mut bed = BedWriter::new(writer);

    for run in runs.by_ref() {
        bed.write_record(&run?)?;
    }
    debug!(records = bed.records_written(), "finished writing BED");
    bed.finish()?;

    Ok(runs.summary())
}
