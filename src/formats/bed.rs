use crate::Result;
use crate::types::MaskRun;
use std::io::Write;

/// Writes mask runs as BED3 lines (`chrom\tstart\tend`), no header or track line
pub struct BedWriter<W: Write> {
    inner: W,
    records: u64,
}

impl<W: Write> BedWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, records: 0 }
    }

    pub fn write_record(&mut self, run: &MaskRun) -> Result<()> {
        writeln!(self.inner, "{}", run)?;
        self.records += 1;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records
    }

    /// Flush and hand back the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
