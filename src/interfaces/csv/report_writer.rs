use crate::application::manager::CarTypeSummary;
use crate::error::Result;
use std::io::Write;

/// Writes the fleet report as CSV, one row per company and car type.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_summaries(&mut self, rows: impl IntoIterator<Item = CarTypeSummary>) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
