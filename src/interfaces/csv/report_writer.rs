use crate::error::{ReservationError, Result};
use crate::interfaces::view::ReportRow;
use std::io::Write;

/// Writes the per-trip payment report as CSV.
///
/// Columns: `id,client,final_price,amount_paid,status,invoice,tag`.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    /// Creates a new `ReportWriter` over any `Write` sink (e.g. Stdout, File).
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().from_writer(sink);
        Self { writer }
    }

    /// Writes a header row followed by one row per reservation, then flushes.
    pub fn write_rows<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = ReportRow>,
    {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush().map_err(ReservationError::from)
    }
}
