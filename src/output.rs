use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::SecondsFormat;
use csv::Writer;

use crate::record::{Fields, Stamped};

/// Writes stamped readings as CSV lines: timestamp first, then the fields.
pub struct CsvOutput<W: Write> {
    writer: Writer<W>,
    header: bool,
}

impl<W: Write> CsvOutput<W> {
    /// With `header`, a header row is written before the first reading.
    pub fn new(writer: W, header: bool) -> Self {
        Self {
            writer: Writer::from_writer(writer),
            header,
        }
    }

    pub fn write<T: Fields>(&mut self, reading: &Stamped<T>) -> Result<()> {
        if self.header {
            let names = std::iter::once("timestamp").chain(reading.record.names());
            self.writer
                .write_record(names)
                .context("failed to write CSV header")?;
            self.header = false;
        }

        let timestamp = reading
            .measured_at
            .to_rfc3339_opts(SecondsFormat::Micros, false);
        self.writer
            .write_record(std::iter::once(timestamp).chain(reading.record.values()))
            .context("failed to write CSV record")?;

        // One line per reading, visible as soon as it is decoded.
        self.writer.flush().context("failed to flush output")?;

        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("failed to flush output: {}", e.error()))
    }
}
