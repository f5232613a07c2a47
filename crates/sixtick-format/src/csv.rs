//! Semicolon-delimited CSV codec.

use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};
use sixtick_types::{SecurityIdentity, TickRecord, TickSeries, parse_tick_datetime};
use std::io::{Read, Write};

use crate::{Codec, Existing, FormatError};

/// CSV codec.
///
/// Files carry no header and no identity: one `datetime;price;volume` record
/// per line. Appending writes only the new rows, so stored rows are never
/// re-emitted.
#[derive(Debug, Clone, Copy)]
pub struct CsvCodec {
    /// Field delimiter (default: semicolon).
    delimiter: u8,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvCodec {
    /// Creates a new CSV codec with the default `;` delimiter.
    #[must_use]
    pub const fn new() -> Self {
        Self { delimiter: b';' }
    }
}

impl Codec for CsvCodec {
    fn write<W: Write>(
        &self,
        series: &TickSeries,
        existing: &Existing,
        writer: W,
    ) -> Result<(), FormatError> {
        debug_assert!(
            existing.rows.is_empty(),
            "CSV appends in place and never re-emits stored rows"
        );

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        for row in series.encoded_rows(existing.watermark) {
            writer.serialize(&row)?;
        }
        writer.flush()?;

        Ok(())
    }

    fn peek<R: Read>(&self, mut reader: R) -> Result<Existing, FormatError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| FormatError::Broken(e.to_string()))?;

        let Some(last_line) = content.lines().rev().find(|line| !line.trim().is_empty()) else {
            return Ok(Existing::none());
        };

        let delimiter = char::from(self.delimiter);
        let first_field = last_line.split(delimiter).next().unwrap_or_default();
        let watermark = parse_tick_datetime(first_field.trim())
            .map_err(|e| FormatError::Broken(e.to_string()))?;

        Ok(Existing {
            watermark,
            rows: Vec::new(),
        })
    }

    fn read<R: Read>(&self, reader: R) -> Result<TickSeries, FormatError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| FormatError::Broken(e.to_string()))?;
            let line = index + 1;
            if record.len() < 3 {
                return Err(FormatError::Broken(format!(
                    "line {line}: {} fields (expected at least 3)",
                    record.len()
                )));
            }
            let tick = TickRecord::from_fields(&record[0], &record[1], &record[2])
                .map_err(|e| FormatError::Broken(format!("line {line}: {e}")))?;
            records.push(tick);
        }

        Ok(TickSeries::new(SecurityIdentity::unresolved(), records))
    }

    fn appends_in_place(&self) -> bool {
        true
    }
}
