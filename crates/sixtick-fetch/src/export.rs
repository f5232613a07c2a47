//! Parsing of the exchange's semicolon-delimited market data export.
//!
//! The export layout is fixed:
//!
//! ```text
//! ABB LTD N (ABBN/CH0012221716)      <- header, identity in parentheses
//!           29.07.2014;               <- trading date in the first field
//!           Time;Price;Volume;        <- column names, skipped
//!           15:24:35;21.6;9010;       <- data rows, newest first
//!           15:23:03;21.52;5738;
//!                                     <- trailer, skipped
//! ```

use regex::Regex;
use sixtick_types::{ParseError, SecurityIdentity, SixtickError, TickRecord, TickSeries};
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum number of lines: header, date, column names and trailer.
const MIN_LINES: usize = 4;

/// Index of the first data row.
const FIRST_DATA_LINE: usize = 3;

static HEADER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn header_pattern() -> &'static Regex {
    HEADER_PATTERN.get_or_init(|| Regex::new(r"\((\w+)/(\w+)\)").expect("Invalid header pattern"))
}

/// Errors that can occur while parsing a raw export.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Fewer lines than the fixed layout requires.
    #[error("export has {0} lines (expected at least {MIN_LINES})")]
    TooShort(usize),

    /// The first line carries no `(SYMBOL/ISIN)` pair.
    #[error("no (SYMBOL/ISIN) pair in header \"{0}\"")]
    MissingHeader(String),

    /// A data row could not be parsed.
    #[error("line {line}: {source}")]
    Row {
        /// Zero-based line index in the export.
        line: usize,
        /// The underlying field error.
        source: ParseError,
    },
}

impl From<ExportError> for SixtickError {
    fn from(err: ExportError) -> Self {
        Self::MalformedExport(err.to_string())
    }
}

/// Parses a raw export into a tick series.
///
/// Data rows arrive newest first; the returned series is oldest first.
/// Columns beyond `time;price;volume` are ignored.
///
/// # Errors
///
/// Returns an [`ExportError`] if the layout does not match or any data row
/// fails to parse.
pub fn parse_export(raw: &str) -> Result<TickSeries, ExportError> {
    let lines: Vec<Vec<&str>> = raw.lines().map(|line| line.split(';').collect()).collect();
    if lines.len() < MIN_LINES {
        return Err(ExportError::TooShort(lines.len()));
    }

    let header = lines[0][0];
    let captures = header_pattern()
        .captures(header)
        .ok_or_else(|| ExportError::MissingHeader(header.to_string()))?;
    let identity = SecurityIdentity::new(&captures[1], &captures[2]);

    let date = lines[1][0].trim();

    let mut records = lines[FIRST_DATA_LINE..lines.len() - 1]
        .iter()
        .enumerate()
        .map(|(offset, fields)| {
            parse_row(date, fields).map_err(|source| ExportError::Row {
                line: FIRST_DATA_LINE + offset,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    records.reverse();

    Ok(TickSeries::new(identity, records))
}

/// Parses one `time;price;volume;...` row against the export's trading date.
fn parse_row(date: &str, fields: &[&str]) -> Result<TickRecord, ParseError> {
    let [time, price, volume, ..] = fields else {
        return Err(ParseError::MissingFields(fields.len()));
    };
    let datetime = format!("{date} {}", time.trim());
    TickRecord::from_fields(&datetime, price, volume)
}
