//! Codec abstraction shared by the file formats.

use chrono::NaiveDateTime;
use sixtick_types::{EPOCH, EncodedRow, SixtickError, TickSeries};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

use crate::{CsvCodec, JsonCodec};

/// File format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Semicolon-delimited `datetime;price;volume` lines.
    #[default]
    Csv,
    /// A single `{symbol, isin, ticks}` object.
    Json,
}

impl Format {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownFormat`] carrying the extension (empty
    /// if there is none) when no codec handles it.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur while encoding or decoding a series.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown file format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Existing content does not parse in the declared format.
    #[error("{0}")]
    Broken(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<FormatError> for SixtickError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::UnknownFormat(ext) => Self::UnknownFormat(ext),
            FormatError::Io(e) => Self::Io(e),
            other => Self::Io(std::io::Error::other(other.to_string())),
        }
    }
}

/// What a destination already holds, as learned by [`Codec::peek`].
#[derive(Debug, Clone, PartialEq)]
pub struct Existing {
    /// Timestamp of the last stored record, or [`EPOCH`] if there is none.
    pub watermark: NaiveDateTime,
    /// Stored rows a rewriting codec must re-emit ahead of new ones.
    ///
    /// Always empty for codecs that append in place.
    pub rows: Vec<EncodedRow>,
}

impl Existing {
    /// An empty or absent destination.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            watermark: EPOCH,
            rows: Vec::new(),
        }
    }
}

impl Default for Existing {
    fn default() -> Self {
        Self::none()
    }
}

/// A tick series file codec.
pub trait Codec {
    /// Writes every record of `series` newer than `existing.watermark`,
    /// preceded by `existing.rows` for codecs that rewrite the whole file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn write<W: Write>(
        &self,
        series: &TickSeries,
        existing: &Existing,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Learns the watermark (and, for rewriting codecs, the stored rows)
    /// without building a full series.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Broken`] if the content does not parse.
    fn peek<R: Read>(&self, reader: R) -> Result<Existing, FormatError>;

    /// Reads a complete series.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Broken`] if the content does not parse.
    fn read<R: Read>(&self, reader: R) -> Result<TickSeries, FormatError>;

    /// Returns true if new rows are physically appended to an existing
    /// file rather than the file being rewritten.
    fn appends_in_place(&self) -> bool;
}

impl Codec for Format {
    fn write<W: Write>(
        &self,
        series: &TickSeries,
        existing: &Existing,
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvCodec::new().write(series, existing, writer),
            Self::Json => JsonCodec::new().write(series, existing, writer),
        }
    }

    fn peek<R: Read>(&self, reader: R) -> Result<Existing, FormatError> {
        match self {
            Self::Csv => CsvCodec::new().peek(reader),
            Self::Json => JsonCodec::new().peek(reader),
        }
    }

    fn read<R: Read>(&self, reader: R) -> Result<TickSeries, FormatError> {
        match self {
            Self::Csv => CsvCodec::new().read(reader),
            Self::Json => JsonCodec::new().read(reader),
        }
    }

    fn appends_in_place(&self) -> bool {
        matches!(self, Self::Csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert!(matches!(
            "xls".parse::<Format>(),
            Err(FormatError::UnknownFormat(ref s)) if s == "xls"
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("data/ABBN.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("ABBN.csv")).unwrap(), Format::Csv);
        assert!(Format::from_path(Path::new("ABBN")).is_err());
    }

    #[test]
    fn test_existing_none() {
        let existing = Existing::none();
        assert_eq!(existing.watermark, EPOCH);
        assert!(existing.rows.is_empty());
    }

    #[test]
    fn test_only_csv_appends_in_place() {
        assert!(Format::Csv.appends_in_place());
        assert!(!Format::Json.appends_in_place());
    }
}
