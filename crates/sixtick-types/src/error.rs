//! Error types for sixtick.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sixtick operations.
pub type Result<T> = std::result::Result<T, SixtickError>;

/// Errors that can occur while fetching, converting and storing tick data.
///
/// Every variant except [`SixtickError::Store`] is scoped to the single
/// security being processed; see [`SixtickError::is_fatal`].
#[derive(Error, Debug)]
pub enum SixtickError {
    /// A numeric or datetime field could not be coerced.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The raw exchange export does not have the expected layout.
    #[error("Malformed export: {0}")]
    MalformedExport(String),

    /// An existing file is unreadable in its declared format.
    #[error("File {} format is broken: {reason}", .path.display())]
    BrokenFile {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A strict-mode write found the destination already present.
    #[error("File {} already exists. Use --append or --overwrite.", .0.display())]
    DestinationExists(PathBuf),

    /// A range boundary matched none of the accepted formats.
    #[error("Can't parse \"{0}\" into datetime.")]
    UnrecognizedDatetime(String),

    /// A range whose start lies after its end.
    #[error("Invalid time range: {from} > {to}")]
    InvalidRange {
        /// Range start.
        from: NaiveDateTime,
        /// Range end.
        to: NaiveDateTime,
    },

    /// Neither the exchange nor the watchlist knows the security.
    #[error("Security {0} is not found.")]
    SecurityNotFound(String),

    /// The security is already on the watchlist.
    #[error("Security {0} is already on the watchlist.")]
    AlreadyTracked(String),

    /// The securities are not on the watchlist.
    #[error("Securities {0} are not on the watchlist.")]
    NotTracked(String),

    /// A file series carries no identity and none could be guessed.
    #[error("Can't guess security for {}. Use --as to specify.", .0.display())]
    UnresolvedIdentity(PathBuf),

    /// A file has an extension no codec handles.
    #[error(
        "Don't know how to read *.{0} files. Try specifying the format explicitly with --csv or --json."
    )]
    UnknownFormat(String),

    /// An input file does not exist.
    #[error("File {} not found.", .0.display())]
    FileNotFound(PathBuf),

    /// The exchange could not be reached after all retries.
    #[error("Failed to connect to {0}.")]
    Connectivity(String),

    /// The exchange answered with an error status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The persistent store failed or is unreachable.
    #[error("Problem with database: {0}")]
    Store(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SixtickError {
    /// Returns true if the error must abort a whole batch rather than a
    /// single security.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Errors from coercing a raw field into a typed tick value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Datetime not in `DD.MM.YYYY HH:MM:SS` form.
    #[error("Invalid datetime \"{input}\" (expected DD.MM.YYYY HH:MM:SS)")]
    Datetime {
        /// The rejected input.
        input: String,
    },

    /// Price is not a valid float literal.
    #[error("Invalid price \"{0}\"")]
    Price(String),

    /// Volume is not a valid integer literal.
    #[error("Invalid volume \"{0}\"")]
    Volume(String),

    /// A row with fewer than three fields.
    #[error("Row has {0} fields (expected at least 3)")]
    MissingFields(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_store_errors_are_fatal() {
        assert!(SixtickError::Store("locked".into()).is_fatal());
        assert!(!SixtickError::SecurityNotFound("XXXX".into()).is_fatal());
        assert!(!SixtickError::Connectivity("http://example.com".into()).is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = SixtickError::DestinationExists(PathBuf::from("ABBN.json"));
        assert_eq!(
            err.to_string(),
            "File ABBN.json already exists. Use --append or --overwrite."
        );

        let err = SixtickError::UnrecognizedDatetime("yesterday".into());
        assert_eq!(err.to_string(), "Can't parse \"yesterday\" into datetime.");
    }
}
