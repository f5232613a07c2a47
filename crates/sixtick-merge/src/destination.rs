//! Where a series goes and how collisions are handled.

use sixtick_format::Format;
use std::path::{Path, PathBuf};

/// Policy for a file destination that may already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WriteMode {
    /// Refuse to touch an existing file.
    #[default]
    Strict,
    /// Keep existing records and add only newer ones.
    Append,
    /// Replace the file completely.
    Overwrite,
}

impl WriteMode {
    /// Selects the mode from the `--append` / `--overwrite` flags.
    ///
    /// The flags are mutually exclusive on the command line; `append` wins
    /// if both are somehow set.
    #[must_use]
    pub const fn from_flags(append: bool, overwrite: bool) -> Self {
        if append {
            Self::Append
        } else if overwrite {
            Self::Overwrite
        } else {
            Self::Strict
        }
    }
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Strict => "strict",
            Self::Append => "append",
            Self::Overwrite => "overwrite",
        };
        f.write_str(name)
    }
}

/// Target of a file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output. Always receives the full series.
    Stdout,
    /// A file on disk.
    File(PathBuf),
}

impl Destination {
    /// Marker selecting standard output.
    pub const STDOUT_MARKER: &'static str = "-";

    /// Interprets a `-f` argument, falling back to `<stem>.<ext>`.
    #[must_use]
    pub fn from_arg(arg: Option<&str>, stem: &str, format: Format) -> Self {
        match arg {
            Some(Self::STDOUT_MARKER) => Self::Stdout,
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::File(PathBuf::from(format!("{stem}.{}", format.extension()))),
        }
    }

    /// Returns the file path, or `None` for stdout.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdout => None,
            Self::File(path) => Some(path),
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(WriteMode::from_flags(false, false), WriteMode::Strict);
        assert_eq!(WriteMode::from_flags(true, false), WriteMode::Append);
        assert_eq!(WriteMode::from_flags(false, true), WriteMode::Overwrite);
    }

    #[test]
    fn test_destination_from_arg() {
        assert_eq!(
            Destination::from_arg(Some("-"), "ABBN", Format::Csv),
            Destination::Stdout
        );
        assert_eq!(
            Destination::from_arg(Some("out/abb.json"), "ABBN", Format::Json),
            Destination::File(PathBuf::from("out/abb.json"))
        );
        assert_eq!(
            Destination::from_arg(None, "ABBN", Format::Json),
            Destination::File(PathBuf::from("ABBN.json"))
        );
    }

    #[test]
    fn test_destination_path() {
        assert!(Destination::Stdout.path().is_none());
        let dest = Destination::from_arg(None, "NESN", Format::Csv);
        assert_eq!(dest.path(), Some(Path::new("NESN.csv")));
        assert_eq!(dest.to_string(), "NESN.csv");
    }
}
