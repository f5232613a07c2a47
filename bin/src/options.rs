//! Argument groups shared between subcommands.

use clap::Args;
use sixtick_lib::prelude::*;

/// Output format selection, one of `--csv` / `--json` required.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub(crate) struct FormatArgs {
    /// Write CSV
    #[arg(long)]
    csv: bool,

    /// Write JSON
    #[arg(long)]
    json: bool,
}

impl FormatArgs {
    pub(crate) const fn format(self) -> Format {
        if self.json { Format::Json } else { Format::Csv }
    }
}

/// Input format override. Without it the file extension decides.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub(crate) struct FormatHint {
    /// Read CSV regardless of the file extension
    #[arg(long)]
    csv: bool,

    /// Read JSON regardless of the file extension
    #[arg(long)]
    json: bool,
}

impl FormatHint {
    pub(crate) const fn format(self) -> Option<Format> {
        match (self.csv, self.json) {
            (true, _) => Some(Format::Csv),
            (_, true) => Some(Format::Json),
            _ => None,
        }
    }
}

/// Where output goes and what happens if it is already there.
#[derive(Args, Debug, Clone)]
pub(crate) struct OutputArgs {
    /// Append data to the target file if it exists
    #[arg(short, long, conflicts_with = "overwrite")]
    append: bool,

    /// Overwrite the target file if it exists
    #[arg(long)]
    overwrite: bool,

    /// Target file, defaults to <SYMBOL>.csv or <SYMBOL>.json. Use "-" for stdout.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<String>,
}

impl OutputArgs {
    pub(crate) const fn mode(&self) -> WriteMode {
        WriteMode::from_flags(self.append, self.overwrite)
    }

    pub(crate) fn destination(&self, symbol: &str, format: Format) -> Destination {
        Destination::from_arg(self.file.as_deref(), symbol, format)
    }
}

/// Optional time bounds, both inclusive.
///
/// Accepted forms: `DD.MM.YYYY`, `DD.MM.YYYY HH:MM`, `DD.MM.YYYY HH:MM:SS`,
/// `DD.MM.YYYYTHH:MM` and `DD.MM.YYYYTHH:MM:SS`.
#[derive(Args, Debug, Clone)]
pub(crate) struct RangeArgs {
    /// Start range from this datetime
    #[arg(long, value_name = "DATETIME")]
    from: Option<String>,

    /// End range with this datetime
    #[arg(long, value_name = "DATETIME")]
    to: Option<String>,
}

impl RangeArgs {
    pub(crate) fn range(&self) -> Result<TimeRange> {
        TimeRange::parse(self.from.as_deref(), self.to.as_deref())
    }
}
