//! File and stdout destinations.

use sixtick_format::{Codec, Existing, FormatError};
use sixtick_types::{SixtickError, TickSeries};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::{Destination, WriteMode};

/// Writes `series` to `destination` and returns how many records were
/// written.
///
/// - Stdout always receives the full series, whatever the mode.
/// - [`WriteMode::Strict`] fails if the file exists.
/// - [`WriteMode::Overwrite`] truncates the file.
/// - [`WriteMode::Append`] peeks the file for its watermark and writes only
///   newer records. Codecs that append in place extend the file; others
///   rewrite it with the stored rows first. When nothing is newer the file
///   is left untouched.
///
/// Strict and overwrite writes happen even for an empty series: the file
/// is created (or truncated) and holds no records, e.g. an empty CSV file
/// or a JSON document with an empty `ticks` list.
///
/// # Errors
///
/// Returns [`SixtickError::DestinationExists`] on a strict collision,
/// [`SixtickError::BrokenFile`] if an appended-to file does not parse, or an
/// I/O error.
pub fn save_to_file<C: Codec>(
    codec: &C,
    series: &TickSeries,
    destination: &Destination,
    mode: WriteMode,
) -> Result<usize, SixtickError> {
    save_to(codec, series, destination, mode, || io::stdout().lock())
}

fn save_to<C: Codec, W: Write>(
    codec: &C,
    series: &TickSeries,
    destination: &Destination,
    mode: WriteMode,
    stdout: impl FnOnce() -> W,
) -> Result<usize, SixtickError> {
    match destination {
        Destination::Stdout => write_full(codec, series, stdout()),
        Destination::File(path) => save_to_path(codec, series, path, mode),
    }
}

fn write_full<C: Codec, W: Write>(
    codec: &C,
    series: &TickSeries,
    mut writer: W,
) -> Result<usize, SixtickError> {
    codec.write(series, &Existing::none(), &mut writer)?;
    writer.flush()?;
    Ok(series.len())
}

fn save_to_path<C: Codec>(
    codec: &C,
    series: &TickSeries,
    path: &Path,
    mode: WriteMode,
) -> Result<usize, SixtickError> {
    if !path.exists() {
        return write_fresh(codec, series, path);
    }

    match mode {
        WriteMode::Strict => Err(SixtickError::DestinationExists(path.to_path_buf())),
        WriteMode::Overwrite => write_fresh(codec, series, path),
        WriteMode::Append => append(codec, series, path),
    }
}

fn write_fresh<C: Codec>(codec: &C, series: &TickSeries, path: &Path) -> Result<usize, SixtickError> {
    let written = write_full(codec, series, BufWriter::new(File::create(path)?))?;
    info!(path = %path.display(), records = written, "wrote series");
    Ok(written)
}

fn append<C: Codec>(codec: &C, series: &TickSeries, path: &Path) -> Result<usize, SixtickError> {
    let existing = codec
        .peek(BufReader::new(File::open(path)?))
        .map_err(|e| file_error(path, e))?;
    let fresh = series.records_after(existing.watermark).count();
    debug!(
        path = %path.display(),
        watermark = %existing.watermark,
        fresh,
        "peeked destination"
    );
    if fresh == 0 {
        return Ok(0);
    }

    let file = if codec.appends_in_place() {
        open_for_append(path)?
    } else {
        File::create(path)?
    };
    let mut writer = BufWriter::new(file);
    codec.write(series, &existing, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), records = fresh, "appended to series");
    Ok(fresh)
}

/// Opens `path` for appending, first terminating a last line that lacks
/// its newline so new rows start on a line of their own.
fn open_for_append(path: &Path) -> io::Result<File> {
    let mut file = OpenOptions::new().read(true).append(true).open(path)?;
    if file.seek(SeekFrom::End(0))? > 0 {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            debug!(path = %path.display(), "terminating last line");
            file.write_all(b"\n")?;
        }
    }
    Ok(file)
}

/// Attributes a codec failure to the file it came from.
pub(crate) fn file_error(path: &Path, err: FormatError) -> SixtickError {
    match err {
        FormatError::Io(e) => SixtickError::Io(e),
        FormatError::UnknownFormat(ext) => SixtickError::UnknownFormat(ext),
        other => SixtickError::BrokenFile {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
