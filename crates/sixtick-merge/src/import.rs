//! Reading series files back in.

use sixtick_format::{Codec, Format};
use sixtick_store::Store;
use sixtick_types::{SixtickError, TickSeries, WatchlistEntry};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::file::file_error;

/// Reads a series file and resolves which tracked security it belongs to.
///
/// The format comes from `format` or else the file extension. A file that
/// names its own security (JSON) keeps that identity. Otherwise the
/// identity is looked up on the watchlist by `alias`, or by the file stem
/// when no alias is given.
///
/// # Errors
///
/// - [`SixtickError::UnknownFormat`] if the extension names no codec
/// - [`SixtickError::FileNotFound`] if `path` does not exist
/// - [`SixtickError::BrokenFile`] if the content does not parse
/// - [`SixtickError::SecurityNotFound`] if `alias` is not tracked
/// - [`SixtickError::UnresolvedIdentity`] if the file stem is not tracked
pub fn load_file<S: Store + ?Sized>(
    store: &S,
    path: &Path,
    format: Option<Format>,
    alias: Option<&str>,
) -> Result<(WatchlistEntry, TickSeries), SixtickError> {
    let format = match format {
        Some(format) => format,
        None => Format::from_path(path)?,
    };
    if !path.is_file() {
        return Err(SixtickError::FileNotFound(path.to_path_buf()));
    }

    let series = format
        .read(BufReader::new(File::open(path)?))
        .map_err(|e| file_error(path, e))?;
    debug!(path = %path.display(), %format, records = series.len(), "read file");

    if let Some(security) = series.security() {
        return Ok((security, series));
    }

    let security = resolve(store, path, alias)?;
    Ok((security.clone(), series.with_identity(security)))
}

fn resolve<S: Store + ?Sized>(
    store: &S,
    path: &Path,
    alias: Option<&str>,
) -> Result<WatchlistEntry, SixtickError> {
    if let Some(alias) = alias {
        return store
            .find_security(alias)?
            .ok_or_else(|| SixtickError::SecurityNotFound(alias.to_string()));
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let found = if stem.is_empty() {
        None
    } else {
        store.find_security(stem)?
    };
    found.ok_or_else(|| SixtickError::UnresolvedIdentity(path.to_path_buf()))
}
