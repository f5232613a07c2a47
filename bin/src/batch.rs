//! Per-security error handling for commands taking several identifiers.

use sixtick_lib::prelude::*;
use tracing::debug;

/// Reports a failure for one security and lets the batch continue, unless
/// the failure concerns the store itself.
pub(crate) fn settle(symbol_or_isin: &str, result: Result<()>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.is_fatal() => Err(err.into()),
        Err(err) => {
            debug!(security = symbol_or_isin, error = ?err, "skipping security");
            eprintln!("{err}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_success_continues() {
        assert!(settle("ABBN", Ok(())).is_ok());
    }

    #[test]
    fn test_per_security_errors_continue() {
        assert!(settle("XXXX", Err(SixtickError::SecurityNotFound("XXXX".into()))).is_ok());
        assert!(
            settle(
                "ABBN",
                Err(SixtickError::DestinationExists(PathBuf::from("ABBN.csv")))
            )
            .is_ok()
        );
        assert!(settle("ABBN", Err(SixtickError::Connectivity("http://localhost".into()))).is_ok());
    }

    #[test]
    fn test_store_failure_aborts() {
        let err = settle("ABBN", Err(SixtickError::Store("database is locked".into())))
            .unwrap_err();
        let cause = err.downcast_ref::<SixtickError>().unwrap();
        assert!(matches!(cause, SixtickError::Store(msg) if msg == "database is locked"));
    }
}
