//! Append-only failure log.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Writes one timestamped line per classified error.
///
/// The log is independent of the output table and of stderr logging, and
/// is only ever appended to; reruns accumulate.
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    /// Create a failure log writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one classified error.
    pub fn record(&self, kind: &str, message: &str) -> Result<()> {
        debug!("failure log: {} ({})", kind, self.path.display());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(
            file,
            "{} {}: {}",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            kind,
            message
        )?;

        Ok(())
    }
}
