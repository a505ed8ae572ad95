//! Append-only build ledger.
//!
//! One line per successful build. The ledger is best-effort observability:
//! the caller reports a write failure as a warning and the build still
//! stands — the materialized release and archive are the source of truth.

use crate::types::{BuildVersion, TreeCounts};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One immutable ledger line.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub timestamp: DateTime<Utc>,
    pub base_name: String,
    pub version: BuildVersion,
    pub counts: TreeCounts,
    pub release_root: PathBuf,
    pub archive_path: PathBuf,
    pub archive_size: u64,
    pub elapsed: Duration,
}

impl LedgerEntry {
    /// Render the entry as a single log line (no trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "[{}] base={} version=v{} folders={} files={} output={} zip={} zip_size={}B elapsed={:.3}s",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.base_name,
            self.version,
            self.counts.folders,
            self.counts.files,
            self.release_root.display(),
            self.archive_path.display(),
            self.archive_size,
            self.elapsed.as_secs_f64(),
        )
    }
}

/// Append one entry to the ledger file, creating it on first use.
///
/// Pure append: existing lines are never rewritten or rotated.
pub fn append_entry(ledger_path: &Path, entry: &LedgerEntry) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ledger_path)?;
    writeln!(file, "{}", entry.to_line())
}
