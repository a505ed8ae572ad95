//! Deterministic output paths for one versioned build.

use crate::types::BuildVersion;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Subdirectory of the output parent holding release archives.
pub const RELEASES_DIRNAME: &str = "Releases";

/// Append-only build ledger file in the output parent.
pub const LEDGER_FILENAME: &str = "build_log.txt";

/// The full path set for one build: release root, archive, and ledger.
///
/// Every consumer-visible path derives from the base name, the version,
/// and the build date, so two runs with the same inputs resolve the same
/// layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLayout {
    pub parent: PathBuf,
    pub base_name: String,
    pub version: BuildVersion,
    pub release_root: PathBuf,
    pub releases_dir: PathBuf,
    pub archive_path: PathBuf,
    pub ledger_path: PathBuf,
}

impl ReleaseLayout {
    pub fn resolve(parent: &Path, base_name: &str, version: BuildVersion, date: NaiveDate) -> Self {
        let release_name = format!("{}_v{}", base_name, version);
        let releases_dir = parent.join(RELEASES_DIRNAME);
        let archive_path =
            releases_dir.join(format!("{}_{}.zip", release_name, date.format("%Y-%m-%d")));

        ReleaseLayout {
            parent: parent.to_path_buf(),
            base_name: base_name.to_string(),
            version,
            release_root: parent.join(&release_name),
            releases_dir,
            archive_path,
            ledger_path: parent.join(LEDGER_FILENAME),
        }
    }

    /// Version label as it appears in archives, tags, and the ledger.
    pub fn version_label(&self) -> String {
        format!("v{}", self.version)
    }
}
