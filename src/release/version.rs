//! Next-version resolution from existing release directories.

use crate::error::BuildError;
use crate::types::BuildVersion;
use std::fs;
use std::io;
use std::path::Path;

/// Compute the next version for `base_name` under `parent`.
///
/// Scans the parent's immediate entries for names of the form
/// `<base>_v<N>` and returns `max(N) + 1`. Entries whose suffix is not
/// purely digits are ignored. A missing parent directory or no matching
/// entries yield version 1. Pure read: nothing is created or locked, so
/// the result is only stable while no other build runs against the same
/// parent.
pub fn next_version(parent: &Path, base_name: &str) -> Result<BuildVersion, BuildError> {
    let prefix = format!("{}_v", base_name);

    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(1),
        Err(e) => {
            return Err(BuildError::io(
                format!("listing output parent {}", parent.display()),
                e,
            ))
        }
    };

    let mut newest: BuildVersion = 0;
    for entry in entries {
        let entry = entry.map_err(|e| {
            BuildError::io(format!("listing output parent {}", parent.display()), e)
        })?;
        let name = entry.file_name();
        let Some(suffix) = name.to_str().and_then(|n| n.strip_prefix(&prefix)) else {
            continue;
        };
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Ok(version) = suffix.parse::<BuildVersion>() {
            newest = newest.max(version);
        }
    }

    Ok(newest + 1)
}
