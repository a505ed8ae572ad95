//! Pack a materialized release directory into a deflate-compressed zip.

use crate::error::BuildError;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive every regular file under `release_root` into `archive_path`.
///
/// Entry names are relative to the *parent* of the release root, so the
/// archive extracts to `<base>_v<N>/...` and the release keeps its own
/// directory name. A pre-existing file at the destination is removed first
/// so the write is a clean replace. Returns the archive size in bytes.
pub fn archive_release(release_root: &Path, archive_path: &Path) -> Result<u64, BuildError> {
    if archive_path.exists() {
        fs::remove_file(archive_path).map_err(|e| {
            BuildError::io(
                format!("removing stale archive {}", archive_path.display()),
                e,
            )
        })?;
    }

    let entry_base = release_root.parent().unwrap_or(Path::new(""));
    let file = File::create(archive_path).map_err(|e| {
        BuildError::io(format!("creating archive {}", archive_path.display()), e)
    })?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(release_root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .unwrap_or(release_root)
                .display()
                .to_string();
            BuildError::io(
                format!("walking release directory {}", path),
                e.into(),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(entry.path(), entry_base)?;
        writer.start_file(name, options)?;
        let mut source = File::open(entry.path()).map_err(|e| {
            BuildError::io(format!("reading {}", entry.path().display()), e)
        })?;
        io::copy(&mut source, &mut writer).map_err(|e| {
            BuildError::io(format!("compressing {}", entry.path().display()), e)
        })?;
    }

    writer.finish()?;

    let metadata = fs::metadata(archive_path).map_err(|e| {
        BuildError::io(format!("sizing archive {}", archive_path.display()), e)
    })?;
    Ok(metadata.len())
}

/// Archive-internal entry name: parent-relative, forward slashes.
fn entry_name(path: &Path, entry_base: &Path) -> Result<String, BuildError> {
    let relative = path.strip_prefix(entry_base).map_err(|_| {
        BuildError::io(
            format!("computing archive entry name for {}", path.display()),
            io::Error::new(io::ErrorKind::InvalidData, "path escapes the release root"),
        )
    })?;
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn build_release(parent: &Path) -> std::path::PathBuf {
        let root = parent.join("Proj_v1");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/main.txt"), "hello").unwrap();
        fs::write(root.join("README.md"), "hi").unwrap();
        root
    }

    #[test]
    fn test_entries_keep_release_folder_prefix() {
        let temp = TempDir::new().unwrap();
        let root = build_release(temp.path());
        let archive_path = temp.path().join("out.zip");

        archive_release(&root, &archive_path).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Proj_v1/README.md", "Proj_v1/src/main.txt"]);
    }

    #[test]
    fn test_contents_round_trip() {
        let temp = TempDir::new().unwrap();
        let root = build_release(temp.path());
        let archive_path = temp.path().join("out.zip");

        archive_release(&root, &archive_path).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name("Proj_v1/src/main.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn test_existing_archive_is_replaced_not_merged() {
        let temp = TempDir::new().unwrap();
        let root = build_release(temp.path());
        let archive_path = temp.path().join("out.zip");
        fs::write(&archive_path, "not a zip at all").unwrap();

        let size = archive_release(&root, &archive_path).unwrap();
        assert_eq!(size, fs::metadata(&archive_path).unwrap().len());

        let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_reported_size_matches_file() {
        let temp = TempDir::new().unwrap();
        let root = build_release(temp.path());
        let archive_path = temp.path().join("out.zip");

        let size = archive_release(&root, &archive_path).unwrap();
        assert!(size > 0);
        assert_eq!(size, fs::metadata(&archive_path).unwrap().len());
    }
}
