//! Artifact upload collaborator.

use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Capability interface for shipping a release archive off-machine.
pub trait ArtifactUploader {
    fn upload(&self, archive: &Path) -> Result<()>;
}

/// Placeholder uploader: logs the artifact it would ship and succeeds.
///
/// Wiring a real destination (object storage, a release bucket) means
/// implementing [`ArtifactUploader`] and handing it to the pipeline.
pub struct UploadStub;

impl ArtifactUploader for UploadStub {
    fn upload(&self, archive: &Path) -> Result<()> {
        info!(artifact = %archive.display(), "upload stub: skipping actual transfer");
        Ok(())
    }
}
