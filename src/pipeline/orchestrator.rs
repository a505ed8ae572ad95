//! Build pipeline orchestration.
//!
//! Sequences validate -> resolve version and paths -> wipe-and-recreate the
//! release directory -> materialize -> archive -> ledger -> collaborators.
//! Core-step failures abort the run; ledger and collaborator failures are
//! collected as warnings on the report.

use crate::config::AutomationConfig;
use crate::error::BuildError;
use crate::release::{append_entry, archive_release, next_version, LedgerEntry, ReleaseLayout};
use crate::tree::{materialize_tree, validate_tree, NamePolicy};
use crate::types::{BuildVersion, TreeCounts};
use crate::upload::ArtifactUploader;
use crate::vcs::{GitCli, VersionControlClient};
use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// One build invocation: a named root value and an output parent.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub base_name: String,
    pub structure: Value,
    pub output_parent: PathBuf,
}

/// Summary of a completed build, including non-fatal warnings.
#[derive(Debug)]
pub struct BuildReport {
    pub base_name: String,
    pub version: BuildVersion,
    pub release_root: PathBuf,
    pub releases_dir: PathBuf,
    pub archive_path: PathBuf,
    pub archive_size: u64,
    pub counts: TreeCounts,
    pub elapsed: Duration,
    pub warnings: Vec<String>,
}

/// The pipeline itself. Collaborators are injected so automation can be
/// faked in tests; when none is injected a `git` client is discovered from
/// the output parent at run time.
pub struct BuildPipeline {
    automation: AutomationConfig,
    name_policy: NamePolicy,
    vcs: Option<Box<dyn VersionControlClient>>,
    uploader: Option<Box<dyn ArtifactUploader>>,
}

impl BuildPipeline {
    pub fn new(automation: AutomationConfig, name_policy: NamePolicy) -> Self {
        Self {
            automation,
            name_policy,
            vcs: None,
            uploader: None,
        }
    }

    pub fn with_vcs(mut self, vcs: Box<dyn VersionControlClient>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    pub fn with_uploader(mut self, uploader: Box<dyn ArtifactUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Run one build end to end.
    ///
    /// Nothing is written before validation passes; a failure during
    /// materialization or archiving leaves the partial release directory
    /// in place for inspection.
    pub fn run(&self, request: &BuildRequest) -> Result<BuildReport, BuildError> {
        let started = Instant::now();

        let (tree, expected) =
            validate_tree(&request.base_name, &request.structure, &self.name_policy)?;
        info!(
            base = %request.base_name,
            folders = expected.folders,
            files = expected.files,
            "structure validated"
        );

        let version = next_version(&request.output_parent, &request.base_name)?;
        let layout = ReleaseLayout::resolve(
            &request.output_parent,
            &request.base_name,
            version,
            Utc::now().date_naive(),
        );

        fs::create_dir_all(&layout.releases_dir).map_err(|e| {
            BuildError::io(
                format!("creating releases directory {}", layout.releases_dir.display()),
                e,
            )
        })?;
        prepare_release_root(&layout)?;

        let counts = materialize_tree(&tree, &layout.release_root)?;
        info!(
            folders = counts.folders,
            files = counts.files,
            path = %layout.release_root.display(),
            "release materialized"
        );

        let archive_size = archive_release(&layout.release_root, &layout.archive_path)?;
        info!(
            archive = %layout.archive_path.display(),
            size = archive_size,
            "release archived"
        );

        let elapsed = started.elapsed();
        let mut warnings = Vec::new();

        let entry = LedgerEntry {
            timestamp: Utc::now(),
            base_name: layout.base_name.clone(),
            version,
            counts,
            release_root: layout.release_root.clone(),
            archive_path: layout.archive_path.clone(),
            archive_size,
            elapsed,
        };
        if let Err(e) = append_entry(&layout.ledger_path, &entry) {
            let message = format!(
                "ledger write to {} failed: {}",
                layout.ledger_path.display(),
                e
            );
            warn!("{}", message);
            warnings.push(message);
        }

        self.run_collaborators(&layout, &mut warnings);

        Ok(BuildReport {
            base_name: layout.base_name,
            version,
            release_root: layout.release_root,
            releases_dir: layout.releases_dir,
            archive_path: layout.archive_path,
            archive_size,
            counts,
            elapsed,
            warnings,
        })
    }

    /// Post-build automation. Every step is wrapped: a failure is logged,
    /// recorded as a warning, and never aborts later steps.
    fn run_collaborators(&self, layout: &ReleaseLayout, warnings: &mut Vec<String>) {
        if self.automation.wants_vcs() {
            let discovered;
            let client: Option<&dyn VersionControlClient> = match &self.vcs {
                Some(client) => Some(client.as_ref()),
                None => match GitCli::discover(&layout.parent) {
                    Some(git) => {
                        info!(repo = %git.repo_root().display(), "git repository detected");
                        discovered = git;
                        Some(&discovered)
                    }
                    None => {
                        info!("no git repository detected, skipping source-control automation");
                        None
                    }
                },
            };

            if let Some(client) = client {
                if self.automation.commit_on_build {
                    let message =
                        format!("Build {} {}", layout.base_name, layout.version_label());
                    let paths = vec![layout.release_root.clone(), layout.archive_path.clone()];
                    if let Err(e) = client.commit(&paths, &message) {
                        record_warning(warnings, format!("commit failed: {:#}", e));
                    }
                }
                if self.automation.tag_on_build {
                    let tag = format!("{}_v{}", layout.base_name, layout.version);
                    if let Err(e) = client.tag(&tag) {
                        record_warning(warnings, format!("tag {} failed: {:#}", tag, e));
                    }
                }
                if self.automation.push_on_build {
                    if let Err(e) = client.push() {
                        record_warning(warnings, format!("push failed: {:#}", e));
                    }
                }
            }
        }

        if self.automation.upload_artifact {
            match &self.uploader {
                Some(uploader) => {
                    if let Err(e) = uploader.upload(&layout.archive_path) {
                        record_warning(warnings, format!("artifact upload failed: {:#}", e));
                    }
                }
                None => {
                    record_warning(
                        warnings,
                        "artifact upload requested but no uploader configured".to_string(),
                    );
                }
            }
        }
    }
}

/// Create an empty release root, destroying any directory already at the
/// exact target path: rebuild wins over reuse.
fn prepare_release_root(layout: &ReleaseLayout) -> Result<(), BuildError> {
    if layout.release_root.exists() {
        warn!(path = %layout.release_root.display(), "release directory already exists, rebuilding");
        fs::remove_dir_all(&layout.release_root).map_err(|e| {
            BuildError::io(
                format!("removing stale release {}", layout.release_root.display()),
                e,
            )
        })?;
    }
    fs::create_dir_all(&layout.release_root).map_err(|e| {
        BuildError::io(
            format!("creating release directory {}", layout.release_root.display()),
            e,
        )
    })
}

fn record_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}
