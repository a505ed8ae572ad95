//! Build configuration: defaults, optional file, environment overlay.
//!
//! Precedence (lowest to highest): built-in defaults -> config file ->
//! `BLUEPRINT_*` environment variables (`__` separates nested keys, e.g.
//! `BLUEPRINT_AUTOMATION__TAG_ON_BUILD=true`).

use crate::error::BuildError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration passed into the pipeline at construction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlueprintConfig {
    #[serde(default)]
    pub automation: AutomationConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Post-build automation toggles. Each maps to one best-effort
/// collaborator step; none of them can fail a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Commit the release directory and archive after a successful build.
    #[serde(default = "default_true")]
    pub commit_on_build: bool,

    /// Tag the commit as `<base>_v<N>`.
    #[serde(default)]
    pub tag_on_build: bool,

    /// Push branch (and tags) after committing.
    #[serde(default)]
    pub push_on_build: bool,

    /// Hand the archive to the configured uploader.
    #[serde(default)]
    pub upload_artifact: bool,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            commit_on_build: true,
            tag_on_build: false,
            push_on_build: false,
            upload_artifact: false,
        }
    }
}

impl AutomationConfig {
    /// Any step that needs a version-control client.
    pub fn wants_vcs(&self) -> bool {
        self.commit_on_build || self.tag_on_build || self.push_on_build
    }

    /// Disable the source-control steps, keeping upload intact.
    pub fn without_vcs(mut self) -> Self {
        self.commit_on_build = false;
        self.tag_on_build = false;
        self.push_on_build = false;
        self
    }
}

/// Structure-name validation policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject `:*?"<>|` in segment names (separators are always rejected).
    #[serde(default = "default_true")]
    pub reject_reserved_characters: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reject_reserved_characters: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl BlueprintConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, BuildError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            let path = path.to_str().ok_or_else(|| {
                BuildError::Config(format!(
                    "config path {} is not valid UTF-8",
                    path.display()
                ))
            })?;
            builder = builder.add_source(File::with_name(path));
        }
        builder = builder.add_source(
            Environment::with_prefix("BLUEPRINT")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| BuildError::Config(e.to_string()))
    }
}
