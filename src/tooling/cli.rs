//! Command-line interface for structure builds.
//!
//! `build` runs the whole pipeline; `validate` runs only the validating
//! decoder and touches no filesystem state.

use crate::config::BlueprintConfig;
use crate::error::BuildError;
use crate::pipeline::{format_build_report, BuildPipeline, BuildRequest};
use crate::tree::{resolve_root, validate_tree, NamePolicy};
use crate::vcs::running_in_ci;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Blueprint CLI - materialize declarative directory structures into
/// versioned, archived releases
#[derive(Parser)]
#[command(name = "blueprint")]
#[command(about = "Materialize declarative directory structures into versioned releases")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (implies file output)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a versioned release from a structure document
    Build {
        /// JSON structure document
        structure_file: PathBuf,
        /// Top-level key to build; defaults to the document's only key
        base_name: Option<String>,
        /// Output parent directory
        #[arg(default_value = ".")]
        output_parent: PathBuf,
    },
    /// Validate a structure document without touching the filesystem
    Validate {
        /// JSON structure document
        structure_file: PathBuf,
        /// Top-level key to validate; defaults to the document's only key
        base_name: Option<String>,
    },
}

/// CLI execution context holding the resolved configuration.
pub struct CliContext {
    config: BlueprintConfig,
}

impl CliContext {
    pub fn new(config_file: Option<PathBuf>) -> Result<Self, BuildError> {
        let config = BlueprintConfig::load(config_file.as_deref())?;
        Ok(CliContext { config })
    }

    pub fn config(&self) -> &BlueprintConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, BuildError> {
        match command {
            Commands::Build {
                structure_file,
                base_name,
                output_parent,
            } => self.execute_build(structure_file, base_name.as_deref(), output_parent),
            Commands::Validate {
                structure_file,
                base_name,
            } => self.execute_validate(structure_file, base_name.as_deref()),
        }
    }

    fn execute_build(
        &self,
        structure_file: &Path,
        base_name: Option<&str>,
        output_parent: &Path,
    ) -> Result<String, BuildError> {
        let document = load_document(structure_file)?;
        let (root_name, root) = resolve_root(&document, base_name)?;

        let mut automation = self.config.automation.clone();
        if automation.wants_vcs() && running_in_ci() {
            info!("CI environment detected, disabling source-control automation");
            automation = automation.without_vcs();
        }

        let pipeline = BuildPipeline::new(automation, self.name_policy());
        let request = BuildRequest {
            base_name: root_name,
            structure: root.clone(),
            output_parent: output_parent.to_path_buf(),
        };
        let report = pipeline.run(&request)?;
        Ok(format_build_report(&report))
    }

    fn execute_validate(
        &self,
        structure_file: &Path,
        base_name: Option<&str>,
    ) -> Result<String, BuildError> {
        let document = load_document(structure_file)?;
        let (root_name, root) = resolve_root(&document, base_name)?;
        let (_, counts) = validate_tree(&root_name, root, &self.name_policy())?;
        Ok(format!(
            "{} is valid: {} folder(s), {} file(s)",
            root_name, counts.folders, counts.files
        ))
    }

    fn name_policy(&self) -> NamePolicy {
        NamePolicy {
            reject_reserved_characters: self.config.validation.reject_reserved_characters,
        }
    }
}

/// Read and parse the structure document.
fn load_document(path: &Path) -> Result<Value, BuildError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        BuildError::Input(format!(
            "failed to read structure file {}: {}",
            path.display(),
            e
        ))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        BuildError::Input(format!(
            "failed to parse structure file {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_structure(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("structure.json");
        fs::write(&path, contents).unwrap();
        path
    }

    fn context() -> CliContext {
        CliContext {
            config: BlueprintConfig::default(),
        }
    }

    #[test]
    fn test_validate_reports_counts() {
        let temp = TempDir::new().unwrap();
        let file = write_structure(
            temp.path(),
            r#"{"Proj": {"src": {"main.txt": "hello"}, "README.md": "hi"}}"#,
        );

        let output = context()
            .execute(&Commands::Validate {
                structure_file: file,
                base_name: None,
            })
            .unwrap();
        assert_eq!(output, "Proj is valid: 1 folder(s), 2 file(s)");
    }

    #[test]
    fn test_validate_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let file = write_structure(temp.path(), r#"{"Proj": {"a.txt": null}}"#);

        context()
            .execute(&Commands::Validate {
                structure_file: file.clone(),
                base_name: None,
            })
            .unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("structure.json")]);
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let err = context()
            .execute(&Commands::Validate {
                structure_file: PathBuf::from("/no/such/file.json"),
                base_name: None,
            })
            .unwrap_err();
        assert!(matches!(err, BuildError::Input(_)));
    }

    #[test]
    fn test_malformed_json_is_input_error() {
        let temp = TempDir::new().unwrap();
        let file = write_structure(temp.path(), "{not json");
        let err = context()
            .execute(&Commands::Validate {
                structure_file: file,
                base_name: None,
            })
            .unwrap_err();
        assert!(matches!(err, BuildError::Input(_)));
    }

    #[test]
    fn test_validation_error_lists_all_problems() {
        let temp = TempDir::new().unwrap();
        let file = write_structure(temp.path(), r#"{"Proj": {"a/b": "x", "n": 4}}"#);
        let err = context()
            .execute(&Commands::Validate {
                structure_file: file,
                base_name: None,
            })
            .unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("Proj/a/b"));
        assert!(rendered.contains("Proj/n"));
    }
}
