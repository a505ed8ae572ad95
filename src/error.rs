//! Error taxonomy for the build pipeline.
//!
//! Fatal failures are expressed as `BuildError`; ledger and collaborator
//! failures are deliberately absent from it because they never abort a
//! build (they surface as warnings on the build report instead).

use std::fmt;
use thiserror::Error;

/// A single validation problem, tagged with the slash-joined path of the
/// offending node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationProblem {
    pub path: String,
    pub kind: ProblemKind,
}

/// Reason codes for structure-tree validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemKind {
    EmptyName,
    IllegalCharacter { found: Vec<char> },
    NameTooLong { length: usize },
    WrongNodeType { found: &'static str },
    TreeTooDeep,
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProblemKind::EmptyName => {
                write!(f, "empty name at {:?}", self.path)
            }
            ProblemKind::IllegalCharacter { found } => {
                write!(f, "illegal characters {:?} in name at {:?}", found, self.path)
            }
            ProblemKind::NameTooLong { length } => {
                write!(
                    f,
                    "name of {} characters exceeds the 100 character limit at {:?}",
                    length, self.path
                )
            }
            ProblemKind::WrongNodeType { found } => {
                write!(
                    f,
                    "expected an object (directory) or string/null (file) at {:?}, got {}",
                    self.path, found
                )
            }
            ProblemKind::TreeTooDeep => {
                write!(f, "tree nested deeper than 20 levels at {:?}", self.path)
            }
        }
    }
}

/// The complete, ordered list of problems found in one validation pass.
///
/// Validation is exhaustive rather than fail-fast, so a single run surfaces
/// every fixable issue at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub problems: Vec<ValidationProblem>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "structure validation failed with {} problem(s):",
            self.problems.len()
        )?;
        for problem in &self.problems {
            writeln!(f, "  - {}", problem)?;
        }
        Ok(())
    }
}

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Missing/unreadable/malformed structure document or ambiguous root key.
    #[error("input error: {0}")]
    Input(String),

    /// The structure tree failed validation; carries every collected problem.
    #[error("{0}")]
    Validation(ValidationReport),

    /// Filesystem failure during materialization, archiving, or path setup.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Archive container failure.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Configuration loading or logging setup failure.
    #[error("configuration error: {0}")]
    Config(String),
}

impl BuildError {
    /// Attach filesystem context to an I/O error.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        BuildError::Io {
            context: context.into(),
            source,
        }
    }
}
