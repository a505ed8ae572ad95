//! CLI Tooling
//!
//! Command-line surface for the build pipeline.

pub mod cli;
