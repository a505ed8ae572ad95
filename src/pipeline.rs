//! Build pipeline: orchestration and summary reporting.

pub mod orchestrator;
pub mod report;

pub use orchestrator::{BuildPipeline, BuildReport, BuildRequest};
pub use report::format_build_report;
