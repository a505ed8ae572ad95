//! Format a build report as human-readable text.

use crate::pipeline::orchestrator::BuildReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Render the build summary table plus any collected warnings.
pub fn format_build_report(report: &BuildReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Build Summary")));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.add_row(vec!["Base name".to_string(), report.base_name.clone()]);
    table.add_row(vec!["Version".to_string(), format!("v{}", report.version)]);
    table.add_row(vec![
        "Output folder".to_string(),
        report.release_root.display().to_string(),
    ]);
    table.add_row(vec![
        "Releases folder".to_string(),
        report.releases_dir.display().to_string(),
    ]);
    table.add_row(vec![
        "Archive".to_string(),
        report.archive_path.display().to_string(),
    ]);
    table.add_row(vec![
        "Archive size".to_string(),
        format!("{} bytes", report.archive_size),
    ]);
    table.add_row(vec![
        "Folders created".to_string(),
        report.counts.folders.to_string(),
    ]);
    table.add_row(vec![
        "Files created".to_string(),
        report.counts.files.to_string(),
    ]);
    table.add_row(vec![
        "Elapsed".to_string(),
        format!("{:.3}s", report.elapsed.as_secs_f64()),
    ]);
    out.push_str(&format!("{}\n", table));

    if !report.warnings.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format_section_heading("Warnings")
        ));
        for warning in &report.warnings {
            out.push_str(&format!("  warning: {}\n", warning));
        }
    }

    out
}
