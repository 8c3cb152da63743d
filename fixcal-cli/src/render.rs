//! Terminal rendering for sync results.

use owo_colors::OwoColorize;

use fixcal_core::report::SyncReport;

pub fn render_report(report: &SyncReport) -> String {
    let mut lines = Vec::new();

    let added = if report.added > 0 {
        format!("{} added", report.added).green().to_string()
    } else {
        format!("{} added", report.added)
    };
    let failed = if report.failed > 0 {
        format!("{} failed", report.failed).red().to_string()
    } else {
        format!("{} failed", report.failed)
    };

    lines.push(format!(
        "Sync complete: {added}, {} skipped, {failed} ({} fetched, {} already played)",
        report.skipped, report.fetched, report.past_skipped
    ));

    for failure in &report.failures {
        lines.push(format!(
            "   {} fixture {}: {}",
            "x".red(),
            failure.fixture_id,
            failure.reason
        ));
    }

    lines.join("\n")
}
