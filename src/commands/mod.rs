//! Top-level subcommand orchestration.
pub mod completions;
pub mod install;
pub mod list;
pub mod remove;
pub mod set;

use crate::linker::LinkOutcome;
use crate::ops::ItemReport;

/// Print an itemized report, one aligned line per item.
pub(crate) fn print_report(reports: &[ItemReport]) {
    for report in reports {
        match &report.outcome {
            LinkOutcome::Failed { reason } => {
                println!("  {:<14} {} ({reason})", "failed", report.display);
            }
            other => println!("  {:<14} {}", other.label(), report.display),
        }
    }
}

/// One-line summary of an itemized report, e.g. `2 linked, 1 failed`.
pub(crate) fn summarize(reports: &[ItemReport]) -> String {
    let mut parts = Vec::new();
    for label in ["linked", "already linked", "removed", "missing", "failed"] {
        let count = reports
            .iter()
            .filter(|r| r.outcome.label() == label)
            .count();
        if count > 0 {
            parts.push(format!("{count} {label}"));
        }
    }
    if parts.is_empty() {
        "nothing to do".to_string()
    } else {
        parts.join(", ")
    }
}
