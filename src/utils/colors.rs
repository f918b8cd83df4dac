/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const BOLD_RED: &str = "\x1b[1;31m";

use crate::core::ledger::MaintenanceStatus;

/// Remaining-distance color:
/// urgent/overdue → bold red, due → yellow, otherwise green
pub fn color_for_status(status: &MaintenanceStatus) -> &'static str {
    if status.urgent {
        BOLD_RED
    } else if status.oil_due {
        YELLOW
    } else {
        GREEN
    }
}

/// Run distance color: negative runs are data problems.
pub fn color_for_run(run_km: i64) -> &'static str {
    if run_km < 0 { RED } else { RESET }
}

/// Wrap a value in a color, or in grey when it is empty / a placeholder.
pub fn paint(value: &str, color: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{color}{value}{RESET}")
    }
}
