use colored::Colorize;

use crate::driver::{ModuleFailure, RunReport};

/// Formats per-module failures and the run summary for stderr.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// `error: <input>: <error chain>`
    pub fn format_failure(&self, failure: &ModuleFailure) -> String {
        let label = if self.color {
            "error:".red().bold().to_string()
        } else {
            "error:".to_string()
        };
        format!("{label} {}: {:#}", failure.input.display(), failure.error)
    }

    pub fn format_summary(&self, report: &RunReport) -> String {
        let generated = report.generated.len();
        let failed = report.failures.len();
        let files = if generated == 1 { "file" } else { "files" };
        let summary = format!("Generated declarations for {generated} {files}");
        if failed == 0 {
            return if self.color {
                summary.green().to_string()
            } else {
                summary
            };
        }
        let failures = format!("{failed} failed");
        if self.color {
            format!("{summary}, {}", failures.red())
        } else {
            format!("{summary}, {failures}")
        }
    }
}
