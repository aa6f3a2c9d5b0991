use crate::executor::ExecutionReport;
use crate::rollback::RollbackReport;
use crate::scanner::Plan;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub root: String,
    pub recursive: bool,
    pub total: usize,
    pub plan: Plan,
}

/// Result of an execute operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResult {
    pub batch_id: String,
    pub root: String,
    pub renamed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub conflicts: usize,
    pub interrupted: bool,
    pub log_path: String,
}

impl ExecuteResult {
    pub fn from_report(root: &str, report: &ExecutionReport) -> Self {
        Self {
            batch_id: report.batch_id.clone(),
            root: root.to_string(),
            renamed: report.renamed,
            skipped: report.skipped,
            errors: report.errors,
            conflicts: report.conflicts.len(),
            interrupted: report.interrupted,
            log_path: report.log_path.display().to_string(),
        }
    }
}

/// Result of a rollback operation
#[derive(Debug, Serialize, Deserialize)]
pub struct RollbackResult {
    pub batch_id: Option<String>,
    pub root: String,
    pub restored: usize,
    pub missing: usize,
    pub failed: usize,
    pub relocated: usize,
    pub log_path: String,
}

impl RollbackResult {
    pub fn from_report(root: &str, report: &RollbackReport) -> Self {
        Self {
            batch_id: report.batch_id.clone(),
            root: root.to_string(),
            restored: report.restored,
            missing: report.missing,
            failed: report.failed,
            relocated: report.relocated.len(),
            log_path: report.log_path.display().to_string(),
        }
    }
}

/// Trait for formatting operation results in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "root": self.root,
            "recursive": self.recursive,
            "total": self.total,
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.total == 0 {
            return format!("No files to rename under {}\n", self.root);
        }
        let mut output = String::new();
        writeln!(output, "Total files planned: {}", self.total).unwrap();
        if !self.recursive {
            output.push_str("Subdirectories were not scanned\n");
        }
        output
    }
}

impl OutputFormatter for ExecuteResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "execute",
            "batch_id": self.batch_id,
            "root": self.root,
            "interrupted": self.interrupted,
            "summary": {
                "renamed": self.renamed,
                "skipped": self.skipped,
                "errors": self.errors,
                "conflicts": self.conflicts,
            },
            "log_path": self.log_path,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(
            output,
            "Batch {} completed: {} renamed, {} skipped, {} errors",
            self.batch_id, self.renamed, self.skipped, self.errors
        )
        .unwrap();
        if self.conflicts > 0 {
            writeln!(
                output,
                "{} destination conflicts resolved with numeric suffixes",
                self.conflicts
            )
            .unwrap();
        }
        if self.interrupted {
            output.push_str("Interrupted: remaining operations were not attempted\n");
        }
        writeln!(output, "Log saved to {}", self.log_path).unwrap();
        output
    }
}

impl OutputFormatter for RollbackResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "rollback",
            "batch_id": self.batch_id,
            "root": self.root,
            "summary": {
                "restored": self.restored,
                "missing": self.missing,
                "failed": self.failed,
                "relocated": self.relocated,
            },
            "log_path": self.log_path,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let Some(ref batch_id) = self.batch_id else {
            return "No batch to rollback\n".to_string();
        };

        let mut output = String::new();
        writeln!(
            output,
            "Rolled back batch {}: {} restored, {} missing, {} failed",
            batch_id, self.restored, self.missing, self.failed
        )
        .unwrap();
        if self.relocated > 0 {
            writeln!(
                output,
                "{} files restored under alternate names (original path occupied)",
                self.relocated
            )
            .unwrap();
        }
        writeln!(output, "Rollback logged to {}", self.log_path).unwrap();
        output
    }
}
