use crate::executor::execute_plan;
use crate::operations::resolve_target;
use crate::report::ExecuteResult;
use crate::scanner::Plan;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::atomic::AtomicBool;

/// High-level execute operation - equivalent to `chrononame execute` after
/// the caller has confirmed the plan.
///
/// Confirmation is a presentation concern; by the time this runs the caller
/// has committed to mutating the filesystem.
pub fn execute_operation(
    path: &Path,
    plan: &Plan,
    interrupt: Option<&AtomicBool>,
) -> Result<ExecuteResult> {
    let root = resolve_target(path)?;
    let report = execute_plan(&root, plan, interrupt)
        .with_context(|| format!("Failed to execute plan under {}", root.display()))?;

    Ok(ExecuteResult::from_report(
        &root.display().to_string(),
        &report,
    ))
}
