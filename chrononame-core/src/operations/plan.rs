use crate::operations::resolve_target;
use crate::report::PlanResult;
use crate::scanner::{build_plan, PlanOptions};
use anyhow::{Context, Result};
use std::path::Path;

/// High-level plan operation - equivalent to `chrononame plan`.
///
/// Read-only: safe to call repeatedly and while the tree is being inspected
/// by other tools.
pub fn plan_operation(path: &Path, recursive: bool) -> Result<PlanResult> {
    let root = resolve_target(path)?;
    let plan = build_plan(&root, &PlanOptions { recursive })
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    Ok(PlanResult {
        root: root.display().to_string(),
        recursive,
        total: plan.operations.len(),
        plan,
    })
}
