use crate::operations::resolve_target;
use crate::report::RollbackResult;
use crate::rollback::rollback_last_batch;
use anyhow::{Context, Result};
use std::path::Path;

/// High-level rollback operation - equivalent to `chrononame rollback`.
///
/// A log with no batch to roll back is a successful no-op, reported as such.
pub fn rollback_operation(path: &Path) -> Result<RollbackResult> {
    let root = resolve_target(path)?;
    let report = rollback_last_batch(&root)
        .with_context(|| format!("Failed to rollback under {}", root.display()))?;

    Ok(RollbackResult::from_report(
        &root.display().to_string(),
        &report,
    ))
}
