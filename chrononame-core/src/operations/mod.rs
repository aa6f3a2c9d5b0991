//! High-level operations that correspond to CLI commands
//!
//! These modules hold the core logic for each chrononame operation,
//! separated from CLI concerns like argument parsing and output formatting.
//! Each returns a structured result; nothing here prints.

pub mod execute;
pub mod plan;
pub mod rollback;

pub use execute::execute_operation;
pub use plan::plan_operation;
pub use rollback::rollback_operation;

use anyhow::{ensure, Context, Result};
use std::path::{Path, PathBuf};

/// Validate and canonicalize a target directory. Missing or non-directory
/// targets are fatal for the invocation; no partial work is attempted.
///
/// Callers that prompt before mutating anything should validate first so a
/// bad path fails before the user is asked to confirm.
pub fn resolve_target(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Invalid directory: {}", path.display()))?;
    ensure!(root.is_dir(), "Not a directory: {}", root.display());
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_target_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_target(&tmp.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("Invalid directory"));
    }

    #[test]
    fn file_target_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(resolve_target(&file).is_err());
    }
}
