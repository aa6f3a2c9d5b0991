use crate::log::{LogAction, LogRecord, LogStore};
use crate::scanner::{Plan, RenameOperation};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// A planned destination that was occupied at execution time and the name
/// actually used instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictNote {
    pub planned: PathBuf,
    pub actual: PathBuf,
}

/// Outcome tally of one executed batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub batch_id: String,
    pub renamed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub conflicts: Vec<ConflictNote>,
    pub interrupted: bool,
    pub log_path: PathBuf,
}

impl ExecutionReport {
    fn new(batch_id: String, log_path: PathBuf) -> Self {
        Self {
            batch_id,
            renamed: 0,
            skipped: 0,
            errors: 0,
            conflicts: Vec::new(),
            interrupted: false,
            log_path,
        }
    }

    pub fn attempted(&self) -> usize {
        self.renamed + self.skipped + self.errors
    }
}

/// A log append failed mid-batch. The batch stops there, but renames already
/// performed stay on disk, so the tally of completed work travels with the
/// error instead of being lost.
#[derive(Debug, Error)]
#[error("Log write failed after {} operations: {detail}", report.attempted())]
pub struct LogWriteError {
    pub report: ExecutionReport,
    pub detail: String,
}

/// Execute a plan against the filesystem.
///
/// Every attempted operation produces exactly one log record, flushed before
/// the next operation starts, so an interruption leaves the log consistent
/// with whatever was actually moved. A failed move never aborts the batch;
/// it is recorded and execution continues. The only fatal error is failing
/// to write the log itself, which would break the audit and rollback
/// guarantee; that surfaces as a [`LogWriteError`] carrying the tally of
/// work done up to that point.
///
/// `interrupt` is checked between operations; when it flips, the batch stops
/// early and already-performed renames stay in place, recorded.
pub fn execute_plan(
    root: &Path,
    plan: &Plan,
    interrupt: Option<&AtomicBool>,
) -> Result<ExecutionReport> {
    let store = LogStore::open(root);
    let batch_id = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
    let mut report = ExecutionReport::new(batch_id.clone(), store.path().to_path_buf());

    for operation in &plan.operations {
        if interrupt.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            report.interrupted = true;
            break;
        }
        let record = execute_one(operation, &batch_id, &mut report);
        if let Err(err) = store.append(std::slice::from_ref(&record)) {
            return Err(LogWriteError {
                report,
                detail: format!("{err:#}"),
            }
            .into());
        }
    }

    Ok(report)
}

fn execute_one(
    operation: &RenameOperation,
    batch_id: &str,
    report: &mut ExecutionReport,
) -> LogRecord {
    let source = &operation.source;

    if !source.exists() {
        report.skipped += 1;
        return LogRecord::now(
            batch_id,
            source,
            &operation.destination,
            LogAction::SkipMissingSrc,
        );
    }

    // Something may have claimed the destination since planning. Step aside
    // with a numeric suffix rather than overwrite.
    let mut destination = operation.destination.clone();
    if destination.exists() && !is_same_file(source, &destination) {
        destination = next_available(&operation.destination);
        report.conflicts.push(ConflictNote {
            planned: operation.destination.clone(),
            actual: destination.clone(),
        });
    }

    if let Some(parent) = destination.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            report.errors += 1;
            return LogRecord::now(batch_id, source, &destination, LogAction::Error(err.to_string()));
        }
    }

    match fs::rename(source, &destination) {
        Ok(()) => {
            report.renamed += 1;
            LogRecord::now(batch_id, source, &destination, LogAction::Rename)
        },
        Err(err) => {
            report.errors += 1;
            LogRecord::now(batch_id, source, &destination, LogAction::Error(err.to_string()))
        },
    }
}

/// Whether two paths refer to the same underlying file. Unresolvable paths
/// never count as the same file.
pub(crate) fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// First `<stem>_<N><.ext>` variant of `path` that does not exist yet.
fn next_available(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1;
    loop {
        let candidate = path.with_file_name(format!("{stem}_{n}{suffix}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
