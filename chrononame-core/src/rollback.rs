use crate::executor::is_same_file;
use crate::log::{LogAction, LogRecord, LogStore};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome tally of reversing one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbackReport {
    /// Batch that was rolled back, `None` when the log held nothing to
    /// roll back.
    pub batch_id: Option<String>,
    pub restored: usize,
    pub missing: usize,
    pub failed: usize,
    /// Files whose original path was occupied and that were restored under
    /// an alternate name.
    pub relocated: Vec<PathBuf>,
    pub log_path: PathBuf,
}

impl RollbackReport {
    fn empty(log_path: PathBuf) -> Self {
        Self {
            batch_id: None,
            restored: 0,
            missing: 0,
            failed: 0,
            relocated: Vec::new(),
            log_path,
        }
    }

    pub fn nothing_to_rollback(&self) -> bool {
        self.batch_id.is_none()
    }
}

/// Reverse the most recent batch that performed at least one rename.
///
/// Rename records of that batch are processed newest first, which keeps
/// overlapping rename chains from tripping over each other. Rollback records
/// are appended under the original batch id; they never create a new batch,
/// so a rollback cannot itself be rolled back.
pub fn rollback_last_batch(root: &Path) -> Result<RollbackReport> {
    let store = LogStore::open(root);
    let records = store.read_all()?;

    let Some(batch_id) = find_last_rename_batch(&records) else {
        return Ok(RollbackReport::empty(store.path().to_path_buf()));
    };

    let renames: Vec<&LogRecord> = records
        .iter()
        .filter(|r| r.batch_id == batch_id && r.action.is_rename())
        .collect();

    let mut report = RollbackReport {
        batch_id: Some(batch_id.clone()),
        ..RollbackReport::empty(store.path().to_path_buf())
    };

    for entry in renames.iter().rev() {
        let record = rollback_one(entry, &batch_id, &mut report);
        store.append(std::slice::from_ref(&record))?;
    }

    Ok(report)
}

/// Batch id of the newest record whose action is `rename`. Scanning from the
/// end means intervening rollback-only activity is skipped over.
fn find_last_rename_batch(records: &[LogRecord]) -> Option<String> {
    records
        .iter()
        .rev()
        .find(|r| r.action.is_rename())
        .map(|r| r.batch_id.clone())
}

fn rollback_one(entry: &LogRecord, batch_id: &str, report: &mut RollbackReport) -> LogRecord {
    // The rename moved src to dst, so the file currently lives at dst and
    // wants to go back to src. Recorded with that orientation.
    let current = Path::new(&entry.dst);
    let original = Path::new(&entry.src);

    if !current.exists() {
        report.missing += 1;
        return LogRecord::now(batch_id, current, original, LogAction::RollbackMissingDst);
    }

    let mut target = original.to_path_buf();
    if target.exists() && !is_same_file(current, &target) {
        target = restored_name(original);
        report.relocated.push(target.clone());
    }

    match fs::rename(current, &target) {
        Ok(()) => {
            report.restored += 1;
            LogRecord::now(batch_id, current, &target, LogAction::Rollback)
        },
        Err(err) => {
            report.failed += 1;
            LogRecord::now(
                batch_id,
                current,
                &target,
                LogAction::RollbackFailed(err.to_string()),
            )
        },
    }
}

/// First `<stem>_restored_<N><.ext>` variant of `path` that is free.
fn restored_name(path: &Path) -> PathBuf {
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
        let candidate = path.with_file_name(format!("{stem}_restored_{n}{suffix}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_log_means_nothing_to_rollback() {
        let tmp = TempDir::new().unwrap();
        let report = rollback_last_batch(tmp.path()).unwrap();
        assert!(report.nothing_to_rollback());
        assert_eq!(report.restored, 0);
    }

    #[test]
    fn log_without_renames_means_nothing_to_rollback() {
        let tmp = TempDir::new().unwrap();
        let store = LogStore::open(tmp.path());
        store
            .append(&[
                LogRecord::now(
                    "b1",
                    Path::new("/a/x"),
                    Path::new("/a/y"),
                    LogAction::Rollback,
                ),
                LogRecord::now(
                    "b1",
                    Path::new("/a/z"),
                    Path::new("/a/w"),
                    LogAction::RollbackMissingDst,
                ),
            ])
            .unwrap();

        let report = rollback_last_batch(tmp.path()).unwrap();
        assert!(report.nothing_to_rollback());
        // Nothing new was appended either.
        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn picks_newest_batch_with_renames() {
        let tmp = TempDir::new().unwrap();
        let store = LogStore::open(tmp.path());

        let old = tmp.path().join("OLD_250101_0900AM.txt");
        let new = tmp.path().join("NEW_250102_0900AM.txt");
        fs::write(&new, b"x").unwrap();

        store
            .append(&[
                LogRecord::now(
                    "20250101090000",
                    Path::new("/gone/a.txt"),
                    Path::new("/gone/b.txt"),
                    LogAction::Rename,
                ),
                LogRecord::now("20250102090000", &old, &new, LogAction::Rename),
            ])
            .unwrap();

        let report = rollback_last_batch(tmp.path()).unwrap();
        assert_eq!(report.batch_id.as_deref(), Some("20250102090000"));
        assert_eq!(report.restored, 1);
        assert!(old.exists());
        assert!(!new.exists());
    }

    #[test]
    fn missing_destination_is_recorded_and_skipped() {
        let tmp = TempDir::new().unwrap();
        let store = LogStore::open(tmp.path());
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("TXT_250101_0900AM.txt");
        // dst never created: the renamed file has since disappeared.
        store
            .append(&[LogRecord::now("b1", &src, &dst, LogAction::Rename)])
            .unwrap();

        let report = rollback_last_batch(tmp.path()).unwrap();
        assert_eq!(report.missing, 1);
        assert_eq!(report.restored, 0);

        let records = store.read_all().unwrap();
        assert_eq!(
            records.last().unwrap().action,
            LogAction::RollbackMissingDst
        );
    }

    #[test]
    fn occupied_original_path_gets_restored_suffix() {
        let tmp = TempDir::new().unwrap();
        let store = LogStore::open(tmp.path());
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("TXT_250101_0900AM.txt");
        fs::write(&dst, b"renamed").unwrap();
        // Someone re-created a different file at the original path.
        fs::write(&src, b"interloper").unwrap();

        store
            .append(&[LogRecord::now("b1", &src, &dst, LogAction::Rename)])
            .unwrap();

        let report = rollback_last_batch(tmp.path()).unwrap();
        assert_eq!(report.restored, 1);
        assert_eq!(report.relocated.len(), 1);

        let relocated = tmp.path().join("a_restored_1.txt");
        assert!(relocated.exists());
        assert_eq!(fs::read(&relocated).unwrap(), b"renamed");
        assert_eq!(fs::read(&src).unwrap(), b"interloper");
    }

    #[test]
    fn rollback_records_reuse_the_original_batch_id() {
        let tmp = TempDir::new().unwrap();
        let store = LogStore::open(tmp.path());
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("TXT_250101_0900AM.txt");
        fs::write(&dst, b"x").unwrap();

        store
            .append(&[LogRecord::now("b7", &src, &dst, LogAction::Rename)])
            .unwrap();
        rollback_last_batch(tmp.path()).unwrap();

        let records = store.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].batch_id, "b7");
        assert_eq!(records[1].action, LogAction::Rollback);
    }
}
