use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Name of the audit log kept inside each target root.
pub const LOG_FILE_NAME: &str = "rename_log.csv";

/// UTF-8 byte-order mark, written once at file creation for spreadsheet
/// compatibility.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// What happened to one operation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogAction {
    Rename,
    SkipMissingSrc,
    Error(String),
    Rollback,
    RollbackMissingDst,
    RollbackFailed(String),
}

impl LogAction {
    pub fn is_rename(&self) -> bool {
        matches!(self, Self::Rename)
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename => f.write_str("rename"),
            Self::SkipMissingSrc => f.write_str("skip_missing_src"),
            Self::Error(detail) => write!(f, "error:{detail}"),
            Self::Rollback => f.write_str("rollback"),
            Self::RollbackMissingDst => f.write_str("rollback_missing_dst"),
            Self::RollbackFailed(detail) => write!(f, "rollback_failed:{detail}"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unrecognized log action: {0:?}")]
pub struct ParseActionError(String);

impl FromStr for LogAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rename" => Ok(Self::Rename),
            "skip_missing_src" => Ok(Self::SkipMissingSrc),
            "rollback" => Ok(Self::Rollback),
            "rollback_missing_dst" => Ok(Self::RollbackMissingDst),
            _ => {
                if let Some(detail) = s.strip_prefix("error:") {
                    Ok(Self::Error(detail.to_string()))
                } else if let Some(detail) = s.strip_prefix("rollback_failed:") {
                    Ok(Self::RollbackFailed(detail.to_string()))
                } else {
                    Err(ParseActionError(s.to_string()))
                }
            },
        }
    }
}

/// One row of the audit log. `timestamp` is when the record was produced,
/// not the file's resolved capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub batch_id: String,
    pub timestamp: String,
    pub src: String,
    pub dst: String,
    #[serde(with = "action_string")]
    pub action: LogAction,
}

impl LogRecord {
    /// Build a record stamped with the current local time.
    pub fn now(batch_id: &str, src: &Path, dst: &Path, action: LogAction) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
            src: src.display().to_string(),
            dst: dst.display().to_string(),
            action,
        }
    }
}

mod action_string {
    use super::LogAction;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(action: &LogAction, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&action.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LogAction, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Append-only CSV store for one target root. Prior rows are never rewritten
/// or truncated; every mutation is an append.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn open(root: &Path) -> Self {
        Self {
            path: root.join(LOG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append records, creating the file with a BOM and header row first if
    /// it does not exist yet. Appending nothing leaves the filesystem alone.
    pub fn append(&self, records: &[LogRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let is_new = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file: {}", self.path.display()))?;
        if is_new {
            file.write_all(UTF8_BOM)
                .with_context(|| format!("Failed to write log file: {}", self.path.display()))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        for record in records {
            writer
                .serialize(record)
                .with_context(|| format!("Failed to write log file: {}", self.path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush log file: {}", self.path.display()))?;
        Ok(())
    }

    /// All records in file order, oldest first. A missing log is an empty
    /// one.
    pub fn read_all(&self) -> Result<Vec<LogRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to read log file: {}", self.path.display()))?;
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

        let mut reader = csv::Reader::from_reader(body);
        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(
                record.with_context(|| {
                    format!("Malformed log record in {}", self.path.display())
                })?,
            );
        }
        Ok(records)
    }
}
