use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File extensions that can carry an embedded capture timestamp.
const EXIF_EXTENSIONS: &[&str] = &["jpg", "jpeg", "tif", "tiff", "png", "webp", "heic", "heif"];

/// Filesystem timestamps for a file, reduced to second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    pub modified: NaiveDateTime,
    pub created: NaiveDateTime,
}

/// Immutable snapshot of a filesystem object taken at scan time.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub times: FileTimes,
    pub embedded: Option<NaiveDateTime>,
    pub extension: Option<String>,
}

impl FileEntry {
    /// Snapshot a file. Never fails: unreadable metadata degrades to the
    /// current time, unreadable or absent embedded metadata to `None`.
    pub fn snapshot(path: &Path) -> Self {
        let times = match fs::metadata(path) {
            Ok(meta) => file_times(&meta),
            Err(_) => {
                let now = truncate_seconds(Local::now().naive_local());
                FileTimes {
                    modified: now,
                    created: now,
                }
            },
        };

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .filter(|e| !e.is_empty());

        let embedded = if supports_embedded_metadata(extension.as_deref()) {
            embedded_timestamp(path)
        } else {
            None
        };

        Self {
            path: path.to_path_buf(),
            times,
            embedded,
            extension,
        }
    }
}

/// Pick the best timestamp for a file entry. Never fails.
pub fn resolve(entry: &FileEntry) -> NaiveDateTime {
    choose(entry.embedded, entry.times)
}

/// The decision rule, separated from filesystem access so it can be tested
/// with injected times.
///
/// With an embedded timestamp, the modification time wins only when it is
/// strictly earlier than both the embedded time and the creation time. This
/// guards against metadata claiming a capture time later than the file's
/// actual edit history. Without one, the earlier of the two filesystem times
/// wins.
pub fn choose(embedded: Option<NaiveDateTime>, times: FileTimes) -> NaiveDateTime {
    match embedded {
        Some(capture) => {
            if times.modified < capture && times.modified < times.created {
                times.modified
            } else {
                capture
            }
        },
        None => times.modified.min(times.created),
    }
}

/// Read modification and creation times from metadata.
///
/// Creation time is platform-dependent: where the filesystem reports no true
/// birth time, the last metadata-change time stands in for it on Unix.
pub fn file_times(meta: &fs::Metadata) -> FileTimes {
    let now = Local::now().naive_local();
    let modified = meta
        .modified()
        .map_or(now, system_time_to_local);
    let created = creation_time(meta).map_or(modified, system_time_to_local);
    FileTimes {
        modified: truncate_seconds(modified),
        created: truncate_seconds(created),
    }
}

fn creation_time(meta: &fs::Metadata) -> Option<SystemTime> {
    if let Ok(birth) = meta.created() {
        return Some(birth);
    }
    change_time(meta)
}

#[cfg(unix)]
fn change_time(meta: &fs::Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::{Duration, UNIX_EPOCH};
    let secs = u64::try_from(meta.ctime()).ok()?;
    Some(UNIX_EPOCH + Duration::from_secs(secs))
}

#[cfg(not(unix))]
fn change_time(_meta: &fs::Metadata) -> Option<SystemTime> {
    None
}

fn system_time_to_local(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

fn truncate_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

fn supports_embedded_metadata(extension: Option<&str>) -> bool {
    extension.is_some_and(|ext| {
        let lower = ext.to_ascii_lowercase();
        EXIF_EXTENSIONS.contains(&lower.as_str())
    })
}

/// Read the capture time embedded in an image, trying `DateTimeOriginal`,
/// then `DateTimeDigitized`, then `DateTime`. Any failure yields `None`.
fn embedded_timestamp(path: &Path) -> Option<NaiveDateTime> {
    let file = fs::File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let data = exif::Reader::new().read_from_container(&mut reader).ok()?;

    for tag in [
        exif::Tag::DateTimeOriginal,
        exif::Tag::DateTimeDigitized,
        exif::Tag::DateTime,
    ] {
        if let Some(field) = data.get_field(tag, exif::In::PRIMARY) {
            if let Some(parsed) = parse_exif_datetime(&field.value) {
                return Some(parsed);
            }
        }
    }
    None
}

fn parse_exif_datetime(value: &exif::Value) -> Option<NaiveDateTime> {
    match value {
        exif::Value::Ascii(chunks) => {
            let raw = chunks.first()?;
            let text = std::str::from_utf8(raw).ok()?;
            NaiveDateTime::parse_from_str(text.trim(), "%Y:%m:%d %H:%M:%S").ok()
        },
        _ => None,
    }
}
