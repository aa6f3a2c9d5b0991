use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Prefix used when a file has no extension.
pub const FALLBACK_PREFIX: &str = "FILE";

/// Format a timestamp as `YYMMDD_HHMMAM` / `YYMMDD_HHMMPM`.
///
/// Two-digit components throughout, 12-hour clock, uppercase meridiem.
pub fn format_stamp(timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}",
        timestamp.format("%y%m%d"),
        timestamp.format("%I%M%p")
    )
}

/// Build a canonical filename for a timestamp and original extension,
/// avoiding every name in `used_names`.
///
/// The shape is `<PREFIX>_<YYMMDD>_<HHMMAMPM>[_<N>]<.ext>` where PREFIX is
/// the uppercased extension and N is the smallest positive integer that
/// makes the name unused. The chosen name is reserved in `used_names` before
/// returning, so a single planning pass can never hand out the same name
/// twice even though nothing has been written to disk yet.
pub fn synthesize(
    timestamp: NaiveDateTime,
    extension: Option<&str>,
    used_names: &mut HashSet<String>,
) -> String {
    let extension = extension.filter(|e| !e.is_empty());
    let prefix = extension.map_or_else(|| FALLBACK_PREFIX.to_string(), str::to_uppercase);
    let suffix = extension.map_or_else(String::new, |e| format!(".{}", e.to_lowercase()));

    let base = format!("{}_{}", prefix, format_stamp(timestamp));
    let mut candidate = format!("{base}{suffix}");
    let mut n = 1;
    while used_names.contains(&candidate) {
        candidate = format!("{base}_{n}{suffix}");
        n += 1;
    }

    used_names.insert(candidate.clone());
    candidate
}
