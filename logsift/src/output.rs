use chrono::{DateTime, Local};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Characters that may not appear in a directory name on every platform
pub const FORBIDDEN_DIR_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// chrono format of the output file stem, `YYYYMMDDHHMMSS`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Extension of every output artifact
pub const OUTPUT_EXTENSION: &str = "txt";

/// Returns true when `search` cannot be used as a directory name
pub fn contains_forbidden_chars(search: &str) -> bool {
    search.contains(FORBIDDEN_DIR_CHARS)
}

/// Formats `now` as the fixed-width output file stem
pub fn format_timestamp(now: &DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds `<root>/<log file name>/[<search>/]<timestamp>.txt`.
///
/// The search segment is `search` itself, dropped when it holds a forbidden
/// character. Pushing an empty segment leaves the path unchanged.
pub fn build_output_path(
    output_root: &Path,
    log_path: &Path,
    search: &str,
    now: &DateTime<Local>,
) -> PathBuf {
    let log_name = log_path
        .file_name()
        .unwrap_or_else(|| log_path.as_os_str());
    let file_name = format!("{}.{}", format_timestamp(now), OUTPUT_EXTENSION);

    let mut path = output_root.join(log_name);
    if !contains_forbidden_chars(search) {
        path.push(OsStr::new(search));
    }
    path.push(file_name);
    path
}
