/// Validation of candidate log file paths.
///
/// A path is accepted only when every check passes:
///
/// 1. it exists and is not a directory
/// 2. its text ends with [`LOG_EXTENSION`]
/// 3. its full contents decode as UTF-8
///
/// When a path is rejected exactly one reason is reported. The reason comes
/// from [`DIAGNOSTIC_ORDER`], walked top to bottom; the first check that
/// fails wins. A directory cannot be read, so a directory named
/// `something.log` is reported as not UTF-8. [`Rejection::Invalid`] is left
/// for a path that failed acceptance but passes every check when diagnosed,
/// such as a file that appeared in between.
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use crate::errors::Rejection;

/// Required suffix of a log file path
pub const LOG_EXTENSION: &str = ".log";

/// A single validation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Exists,
    Extension,
    Utf8,
}

/// Checks paired with the rejection reported when they fail, in report order
pub const DIAGNOSTIC_ORDER: [(Check, Rejection); 3] = [
    (Check::Exists, Rejection::NotFound),
    (Check::Extension, Rejection::WrongExtension),
    (Check::Utf8, Rejection::NotUtf8),
];

impl Check {
    /// Returns true when `raw` passes this check
    pub fn passes(self, raw: &str) -> bool {
        let path = Path::new(raw);
        match self {
            Check::Exists => path.exists(),
            Check::Extension => has_log_extension(raw),
            Check::Utf8 => is_valid_utf8(path),
        }
    }
}

/// Checks the path text, not the parsed extension, so a file named `.log` passes
pub fn has_log_extension(raw: &str) -> bool {
    raw.ends_with(LOG_EXTENSION)
}

/// Returns true when the whole file decodes as UTF-8.
///
/// Read failures count as invalid.
pub fn is_valid_utf8(path: &Path) -> bool {
    match fs::read(path) {
        Ok(bytes) => std::str::from_utf8(&bytes).is_ok(),
        Err(e) => {
            trace!("Could not read {} for UTF-8 check: {}", path.display(), e);
            false
        }
    }
}

/// Returns true when `raw` names a file that may be filtered
pub fn is_acceptable(raw: &str) -> bool {
    let path = Path::new(raw);
    path.exists() && !path.is_dir() && has_log_extension(raw) && is_valid_utf8(path)
}

/// Picks the single reason reported for a rejected path
pub fn diagnose(raw: &str) -> Rejection {
    DIAGNOSTIC_ORDER
        .iter()
        .find(|(check, _)| !check.passes(raw))
        .map(|&(_, rejection)| rejection)
        .unwrap_or(Rejection::Invalid)
}

/// Validates a path typed by the user
pub fn validate_log_path(raw: &str) -> Result<(), Rejection> {
    if is_acceptable(raw) {
        trace!("Accepted log file path: {}", raw);
        return Ok(());
    }

    let rejection = diagnose(raw);
    debug!("Rejected log file path {:?}: {:?}", raw, rejection);
    Err(rejection)
}
