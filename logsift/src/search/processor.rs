use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use super::matcher::{split_lines, LineMatcher};
use crate::errors::{SiftError, SiftResult};
use crate::output::build_output_path;
use crate::results::FilterOutcome;

/// Prefix of the first line of every output artifact
pub const HEADER_PREFIX: &str = "Search String: ";

// Constants for output writing
const BUFFER_CAPACITY: usize = 65536;

/// Decodes log bytes, replacing invalid sequences.
///
/// Paths are validated as UTF-8 before they get here, so a replacement means
/// the file changed in between.
fn decode_lossy<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let cow = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = cow {
        warn!("Invalid UTF-8 replaced in file: {}", path.display());
    }
    cow
}

/// Writes the lines of a log file that contain a search string to an output artifact
#[derive(Debug, Clone)]
pub struct LogFilter {
    output_root: PathBuf,
}

impl LogFilter {
    /// Creates a filter writing under `output_root`
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// Where a search over `log_path` at `now` is written
    pub fn output_path(&self, log_path: &Path, search: &str, now: &DateTime<Local>) -> PathBuf {
        build_output_path(&self.output_root, log_path, search, now)
    }

    /// Filters `log_path` for `search` and writes the output artifact.
    ///
    /// The artifact holds a `Search String: <search>` header line followed by
    /// every matching line written back-to-back, with no separator between
    /// them. Any I/O failure is returned as a fatal [`SiftError`].
    pub fn run(
        &self,
        log_path: &Path,
        search: &str,
        now: &DateTime<Local>,
    ) -> SiftResult<FilterOutcome> {
        let output_path = self.output_path(log_path, search, now);
        debug!(
            "Filtering {} for {:?} into {}",
            log_path.display(),
            search,
            output_path.display()
        );

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| SiftError::create_dir(parent, e))?;
        }

        let bytes = fs::read(log_path).map_err(|e| SiftError::read_log(log_path, e))?;
        let content = decode_lossy(&bytes, log_path);
        let lines = split_lines(&content);
        trace!("Split {} into {} lines", log_path.display(), lines.len());

        let matcher = LineMatcher::new(search);
        let matched = matcher.filter(&lines);
        write_artifact(&output_path, matcher.needle(), &matched)?;

        let outcome = FilterOutcome::new(output_path, lines.len(), matched.len());
        debug!(
            "Matched {} of {} lines",
            outcome.lines_matched, outcome.lines_scanned
        );
        Ok(outcome)
    }
}

/// Writes the header line and then `matched` back-to-back
fn write_artifact(path: &Path, search: &str, matched: &[&str]) -> SiftResult<()> {
    let wrap = |e| SiftError::write_output(path, e);

    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::with_capacity(BUFFER_CAPACITY, file);

    writeln!(writer, "{}{}", HEADER_PREFIX, search).map_err(wrap)?;
    for line in matched {
        writer.write_all(line.as_bytes()).map_err(wrap)?;
    }
    writer.flush().map_err(wrap)?;
    Ok(())
}
