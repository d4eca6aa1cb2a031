use std::path::PathBuf;

/// Summary of one filter step over a log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Where the output artifact was written
    pub output_path: PathBuf,
    /// Number of lines the log file was split into
    pub lines_scanned: usize,
    /// Number of lines that contained the search string
    pub lines_matched: usize,
}

impl FilterOutcome {
    pub fn new(output_path: PathBuf, lines_scanned: usize, lines_matched: usize) -> Self {
        Self {
            output_path,
            lines_scanned,
            lines_matched,
        }
    }

    /// True when at least one line matched
    pub fn is_hit(&self) -> bool {
        self.lines_matched > 0
    }
}
