/// Line filtering over a single log file.
///
/// [`matcher`] decides which lines match and how content is split into
/// lines; [`processor`] reads the log file and writes the output artifact.
pub mod matcher;
pub mod processor;

pub use matcher::{split_lines, LineMatcher};
pub use processor::{LogFilter, HEADER_PREFIX};
