/// Matches log lines against a plain search string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatcher {
    needle: String,
}

impl LineMatcher {
    /// Creates a matcher for the given search string, taken verbatim
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    /// The search string this matcher looks for
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Case-sensitive substring containment; the empty string matches every line
    pub fn is_match(&self, line: &str) -> bool {
        line.contains(self.needle.as_str())
    }

    /// Returns the matching lines of `lines`, in order
    pub fn filter<'a>(&self, lines: &[&'a str]) -> Vec<&'a str> {
        lines
            .iter()
            .copied()
            .filter(|line| self.is_match(line))
            .collect()
    }
}

/// Splits log content into lines on `\n` only.
///
/// Content without any `\n` is a single line, so empty content yields one
/// empty line. Otherwise trailing empty segments are dropped. `\r` is kept.
pub fn split_lines(content: &str) -> Vec<&str> {
    if !content.contains('\n') {
        return vec![content];
    }

    let mut lines: Vec<&str> = content.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}
