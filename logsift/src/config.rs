use std::path::PathBuf;

/// Directory under which output trees are created when nothing else is given
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// Settings for an interactive filtering session.
///
/// There are no configuration files: the CLI fills this in from its
/// command-line arguments and everything else falls back to [`Default`].
///
/// ```rust,ignore
/// let config = SessionConfig {
///     output_root: PathBuf::from("results"),
///     ..SessionConfig::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Root of the derived output tree (`<root>/<log name>/[<search>/]<ts>.txt`)
    pub output_root: PathBuf,

    /// Whether console messages are colored
    pub use_color: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            use_color: true,
        }
    }
}

impl SessionConfig {
    /// Replaces the output root
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Turns colored console output on or off
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }
}
