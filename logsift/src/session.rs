/// The interactive filtering session.
///
/// A session moves between two states:
///
/// ```text
///                  valid path
/// AwaitingFilePath ──────────▶ AwaitingSearchString(path) ──┐
///        ▲                         │            ▲            │ 1: new search
///        └──── 2: change file ─────┘            └────────────┘
///                                  │
///                                  └── 3: exit ──▶ terminated
/// ```
///
/// The console is whatever reader and writer the caller passes in, so the
/// same loop runs against stdin/stdout in the binary and against in-memory
/// buffers in tests:
///
/// ```rust,ignore
/// let stdin = std::io::stdin();
/// let mut session = Session::new(stdin.lock(), std::io::stdout(), SessionConfig::default());
/// match session.run() {
///     Ok(_) => std::process::ExitCode::SUCCESS,
///     Err(e) => { eprintln!("{}", e); std::process::ExitCode::FAILURE }
/// }
/// ```
///
/// Recoverable problems (a rejected path, an unknown menu choice) are
/// reported on the console and the prompt repeats. Fatal I/O errors end the
/// session with `Err`.
use chrono::Local;
use colored::{Color, Colorize};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::errors::{Rejection, SiftResult};
use crate::filters::validate_log_path;
use crate::results::FilterOutcome;
use crate::search::LogFilter;

pub const PROMPT_LOG_PATH: &str = "Enter the log file path:";
pub const PROMPT_SEARCH: &str = "Enter the search string:";
pub const PROMPT_NEXT_ACTION: &str = "Choose the next action:";
pub const MENU_NEW_SEARCH: &str = "1. Enter a new search string";
pub const MENU_CHANGE_FILE: &str = "2. Re-enter the log file path";
pub const MENU_EXIT: &str = "3. Exit";
pub const MSG_INVALID_CHOICE: &str = "Invalid choice. Enter 1, 2, or 3.";
pub const MSG_HIT: &str = "The search string was found.";
pub const MSG_NO_HIT: &str = "The search string was not found.";
pub const MSG_FINISHED: &str = "File output finished.";

/// Where the session is in its prompt cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingFilePath,
    AwaitingSearchString(String),
}

/// Choice made at the next-action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    NewSearch,
    ChangeFile,
    Exit,
}

impl NextAction {
    /// Parses a menu line; only the exact strings "1", "2" and "3" are accepted
    pub fn parse(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::NewSearch),
            "2" => Some(Self::ChangeFile),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// How a session ended without a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user chose exit
    Exited,
    /// Console input reached end of file
    InputClosed,
}

/// Counters for a session, logged when it ends
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub paths_rejected: usize,
    pub files_accepted: usize,
    pub searches_run: usize,
    pub searches_with_hits: usize,
}

impl SessionStats {
    fn record_search(&mut self, outcome: &FilterOutcome) {
        self.searches_run += 1;
        if outcome.is_hit() {
            self.searches_with_hits += 1;
        }
    }
}

/// Interactive session over an injected console
pub struct Session<R, W> {
    input: R,
    output: W,
    config: SessionConfig,
    filter: LogFilter,
    stats: SessionStats,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        let filter = LogFilter::new(config.output_root.clone());
        Self {
            input,
            output,
            config,
            filter,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Consumes the session, returning the console writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the prompt cycle until the user exits or input closes
    pub fn run(&mut self) -> SiftResult<SessionEnd> {
        let mut state = SessionState::AwaitingFilePath;

        let end = loop {
            state = match state {
                SessionState::AwaitingFilePath => match self.prompt_for_log_path()? {
                    Some(path) => SessionState::AwaitingSearchString(path),
                    None => break SessionEnd::InputClosed,
                },
                SessionState::AwaitingSearchString(path) => {
                    if !self.prompt_and_process_search(&path)? {
                        break SessionEnd::InputClosed;
                    }
                    match self.prompt_for_next_action()? {
                        Some(NextAction::NewSearch) => SessionState::AwaitingSearchString(path),
                        Some(NextAction::ChangeFile) => SessionState::AwaitingFilePath,
                        Some(NextAction::Exit) => break SessionEnd::Exited,
                        None => break SessionEnd::InputClosed,
                    }
                }
            };
        };

        if end == SessionEnd::InputClosed {
            info!("Console input closed; ending session");
        }
        info!(
            "Session summary: {} paths rejected, {} files accepted, {} searches, {} with hits",
            self.stats.paths_rejected,
            self.stats.files_accepted,
            self.stats.searches_run,
            self.stats.searches_with_hits
        );
        Ok(end)
    }

    /// Prompts until a valid log file path is entered.
    ///
    /// Returns `None` when input closes first.
    pub fn prompt_for_log_path(&mut self) -> SiftResult<Option<String>> {
        loop {
            self.say(PROMPT_LOG_PATH)?;
            let Some(raw) = self.read_line()? else {
                return Ok(None);
            };

            match validate_log_path(&raw) {
                Ok(()) => {
                    self.stats.files_accepted += 1;
                    debug!("Using log file {}", raw);
                    return Ok(Some(raw));
                }
                Err(rejection) => {
                    self.stats.paths_rejected += 1;
                    self.report_rejection(rejection)?;
                }
            }
        }
    }

    /// Reads one search string and filters `log_path` with it.
    ///
    /// Returns false when input closes before a search string arrives.
    pub fn prompt_and_process_search(&mut self, log_path: &str) -> SiftResult<bool> {
        self.say(PROMPT_SEARCH)?;
        let Some(search) = self.read_line()? else {
            return Ok(false);
        };

        let outcome = self.filter.run(Path::new(log_path), &search, &Local::now())?;
        info!("Wrote {}", outcome.output_path.display());
        self.stats.record_search(&outcome);

        if outcome.is_hit() {
            self.say_colored(MSG_HIT, Color::Green)?;
        } else {
            self.say_colored(MSG_NO_HIT, Color::Yellow)?;
        }
        self.say(MSG_FINISHED)?;
        Ok(true)
    }

    /// Shows the menu and reads until a valid choice arrives.
    ///
    /// Returns `None` when input closes first.
    pub fn prompt_for_next_action(&mut self) -> SiftResult<Option<NextAction>> {
        self.say(PROMPT_NEXT_ACTION)?;
        self.say(MENU_NEW_SEARCH)?;
        self.say(MENU_CHANGE_FILE)?;
        self.say(MENU_EXIT)?;

        loop {
            let Some(choice) = self.read_line()? else {
                return Ok(None);
            };
            match NextAction::parse(&choice) {
                Some(action) => {
                    debug!("Next action: {:?}", action);
                    return Ok(Some(action));
                }
                None => self.say_colored(MSG_INVALID_CHOICE, Color::Red)?,
            }
        }
    }

    fn report_rejection(&mut self, rejection: Rejection) -> SiftResult<()> {
        self.say_colored(&rejection.to_string(), Color::Yellow)
    }

    /// Reads one console line without its `\n` or `\r\n` terminator.
    ///
    /// Bytes that are not UTF-8 are replaced rather than failing the read, so
    /// a mistyped line gets the normal recoverable handling.
    fn read_line(&mut self) -> SiftResult<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }

        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => {
                warn!("Invalid UTF-8 replaced in console input");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(line))
    }

    fn say(&mut self, text: &str) -> SiftResult<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn say_colored(&mut self, text: &str, color: Color) -> SiftResult<()> {
        if self.config.use_color {
            let painted = text.color(color).to_string();
            self.say(&painted)
        } else {
            self.say(text)
        }
    }
}
