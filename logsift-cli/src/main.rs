use clap::Parser;
use colored::Colorize;
use logsift::{config::DEFAULT_OUTPUT_ROOT, Session, SessionConfig, SessionEnd, SiftResult};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Interactively filter log files for lines containing a search string
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory for output files
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_ROOT)]
    output_dir: PathBuf,

    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, !cli.no_color);

    // Covers both the session's console notices and the stderr prefix
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(end) => {
            debug!("Session ended: {:?}", end);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{} {}",
                "An error occurred while processing the file:".red(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> SiftResult<SessionEnd> {
    let config = SessionConfig::default().with_output_root(cli.output_dir.clone());

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), config);
    session.run()
}

/// Traces go to stderr so they never interleave with the prompts on stdout.
///
/// Priority: RUST_LOG env var > --log-level.
fn init_tracing(level: &str, ansi: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .compact()
        .init();
}
