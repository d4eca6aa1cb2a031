pub mod config;
pub mod errors;
pub mod filters;
pub mod output;
pub mod results;
pub mod search;
pub mod session;

pub use config::SessionConfig;
pub use errors::{Rejection, SiftError, SiftResult};
pub use results::FilterOutcome;
pub use search::LogFilter;
pub use session::{NextAction, Session, SessionEnd, SessionState, SessionStats};
