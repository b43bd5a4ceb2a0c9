//! Session module
//!
//! The command processor that applies text commands to the shared state, and
//! the interactive session that drives it alongside the periodic reporter.

pub mod processor;
pub mod runner;

pub use processor::{CommandProcessor, LoadSummary};
pub use runner::{run_interactive, Session, SessionConfig, SessionEnd, QUIT_COMMAND};
