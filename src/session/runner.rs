//! Interactive session
//!
//! Wires the shared state, the command processor and the reporter together:
//!
//! ```text
//! Session::run
//!     ├── load initial package file (optional)
//!     ├── load initial fee file (optional)
//!     ├── Reporter::start (first report right away)
//!     ├── read package commands until `quit`, end of input or a read failure
//!     └── Reporter::stop
//! ```
//!
//! # Error Handling
//!
//! Rejected commands and failed file loads are logged and the session goes on.
//! Only a failure of the input stream itself (or of the runtime) ends the
//! session with an error.

use crate::core::{FeeTable, PackageRegistry, ReportSink, Reporter, DEFAULT_REPORT_INTERVAL};
use crate::session::processor::CommandProcessor;
use crate::types::{LineKind, TrackerError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

/// Input line that ends the session
pub const QUIT_COMMAND: &str = "quit";

/// Session configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Initial package file loaded before the first report
    pub packages_file: Option<PathBuf>,
    /// Initial fee file loaded before the first report
    pub fees_file: Option<PathBuf>,
    /// Time between two reports
    pub report_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            packages_file: None,
            fees_file: None,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

impl SessionConfig {
    /// Create a SessionConfig, falling back to the default interval for a zero one
    pub fn new(
        packages_file: Option<PathBuf>,
        fees_file: Option<PathBuf>,
        report_interval: Duration,
    ) -> Self {
        let report_interval = if report_interval.is_zero() {
            warn!(
                default_secs = DEFAULT_REPORT_INTERVAL.as_secs(),
                "Invalid report interval (0), using default"
            );
            DEFAULT_REPORT_INTERVAL
        } else {
            report_interval
        };

        Self {
            packages_file,
            fees_file,
            report_interval,
        }
    }
}

/// How a session that did not fail came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A `quit` line was read
    Quit,
    /// The input was exhausted
    EndOfInput,
}

/// One run of the tracker over shared registry and fee table
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    registry: Arc<PackageRegistry>,
    fees: Arc<FeeTable>,
    processor: CommandProcessor,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let registry = Arc::new(PackageRegistry::new());
        let fees = Arc::new(FeeTable::new());
        let processor = CommandProcessor::new(Arc::clone(&registry), Arc::clone(&fees));

        Self {
            config,
            registry,
            fees,
            processor,
        }
    }

    pub fn registry(&self) -> &Arc<PackageRegistry> {
        &self.registry
    }

    pub fn fees(&self) -> &Arc<FeeTable> {
        &self.fees
    }

    /// Load the configured initial files, packages first
    ///
    /// A file that cannot be read is logged; the session continues without
    /// the remainder of that file.
    pub fn load_initial_files(&self) {
        if let Some(path) = &self.config.packages_file {
            self.load_initial(path, LineKind::Package);
        }
        if let Some(path) = &self.config.fees_file {
            self.load_initial(path, LineKind::Fee);
        }
    }

    fn load_initial(&self, path: &Path, kind: LineKind) {
        match self.processor.load_file(path, kind) {
            Ok(summary) => {
                let message = match kind {
                    LineKind::Package => "Initial packages loaded",
                    LineKind::Fee => "Initial fees loaded",
                };
                info!(
                    file = %path.display(),
                    applied = summary.applied,
                    rejected = summary.rejected,
                    "{}",
                    message
                );
            }
            Err(e) => error!("{}", e),
        }
    }

    /// Run the session until `quit`, end of input or an input failure
    ///
    /// Reports go to `sink`. Must be awaited inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// - `TrackerError::InputStream` if reading `input` fails; the reporter is
    ///   stopped before returning
    /// - `TrackerError::Runtime` if the reporter cannot be started
    pub async fn run<R, S>(&self, input: R, sink: S) -> Result<SessionEnd, TrackerError>
    where
        R: AsyncBufRead + Unpin,
        S: ReportSink + 'static,
    {
        self.load_initial_files();

        let reporter = Reporter::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.fees),
            self.config.report_interval,
            sink,
        );
        let handle = reporter.start()?;

        let outcome = self.read_commands(input).await;

        reporter.stop();
        if let Err(e) = handle.await {
            warn!(error = %e, "reporter task did not finish cleanly");
        }

        outcome
    }

    /// Lines that are not valid UTF-8 are decoded lossily and rejected by the
    /// parser like any other malformed command
    async fn read_commands<R>(&self, mut input: R) -> Result<SessionEnd, TrackerError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut raw = Vec::new();

        loop {
            raw.clear();
            if input.read_until(b'\n', &mut raw).await? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&raw);
            let command = line.trim();
            if command.is_empty() {
                continue;
            }
            if command == QUIT_COMMAND {
                debug!("quit command received");
                return Ok(SessionEnd::Quit);
            }

            if let Err(e) = self.processor.execute(LineKind::Package, command) {
                error!("{}", e);
            }
        }

        debug!("end of input");
        Ok(SessionEnd::EndOfInput)
    }
}

/// Run a session over standard input and standard output
///
/// Builds the multi-threaded runtime the reporter and the input loop share.
///
/// # Errors
///
/// - `TrackerError::Runtime` if the runtime cannot be built
/// - any fatal error returned by [`Session::run`]
pub fn run_interactive(config: SessionConfig) -> Result<SessionEnd, TrackerError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| TrackerError::Runtime {
            message: format!("Failed to create tokio runtime: {}", e),
        })?;

    let session = Session::new(config);
    let end = runtime.block_on(session.run(BufReader::new(tokio::io::stdin()), std::io::stdout()));

    // stdin reads run on a blocking thread that may still be parked
    runtime.shutdown_background();
    end
}
