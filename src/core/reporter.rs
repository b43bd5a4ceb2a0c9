//! Periodic report emission
//!
//! The `Reporter` renders the registry totals to a [`ReportSink`] once when it
//! starts and then once per interval until it is stopped.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start()--> Running --stop()--> Stopped
//!   \________________stop()________________/
//! ```
//!
//! `Stopped` is terminal. `stop()` only signals a cancellation token: it does
//! not wait for the background task, and a sleeping task wakes up and exits
//! without emitting again.
//!
//! # Error Handling
//!
//! A sink failure is logged and the loop keeps going; the next tick tries
//! again with the same sink. A report whose totals cannot be computed is
//! skipped with a warning in the same way.

use crate::core::fee_table::FeeTable;
use crate::core::registry::PackageRegistry;
use crate::core::traits::ReportSink;
use crate::io::report_format::render_report;
use crate::types::TrackerError;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default time between two reports
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(60);

/// Observable reporter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterState {
    Idle,
    Running,
    Stopped,
}

impl fmt::Display for ReporterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReporterState::Idle => write!(f, "idle"),
            ReporterState::Running => write!(f, "running"),
            ReporterState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Internal phase; the sink lives here until the background task takes it
enum Phase {
    Idle(Box<dyn ReportSink>),
    Running,
    Stopped,
}

impl Phase {
    fn state(&self) -> ReporterState {
        match self {
            Phase::Idle(_) => ReporterState::Idle,
            Phase::Running => ReporterState::Running,
            Phase::Stopped => ReporterState::Stopped,
        }
    }
}

/// Periodic reporter over a shared registry and fee table
pub struct Reporter {
    registry: Arc<PackageRegistry>,
    fees: Arc<FeeTable>,
    interval: Duration,
    phase: Mutex<Phase>,
    cancel: CancellationToken,
}

impl Reporter {
    /// Create an idle reporter writing to `sink` every `interval`
    pub fn new(
        registry: Arc<PackageRegistry>,
        fees: Arc<FeeTable>,
        interval: Duration,
        sink: impl ReportSink + 'static,
    ) -> Self {
        Self {
            registry,
            fees,
            interval,
            phase: Mutex::new(Phase::Idle(Box::new(sink))),
            cancel: CancellationToken::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ReporterState {
        self.phase
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
    }

    /// Emit the first report right away and schedule the following ones
    ///
    /// Must be called from within a tokio runtime. The returned handle
    /// completes once the reporter has been stopped; awaiting it is optional.
    ///
    /// # Errors
    ///
    /// - `TrackerError::ReporterTransition` if the reporter is not idle
    /// - `TrackerError::Runtime` if no tokio runtime is available
    pub fn start(&self) -> Result<JoinHandle<()>, TrackerError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| TrackerError::Runtime {
            message: e.to_string(),
        })?;

        let mut sink = {
            let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
            match std::mem::replace(&mut *phase, Phase::Running) {
                Phase::Idle(sink) => sink,
                other => {
                    let state = other.state();
                    *phase = other;
                    return Err(TrackerError::ReporterTransition { state });
                }
            }
        };

        info!(interval_secs = self.interval.as_secs_f64(), "reporter started");
        emit_report(&self.registry, &self.fees, sink.as_mut());

        let registry = Arc::clone(&self.registry);
        let fees = Arc::clone(&self.fees);
        let cancel = self.cancel.clone();
        let period = self.interval;

        Ok(runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if cancel.is_cancelled() {
                            break;
                        }
                        emit_report(&registry, &fees, sink.as_mut());
                    }
                }
            }

            debug!("reporter task finished");
        }))
    }

    /// Stop emitting reports
    ///
    /// Idempotent and non-blocking. Stopping an idle reporter moves it
    /// straight to `Stopped`.
    pub fn stop(&self) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if !matches!(*phase, Phase::Stopped) {
            *phase = Phase::Stopped;
            info!("reporter stopped");
        }
        self.cancel.cancel();
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("interval", &self.interval)
            .field("state", &self.state())
            .finish()
    }
}

fn emit_report(registry: &PackageRegistry, fees: &FeeTable, sink: &mut dyn ReportSink) {
    let totals = match registry.aggregate(fees) {
        Ok(totals) => totals,
        Err(e) => {
            warn!(error = %e, "report skipped");
            return;
        }
    };
    let report = render_report(&totals);

    if let Err(e) = sink.emit(&report) {
        warn!(error = %e, "failed to emit report");
    }
}
