//! Command processor
//!
//! Turns text lines into registry and fee table mutations. Every line is
//! handled in isolation: a rejected line leaves the shared state exactly as it
//! was and never affects the lines around it.

use crate::core::{FeeTable, PackageRegistry};
use crate::io::line_format::parse_line;
use crate::io::line_reader::LineReader;
use crate::types::{Command, LineKind, TrackerError};
use std::path::Path;
use std::sync::Arc;
use tracing::error;

/// Outcome of loading one command file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Lines that were applied
    pub applied: usize,
    /// Lines that were rejected (and logged)
    pub rejected: usize,
}

/// Applies package and fee commands to the shared state
#[derive(Debug, Clone)]
pub struct CommandProcessor {
    registry: Arc<PackageRegistry>,
    fees: Arc<FeeTable>,
}

impl CommandProcessor {
    pub fn new(registry: Arc<PackageRegistry>, fees: Arc<FeeTable>) -> Self {
        Self { registry, fees }
    }

    /// Parse one line of the given kind and apply it
    ///
    /// # Errors
    ///
    /// Returns the parse or validation error for the line. Nothing is stored
    /// when an error is returned.
    pub fn execute(&self, kind: LineKind, line: &str) -> Result<(), TrackerError> {
        match parse_line(kind, line)? {
            Command::InsertPackage {
                weight_kg,
                postal_code,
            } => self.registry.insert(weight_kg, &postal_code),
            Command::InsertFee { threshold_kg, fee } => self.fees.insert(threshold_kg, fee),
        }
    }

    /// Apply every non-blank line of a command file
    ///
    /// Rejected lines are logged with their line number and skipped.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileLoad` if the file cannot be opened or a read
    /// fails part way through. Lines applied before the failure stay applied.
    pub fn load_file(&self, path: &Path, kind: LineKind) -> Result<LoadSummary, TrackerError> {
        let reader = LineReader::open(path, kind)?;
        let mut summary = LoadSummary::default();

        for line in reader {
            let line = line?;
            match self.execute(kind, &line.text) {
                Ok(()) => summary.applied += 1,
                Err(e) => {
                    error!(file = %path.display(), line = line.number, "{}", e);
                    summary.rejected += 1;
                }
            }
        }

        Ok(summary)
    }
}
