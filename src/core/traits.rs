//! Core traits
//!
//! This module defines the seams between the core components and whatever
//! consumes their output.

use std::io::{self, Write};

/// Destination for rendered reports
///
/// Every `std::io::Write + Send` type is a sink: the report is written in one
/// piece and flushed so it shows up immediately on a console.
pub trait ReportSink: Send {
    /// Deliver one complete report
    fn emit(&mut self, report: &str) -> io::Result<()>;
}

impl<W: Write + Send> ReportSink for W {
    fn emit(&mut self, report: &str) -> io::Result<()> {
        self.write_all(report.as_bytes())?;
        self.flush()
    }
}
