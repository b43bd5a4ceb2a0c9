//! Parcel Tally Library
//! # Overview
//!
//! This library tracks parcels by destination postal code and periodically
//! reports the total weight (and, when a fee table is loaded, the total fee)
//! sent to every destination.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Package, FeeEntry, errors, validation rules)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::registry`] - Packages grouped by destination and their aggregation
//!   - [`core::fee_table`] - Weight thresholds and the fee each one incurs
//!   - [`core::reporter`] - Periodic report emission
//! - [`io`] - Line parsing, file loading and report rendering
//! - [`session`] - Command processing and the interactive session
//! - [`logging`] - Diagnostic output setup
//!
//! # Report Format
//!
//! ```text
//! Packages:
//! 08801 15.960 5.00
//! 08079 5.500 2.50
//!
//! ```
//!
//! Destinations are ordered by total weight, heaviest first; equal weights keep
//! ascending postal code order. The fee column is present only when the fee
//! table is not empty, and `none` replaces the lines when nothing has been
//! registered.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod session;
pub mod types;

pub use core::{FeeTable, PackageRegistry, ReportSink, Reporter, ReporterState};
pub use io::render_report;
pub use session::{CommandProcessor, Session, SessionConfig, SessionEnd};
pub use types::{DestinationTotal, FeeEntry, Package, PostalCode, TrackerError};
