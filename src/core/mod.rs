//! Core business logic module
//!
//! This module contains the in-memory tracking components:
//! - `traits` - Seams between the core and its consumers
//! - `fee_table` - Weight threshold to fee lookup
//! - `registry` - Packages grouped by destination, aggregation
//! - `reporter` - Periodic report emission

pub mod fee_table;
pub mod registry;
pub mod reporter;
pub mod traits;

pub use fee_table::{FeeSchedule, FeeTable};
pub use registry::PackageRegistry;
pub use reporter::{Reporter, ReporterState, DEFAULT_REPORT_INTERVAL};
pub use traits::ReportSink;
