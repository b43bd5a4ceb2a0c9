//! I/O module
//!
//! Handles command line parsing, file reading and report output.
//!
//! # Components
//!
//! - `line_format` - Command line format handling (token count, numeric fields)
//! - `line_reader` - Streaming reader over the non-blank lines of a load file
//! - `report_format` - Report text rendering

pub mod line_format;
pub mod line_reader;
pub mod report_format;

pub use line_format::parse_line;
pub use line_reader::{LineReader, NumberedLine};
pub use report_format::{render_report, render_totals};
