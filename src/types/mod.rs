//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `package`: packages, postal codes and per-destination totals
//! - `fee`: tariff entries
//! - `command`: commands parsed from input lines
//! - `validation`: field guards and violation descriptors
//! - `error`: error types for the tracker

pub mod command;
pub mod error;
pub mod fee;
pub mod package;
pub mod validation;

pub use command::{Command, LineKind};
pub use error::TrackerError;
pub use fee::FeeEntry;
pub use package::{DestinationTotal, Package, PostalCode};
pub use validation::{Field, Rule, Violation};
