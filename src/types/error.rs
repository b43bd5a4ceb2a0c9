//! Error types for the package tracker
//!
//! This module defines all error types that can occur while reading commands,
//! loading files, and running the periodic reporter.
//!
//! # Error Categories
//!
//! - **Parse Errors**: wrong token count, non-numeric field
//! - **Validation Errors**: a field violates a domain constraint
//! - **Resource Errors**: an initial load file is missing or unreadable
//! - **Stream Errors**: the interactive input stream failed
//! - **Range Errors**: a destination total no longer fits a `Decimal`
//!
//! Everything except a stream error is recoverable: the offending command (or
//! the rest of one file) is dropped and processing continues.

use super::command::LineKind;
use super::package::PostalCode;
use super::validation::{format_violations, Field, Violation};
use crate::core::reporter::ReporterState;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the package tracker
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// A line did not split into the expected number of tokens
    ///
    /// Recoverable: the line is dropped.
    #[error("{expected} input parameters expected per {kind} line, got {found}")]
    WrongFieldCount {
        kind: LineKind,
        expected: usize,
        found: usize,
    },

    /// A numeric token could not be read as a decimal number
    ///
    /// Recoverable: the line is dropped.
    #[error("{field} in {kind} line should be a decimal number, is '{value}'")]
    InvalidNumber {
        kind: LineKind,
        /// Name of the token ("weight" or "fee")
        field: &'static str,
        /// The token as written
        value: String,
    },

    /// A package failed one or more field guards
    ///
    /// Recoverable: nothing is stored.
    #[error("Package {weight} kg => {postal_code} is invalid: {}", format_violations(violations))]
    InvalidPackage {
        weight: String,
        postal_code: String,
        violations: Vec<Violation>,
    },

    /// A fee entry failed one or more field guards
    ///
    /// Recoverable: nothing is stored.
    #[error("Fee {threshold} kg => {fee} EUR is invalid: {}", format_violations(violations))]
    InvalidFee {
        threshold: String,
        fee: String,
        violations: Vec<Violation>,
    },

    /// An initial load file could not be read
    ///
    /// Recoverable at process level: the rest of that file is skipped.
    #[error("Unable to load initial {kind}s from file {path}: {message}")]
    FileLoad {
        kind: LineKind,
        path: String,
        message: String,
    },

    /// The interactive input stream failed
    ///
    /// Fatal for the session loop.
    #[error("Input stream error: {message}")]
    InputStream { message: String },

    /// A destination total does not fit a `Decimal`
    ///
    /// The report that needed it is skipped.
    #[error("{field} total for destination {postal_code} is out of range")]
    TotalOverflow { postal_code: String, field: Field },

    /// The reporter was asked to do something its current state does not allow
    #[error("Reporter cannot start while {state}")]
    ReporterTransition { state: ReporterState },

    /// No async runtime is available or one could not be created
    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

// Conversion from io::Error to TrackerError
impl From<std::io::Error> for TrackerError {
    fn from(error: std::io::Error) -> Self {
        TrackerError::InputStream {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl TrackerError {
    /// Create a WrongFieldCount error
    pub fn wrong_field_count(kind: LineKind, expected: usize, found: usize) -> Self {
        TrackerError::WrongFieldCount {
            kind,
            expected,
            found,
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(kind: LineKind, field: &'static str, value: &str) -> Self {
        TrackerError::InvalidNumber {
            kind,
            field,
            value: value.to_string(),
        }
    }

    /// Create an InvalidPackage error
    pub fn invalid_package(weight: Decimal, postal_code: &str, violations: Vec<Violation>) -> Self {
        TrackerError::InvalidPackage {
            weight: weight.to_string(),
            postal_code: postal_code.to_string(),
            violations,
        }
    }

    /// Create an InvalidFee error
    pub fn invalid_fee(threshold: Decimal, fee: Decimal, violations: Vec<Violation>) -> Self {
        TrackerError::InvalidFee {
            threshold: threshold.to_string(),
            fee: fee.to_string(),
            violations,
        }
    }

    /// Create a FileLoad error
    pub fn file_load(kind: LineKind, path: &str, error: &std::io::Error) -> Self {
        TrackerError::FileLoad {
            kind,
            path: path.to_string(),
            message: error.to_string(),
        }
    }

    /// Create a TotalOverflow error
    pub fn total_overflow(postal_code: &PostalCode, field: Field) -> Self {
        TrackerError::TotalOverflow {
            postal_code: postal_code.to_string(),
            field,
        }
    }

    /// Whether the error ends the interactive session
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TrackerError::InputStream { .. } | TrackerError::Runtime { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::validation::Rule;
    use rstest::rstest;

    #[rstest]
    #[case::wrong_field_count(
        TrackerError::wrong_field_count(LineKind::Package, 2, 1),
        "2 input parameters expected per package line, got 1"
    )]
    #[case::invalid_number(
        TrackerError::invalid_number(LineKind::Package, "weight", "3,2"),
        "weight in package line should be a decimal number, is '3,2'"
    )]
    #[case::invalid_fee_number(
        TrackerError::invalid_number(LineKind::Fee, "fee", "abc"),
        "fee in fee line should be a decimal number, is 'abc'"
    )]
    #[case::invalid_package(
        TrackerError::invalid_package(
            Decimal::new(32222, 4),
            "09300",
            vec![Violation::new(Field::Weight, Rule::MaxFractionDigits(3), "3.2222")]
        ),
        "Package 3.2222 kg => 09300 is invalid: weight '3.2222' must have 0 to 3 fractional digits"
    )]
    #[case::invalid_postal_code(
        TrackerError::invalid_package(
            Decimal::new(32, 1),
            "0930A",
            vec![Violation::new(Field::PostalCode, Rule::FiveDigits, "0930A")]
        ),
        "Package 3.2 kg => 0930A is invalid: postal code '0930A' must be five digits"
    )]
    #[case::invalid_fee(
        TrackerError::invalid_fee(
            Decimal::new(5, 0),
            Decimal::new(25, 1),
            vec![Violation::new(Field::Fee, Rule::ExactFractionDigits(2), "2.5")]
        ),
        "Fee 5 kg => 2.5 EUR is invalid: fee '2.5' must have exactly 2 fractional digits"
    )]
    #[case::file_load(
        TrackerError::FileLoad {
            kind: LineKind::Package,
            path: "missing.txt".to_string(),
            message: "No such file or directory (os error 2)".to_string(),
        },
        "Unable to load initial packages from file missing.txt: No such file or directory (os error 2)"
    )]
    #[case::total_overflow(
        TrackerError::total_overflow(&PostalCode::parse("12345").unwrap(), Field::Fee),
        "fee total for destination 12345 is out of range"
    )]
    #[case::reporter_transition(
        TrackerError::ReporterTransition { state: ReporterState::Stopped },
        "Reporter cannot start while stopped"
    )]
    fn test_error_display(#[case] error: TrackerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error: TrackerError = io_error.into();
        assert!(matches!(error, TrackerError::InputStream { .. }));
        assert!(error.is_fatal());
        assert_eq!(error.to_string(), "Input stream error: pipe closed");
    }

    #[rstest]
    #[case::parse(TrackerError::wrong_field_count(LineKind::Fee, 2, 3), false)]
    #[case::file(
        TrackerError::FileLoad {
            kind: LineKind::Fee,
            path: "fees.txt".to_string(),
            message: "denied".to_string(),
        },
        false
    )]
    #[case::runtime(TrackerError::Runtime { message: "no threads".to_string() }, true)]
    fn test_is_fatal(#[case] error: TrackerError, #[case] fatal: bool) {
        assert_eq!(error.is_fatal(), fatal);
    }
}
