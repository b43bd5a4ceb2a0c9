//! Commands parsed from input lines
//!
//! Parsing only establishes the shape of a line (token count, numeric
//! fields). Domain constraints are checked later, when the command is applied
//! to the registry or the fee table.

use rust_decimal::Decimal;
use std::fmt;

/// Which line format a line is expected to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `<weight> <postal code>`
    Package,
    /// `<weight> <fee>`
    Fee,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Package => write!(f, "package"),
            LineKind::Fee => write!(f, "fee"),
        }
    }
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Record a package going to `postal_code`
    InsertPackage {
        weight_kg: Decimal,
        postal_code: String,
    },

    /// Add or replace the tariff row for `threshold_kg`
    InsertFee { threshold_kg: Decimal, fee: Decimal },
}
