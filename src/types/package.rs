//! Package-related types
//!
//! A [`Package`] is created only from values that passed every field guard,
//! so holding one is proof that its weight and postal code are valid.

use super::error::TrackerError;
use super::validation::{check_postal_code, check_weight, Violation};
use rust_decimal::Decimal;
use std::fmt;

/// Destination postal code: exactly five ASCII digits
///
/// Kept as text so leading zeros survive. Ordering is lexicographic, which for
/// fixed-width digit strings equals numeric order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Validate and wrap a postal code
    pub fn parse(postal_code: &str) -> Result<Self, Violation> {
        match check_postal_code(postal_code) {
            Some(violation) => Err(violation),
            None => Ok(PostalCode(postal_code.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A shipped package
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Weight in kilograms, `> 0`, at most 3 fractional digits
    pub weight_kg: Decimal,

    /// Destination postal code
    pub postal_code: PostalCode,
}

impl Package {
    /// Build a package after running every field guard
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidPackage` listing all violated constraints
    /// when the weight or the postal code is invalid.
    pub fn new(weight_kg: Decimal, postal_code: &str) -> Result<Self, TrackerError> {
        let mut violations = check_weight(weight_kg);
        let code = PostalCode::parse(postal_code);
        if let Err(violation) = &code {
            violations.push(violation.clone());
        }

        match code {
            Ok(postal_code) if violations.is_empty() => Ok(Package {
                weight_kg,
                postal_code,
            }),
            _ => Err(TrackerError::invalid_package(
                weight_kg,
                postal_code,
                violations,
            )),
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg => {}", self.weight_kg, self.postal_code)
    }
}

/// Aggregated totals for one destination
///
/// `total_fee` is `Some` exactly when a non-empty fee table was used for the
/// aggregation; `None` means no tariff is loaded (as opposed to a zero fee).
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationTotal {
    pub postal_code: PostalCode,
    pub total_weight_kg: Decimal,
    pub total_fee: Option<Decimal>,
}
