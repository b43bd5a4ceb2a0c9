//! Fee-related types

use super::error::TrackerError;
use super::validation::{check_fee, check_weight};
use rust_decimal::Decimal;
use std::fmt;

/// One tariff row: packages weighing at least `threshold_kg` pay `fee`,
/// unless a higher threshold also matches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeEntry {
    /// Inclusive lower weight bound in kilograms
    pub threshold_kg: Decimal,

    /// Fee charged per package, exactly 2 fractional digits
    pub fee: Decimal,
}

impl FeeEntry {
    /// Build a fee entry after running the weight and fee guards
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidFee` listing all violated constraints.
    pub fn new(threshold_kg: Decimal, fee: Decimal) -> Result<Self, TrackerError> {
        let mut violations = check_weight(threshold_kg);
        violations.extend(check_fee(fee));

        if violations.is_empty() {
            Ok(FeeEntry { threshold_kg, fee })
        } else {
            Err(TrackerError::invalid_fee(threshold_kg, fee, violations))
        }
    }
}

impl fmt::Display for FeeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg => {} EUR", self.threshold_kg, self.fee)
    }
}
