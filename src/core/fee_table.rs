//! Tariff table mapping weight thresholds to fees
//!
//! The table keeps at most one entry per threshold; inserting an entry for a
//! threshold that is already present replaces it. Lookups pick the entry with
//! the largest threshold that does not exceed the package weight. Thresholds
//! are inclusive: a 10 kg package matches a 10 kg threshold.
//!
//! Readers that need many lookups (one aggregation pass) take a
//! [`FeeSchedule`] snapshot once instead of locking per lookup.

use crate::types::{FeeEntry, TrackerError};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Thread-safe tariff table
#[derive(Debug, Default)]
pub struct FeeTable {
    /// Entries keyed by threshold, ascending
    entries: RwLock<BTreeMap<Decimal, FeeEntry>>,
}

impl FeeTable {
    /// Create an empty fee table
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a tariff row, replacing any row for the same threshold
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidFee` when the threshold is not positive,
    /// has more than 3 fractional digits, or when the fee is negative or does
    /// not have exactly 2 fractional digits. The table is left untouched.
    pub fn insert(&self, threshold_kg: Decimal, fee: Decimal) -> Result<(), TrackerError> {
        let entry = FeeEntry::new(threshold_kg, fee)?;

        let replaced = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(threshold_kg, entry);

        if let Some(previous) = replaced {
            debug!(%previous, %entry, "fee entry replaced");
        }
        Ok(())
    }

    /// Fee for a package of the given weight, zero when no threshold matches
    pub fn fee_for(&self, weight_kg: Decimal) -> Decimal {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .rev()
            .find(|entry| weight_kg >= entry.threshold_kg)
            .map_or(Decimal::ZERO, |entry| entry.fee)
    }

    /// Whether no tariff is loaded
    pub fn is_empty(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Number of distinct thresholds
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Immutable snapshot of the table, highest threshold first
    pub fn schedule(&self) -> FeeSchedule {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .rev()
            .copied()
            .collect();
        FeeSchedule { entries }
    }
}

/// Point-in-time copy of a [`FeeTable`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeSchedule {
    /// Entries sorted by threshold, descending
    entries: Vec<FeeEntry>,
}

impl FeeSchedule {
    /// Fee for a package of the given weight, zero when no threshold matches
    pub fn fee_for(&self, weight_kg: Decimal) -> Decimal {
        self.entries
            .iter()
            .find(|entry| weight_kg >= entry.threshold_kg)
            .map_or(Decimal::ZERO, |entry| entry.fee)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
