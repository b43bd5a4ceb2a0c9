//! Package registry
//!
//! This module provides the `PackageRegistry`, which keeps every accepted
//! package grouped by destination postal code and produces per-destination
//! totals on demand.
//!
//! # Thread Safety
//!
//! The bucket map sits behind a single registry-wide `RwLock`. An insert holds
//! the write lock only for one push; an aggregation holds the read lock for the
//! whole pass. An insert is therefore either entirely visible to an
//! aggregation or not at all, and no aggregation ever sees a half-built bucket.
//! The map itself is never handed out.
//!
//! # Ordering
//!
//! Aggregation walks postal codes in ascending order (the natural `BTreeMap`
//! order) and then stable-sorts the totals by weight, descending. Destinations
//! with equal total weight therefore stay in ascending postal-code order.

use crate::core::fee_table::{FeeSchedule, FeeTable};
use crate::types::{DestinationTotal, Field, Package, PostalCode, Rule, TrackerError, Violation};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Packages of one destination and their running weight total
#[derive(Debug, Default)]
struct Bucket {
    packages: Vec<Package>,
    total_weight_kg: Decimal,
}

impl Bucket {
    /// Sum of the fees of every package, `None` if the sum does not fit a `Decimal`
    fn total_fee(&self, schedule: &FeeSchedule) -> Option<Decimal> {
        self.packages
            .iter()
            .try_fold(Decimal::ZERO, |sum, p| sum.checked_add(schedule.fee_for(p.weight_kg)))
    }
}

/// In-memory store of packages grouped by destination
#[derive(Debug, Default)]
pub struct PackageRegistry {
    /// Packages per postal code, in insertion order within each bucket
    buckets: RwLock<BTreeMap<PostalCode, Bucket>>,
}

impl PackageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a package and append it to its destination bucket
    ///
    /// The bucket is created on first use. Safe to call from any number of
    /// threads concurrently with other inserts and with [`aggregate`].
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidPackage` when the weight is not positive,
    /// has more than 3 fractional digits, or when the postal code is not
    /// exactly five digits. The same error is returned when the package would
    /// push its destination total past the `Decimal` range. Nothing is stored
    /// in either case.
    ///
    /// [`aggregate`]: PackageRegistry::aggregate
    pub fn insert(&self, weight_kg: Decimal, postal_code: &str) -> Result<(), TrackerError> {
        let package = Package::new(weight_kg, postal_code)?;

        let mut buckets = self.buckets.write().unwrap_or_else(PoisonError::into_inner);
        let bucket = buckets.entry(package.postal_code.clone()).or_default();

        // an empty bucket always accepts a valid weight, so no empty bucket is left behind
        let Some(total) = bucket.total_weight_kg.checked_add(package.weight_kg) else {
            return Err(TrackerError::invalid_package(
                weight_kg,
                postal_code,
                vec![Violation::new(
                    Field::Weight,
                    Rule::TotalInRange,
                    weight_kg.to_string(),
                )],
            ));
        };

        debug!(%package, "package registered");
        bucket.total_weight_kg = total;
        bucket.packages.push(package);

        Ok(())
    }

    /// Per-destination totals, heaviest destination first
    ///
    /// Fees are summed only when `fees` holds at least one entry; otherwise
    /// every `total_fee` is `None`. The fee table is snapshotted once before
    /// the registry is read so the whole report uses one tariff.
    ///
    /// Returns an empty vector when no package has been registered.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::TotalOverflow` if the fee total of a destination
    /// does not fit a `Decimal`.
    pub fn aggregate(&self, fees: &FeeTable) -> Result<Vec<DestinationTotal>, TrackerError> {
        let schedule = fees.schedule();
        self.aggregate_with(&schedule)
    }

    /// Same as [`aggregate`](PackageRegistry::aggregate) with an already taken fee snapshot
    pub fn aggregate_with(
        &self,
        schedule: &FeeSchedule,
    ) -> Result<Vec<DestinationTotal>, TrackerError> {
        let mut totals = {
            let buckets = self.buckets.read().unwrap_or_else(PoisonError::into_inner);

            buckets
                .iter()
                .map(|(postal_code, bucket)| {
                    let total_fee = if schedule.is_empty() {
                        None
                    } else {
                        let fee = bucket
                            .total_fee(schedule)
                            .ok_or_else(|| TrackerError::total_overflow(postal_code, Field::Fee))?;
                        Some(fee)
                    };

                    Ok::<_, TrackerError>(DestinationTotal {
                        postal_code: postal_code.clone(),
                        total_weight_kg: bucket.total_weight_kg,
                        total_fee,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        // sort_by is stable, equal weights keep ascending postal-code order
        totals.sort_by(|a, b| b.total_weight_kg.cmp(&a.total_weight_kg));
        Ok(totals)
    }

    /// Number of registered packages
    pub fn len(&self) -> usize {
        self.buckets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|bucket| bucket.packages.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Number of distinct destinations
    pub fn destination_count(&self) -> usize {
        self.buckets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
