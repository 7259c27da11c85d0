//! Borrowed view over a roster for running aggregations.

use drone_domain::DroneRecord;

/// Aggregation entry point over one loaded record set.
///
/// Holds a borrow only; every method recomputes from the records, so results
/// never depend on earlier calls.
#[derive(Debug, Clone, Copy)]
pub struct FleetAnalytics<'a> {
    pub(crate) drones: &'a [DroneRecord],
}

impl<'a> FleetAnalytics<'a> {
    /// Wrap a record set.
    #[must_use]
    pub const fn new(drones: &'a [DroneRecord]) -> Self {
        Self { drones }
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.drones.len()
    }

    /// True when no records are loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }
}
