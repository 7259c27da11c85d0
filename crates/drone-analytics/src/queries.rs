//! Predefined fleet aggregations.

use std::collections::{BTreeSet, HashMap};

use drone_domain::{DroneField, DroneRecord};
use serde::{Deserialize, Serialize};

use crate::engine::FleetAnalytics;

/// Headline fleet counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounters {
    pub total: usize,
    pub ready: usize,
    pub needs_repair: usize,
    pub missing_camera: usize,
    pub not_ready: usize,
}

impl StatusCounters {
    /// Ready share rounded to a whole percent; zero for an empty fleet.
    #[must_use]
    pub fn ready_percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        // ready <= total, so the quotient stays within 0..=100
        let pct = (self.ready as f64 / self.total as f64 * 100.0).round();
        pct as u32
    }
}

/// One slice of a categorical distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub name: String,
    pub value: usize,
}

/// Sorted distinct values of one filterable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChoices {
    pub field: DroneField,
    pub values: Vec<String>,
}

/// Count ready, needs-repair and missing-camera records.
///
/// `missing_camera` only counts the literal `X` token.
#[must_use]
pub fn status_counters(drones: &[DroneRecord]) -> StatusCounters {
    let total = drones.len();
    let ready = drones.iter().filter(|d| d.is_ready()).count();
    let needs_repair = drones.iter().filter(|d| d.needs_repair()).count();
    let missing_camera = drones.iter().filter(|d| d.is_missing_camera()).count();

    StatusCounters {
        total,
        ready,
        needs_repair,
        missing_camera,
        not_ready: total - ready,
    }
}

/// Count occurrences of each non-blank value of `field`.
///
/// Entries are keyed by the untrimmed value and appear in first-seen order.
#[must_use]
pub fn categorical_distribution(drones: &[DroneRecord], field: DroneField) -> Vec<DistributionEntry> {
    let mut entries: Vec<DistributionEntry> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for drone in drones {
        let value = drone.field_value(field);
        if value.trim().is_empty() {
            continue;
        }
        if let Some(&slot) = slots.get(&*value) {
            entries[slot].value += 1;
        } else {
            slots.insert(value.to_string(), entries.len());
            entries.push(DistributionEntry {
                name: value.into_owned(),
                value: 1,
            });
        }
    }

    entries
}

/// Battery chemistry / cell-count distribution.
#[must_use]
pub fn battery_distribution(drones: &[DroneRecord]) -> Vec<DistributionEntry> {
    categorical_distribution(drones, DroneField::BatteryType)
}

/// Airframe type distribution.
#[must_use]
pub fn type_distribution(drones: &[DroneRecord]) -> Vec<DistributionEntry> {
    categorical_distribution(drones, DroneField::Type)
}

/// Sorted distinct non-empty values of `field`, for filter pickers.
#[must_use]
pub fn unique_values(drones: &[DroneRecord], field: DroneField) -> Vec<String> {
    drones
        .iter()
        .map(|d| d.field_value(field))
        .filter(|v| !v.is_empty())
        .map(|v| v.into_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct values for every column in [`DroneField::FILTERABLE`].
#[must_use]
pub fn column_catalog(drones: &[DroneRecord]) -> Vec<ColumnChoices> {
    DroneField::FILTERABLE
        .iter()
        .map(|&field| ColumnChoices {
            field,
            values: unique_values(drones, field),
        })
        .collect()
}

impl FleetAnalytics<'_> {
    /// Headline counters for the whole fleet.
    #[must_use]
    pub fn status_counters(&self) -> StatusCounters {
        status_counters(self.drones)
    }

    /// Distribution over any column.
    #[must_use]
    pub fn distribution(&self, field: DroneField) -> Vec<DistributionEntry> {
        categorical_distribution(self.drones, field)
    }

    /// Distinct airframe types, sorted.
    #[must_use]
    pub fn unique_types(&self) -> Vec<String> {
        unique_values(self.drones, DroneField::Type)
    }

    /// Distinct battery types, sorted.
    #[must_use]
    pub fn unique_batteries(&self) -> Vec<String> {
        unique_values(self.drones, DroneField::BatteryType)
    }

    /// Column filter choices.
    #[must_use]
    pub fn column_catalog(&self) -> Vec<ColumnChoices> {
        column_catalog(self.drones)
    }
}
