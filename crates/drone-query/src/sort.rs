//! Sort stage.
//!
//! Stable ordering on one column. Empty cells always sink to the end, in
//! both directions; only the comparison between non-empty values is
//! reversed for descending order.

use std::cmp::Ordering;

use drone_domain::{DroneField, DroneRecord};

use crate::config::{SortConfig, SortDirection};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Number(i64),
    Text(&'a str),
}

fn sort_value(drone: &DroneRecord, field: DroneField) -> Option<SortValue<'_>> {
    match drone.text(field) {
        None => Some(SortValue::Number(drone.id)),
        Some("") => None,
        Some(text) => Some(SortValue::Text(text)),
    }
}

/// Compare two drones on `field`.
#[must_use]
pub fn compare_drones(
    a: &DroneRecord,
    b: &DroneRecord,
    field: DroneField,
    direction: SortDirection,
) -> Ordering {
    match (sort_value(a, field), sort_value(b, field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => {
            let ordering = left.cmp(&right);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Sort in place. An unknown sort key leaves the slice as is.
pub fn sort_in_place(drones: &mut [DroneRecord], sort: &SortConfig) {
    if let Some(field) = sort.field() {
        drones.sort_by(|a, b| compare_drones(a, b, field, sort.direction));
    }
}

/// Sorted copy of `drones`; `None` keeps the input order.
#[must_use]
pub fn apply_sort(drones: &[DroneRecord], sort: Option<&SortConfig>) -> Vec<DroneRecord> {
    let mut sorted = drones.to_vec();
    if let Some(sort) = sort {
        sort_in_place(&mut sorted, sort);
    }
    sorted
}
