//! Query configuration passed into every view derivation.

use std::fmt;
use std::str::FromStr;

use drone_domain::{DomainError, DroneField};
use serde::{Deserialize, Serialize};

/// Coarse status filter offered next to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    Ready,
    NotReady,
    NeedsRepair,
    CameraIssues,
    FlightTestPassed,
}

impl StatusFilter {
    pub const ALL: [Self; 5] = [
        Self::Ready,
        Self::NotReady,
        Self::NeedsRepair,
        Self::CameraIssues,
        Self::FlightTestPassed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::NotReady => "not-ready",
            Self::NeedsRepair => "needs-repair",
            Self::CameraIssues => "camera-issues",
            Self::FlightTestPassed => "flight-test-passed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Ready for Field",
            Self::NotReady => "Not Ready",
            Self::NeedsRepair => "Needs Repair",
            Self::CameraIssues => "Camera Issues",
            Self::FlightTestPassed => "Flight Test Passed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatusFilter(s.to_string()))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(DomainError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// Active sort. `key` is a column name; names that resolve to no
/// [`DroneField`] leave the order untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    #[must_use]
    pub fn new(field: DroneField, direction: SortDirection) -> Self {
        Self {
            key: field.name().to_string(),
            direction,
        }
    }

    pub fn field(&self) -> Option<DroneField> {
        DroneField::from_name(&self.key).ok()
    }
}

/// Exact-match constraint on one named column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
}

impl ColumnFilter {
    pub fn field(&self) -> Option<DroneField> {
        DroneField::from_name(&self.column).ok()
    }
}

/// Everything the presentation layer can change about the view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfig {
    pub search_term: String,
    pub status_filter: Option<StatusFilter>,
    pub type_filter: Option<String>,
    pub battery_filter: Option<String>,
    pub column_filters: Vec<ColumnFilter>,
    pub sort: Option<SortConfig>,
}

impl QueryConfig {
    /// Set the filter for `column`, replacing any existing one. The new
    /// filter moves to the end of the list.
    pub fn set_column_filter(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        self.column_filters.retain(|f| f.column != column);
        self.column_filters.push(ColumnFilter {
            column,
            value: value.into(),
        });
    }

    /// Drop the filter on `column`, if any.
    pub fn remove_column_filter(&mut self, column: &str) {
        self.column_filters.retain(|f| f.column != column);
    }

    pub fn column_filter_value(&self, column: &str) -> Option<&str> {
        self.column_filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    /// Header-click behavior: ascending first, descending on a second
    /// click of the same column, back to ascending after that.
    pub fn toggle_sort(&mut self, field: DroneField) {
        let direction = match &self.sort {
            Some(current) if current.key == field.name() && current.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortConfig::new(field, direction));
    }

    /// True when any filter narrows the view. Sorting and empty type or
    /// battery filters do not count.
    #[must_use]
    pub fn filters_active(&self) -> bool {
        !self.column_filters.is_empty()
            || self.status_filter.is_some()
            || self.type_filter.as_deref().is_some_and(|kind| !kind.is_empty())
            || self.battery_filter.as_deref().is_some_and(|battery| !battery.is_empty())
            || !self.search_term.is_empty()
    }

    /// Clear every filter. The sort configuration is kept.
    pub fn reset_filters(&mut self) {
        self.search_term.clear();
        self.status_filter = None;
        self.type_filter = None;
        self.battery_filter = None;
        self.column_filters.clear();
    }
}
