//! # Drone Fleet Dashboard - Domain Model
//!
//! Core record type, column catalog and status-token conventions for a
//! drone fleet roster. These types are the single source of truth across
//! ingestion, analytics, querying and presentation.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// STATUS TOKENS
// =============================================================================

/// Pass marker used by the camera, flight test and field-ready columns.
pub const PASS_TOKEN: &str = "✓";

/// Plain-ASCII failure marker.
pub const FAIL_TOKEN: &str = "X";

/// Alternate failure marker some rosters use instead of `X`.
pub const FAIL_TOKEN_ALT: &str = "✗";

/// Not-applicable marker.
pub const NOT_APPLICABLE_TOKEN: &str = "-";

/// Three-way display convention shared by the boolean-ish columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusToken {
    Pass,
    Fail,
    NotApplicable,
    /// Free text or empty cell
    Other,
}

impl StatusToken {
    /// Classify a raw cell value. Matching is exact, no trimming.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        match raw {
            PASS_TOKEN => Self::Pass,
            FAIL_TOKEN | FAIL_TOKEN_ALT => Self::Fail,
            NOT_APPLICABLE_TOKEN => Self::NotApplicable,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::NotApplicable => "N/A",
            Self::Other => "OTHER",
        }
    }
}

// =============================================================================
// COLUMNS
// =============================================================================

/// Roster columns in their fixed positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DroneField {
    Id,
    QuadName,
    Camera,
    #[serde(rename = "type")]
    Type,
    PropSize,
    Vtx,
    RcReceiver,
    Transmitter,
    ExternalTransmitter,
    TxModelNum,
    BatteryType,
    VideoChannel,
    FlightTest,
    ReadyForFieldTesting,
    Notes,
}

impl DroneField {
    /// Every column, in CSV position order.
    pub const ALL: [Self; 15] = [
        Self::Id,
        Self::QuadName,
        Self::Camera,
        Self::Type,
        Self::PropSize,
        Self::Vtx,
        Self::RcReceiver,
        Self::Transmitter,
        Self::ExternalTransmitter,
        Self::TxModelNum,
        Self::BatteryType,
        Self::VideoChannel,
        Self::FlightTest,
        Self::ReadyForFieldTesting,
        Self::Notes,
    ];

    /// Columns offered for exact-match column filtering.
    pub const FILTERABLE: [Self; 5] = [
        Self::Type,
        Self::BatteryType,
        Self::Camera,
        Self::FlightTest,
        Self::ReadyForFieldTesting,
    ];

    /// Canonical column name as used by query configurations.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::QuadName => "quadName",
            Self::Camera => "camera",
            Self::Type => "type",
            Self::PropSize => "propSize",
            Self::Vtx => "vtx",
            Self::RcReceiver => "rcReceiver",
            Self::Transmitter => "transmitter",
            Self::ExternalTransmitter => "externalTransmitter",
            Self::TxModelNum => "txModelNum",
            Self::BatteryType => "batteryType",
            Self::VideoChannel => "videoChannel",
            Self::FlightTest => "flightTest",
            Self::ReadyForFieldTesting => "readyForFieldTesting",
            Self::Notes => "notes",
        }
    }

    /// Human-readable column header.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::QuadName => "Quad Name",
            Self::Camera => "Camera",
            Self::Type => "Type",
            Self::PropSize => "Prop Size",
            Self::Vtx => "VTX",
            Self::RcReceiver => "RC Receiver",
            Self::Transmitter => "Transmitter",
            Self::ExternalTransmitter => "External Transmitter",
            Self::TxModelNum => "TX Model Number",
            Self::BatteryType => "Battery Type",
            Self::VideoChannel => "Video Channel",
            Self::FlightTest => "Flight Test",
            Self::ReadyForFieldTesting => "Field Ready",
            Self::Notes => "Notes",
        }
    }

    /// Resolve a canonical column name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| DomainError::UnknownField(name.to_string()))
    }

    /// Zero-based CSV column index.
    #[must_use]
    pub fn position(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for DroneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DroneField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

// =============================================================================
// ENTITY
// =============================================================================

/// One row of the fleet roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneRecord {
    pub id: i64,
    pub quad_name: String,
    pub camera: String,
    #[serde(rename = "type")]
    pub drone_type: String,
    pub prop_size: String,
    pub vtx: String,
    pub rc_receiver: String,
    pub transmitter: String,
    pub external_transmitter: String,
    pub tx_model_num: String,
    pub battery_type: String,
    pub video_channel: String,
    pub flight_test: String,
    pub ready_for_field_testing: String,
    pub notes: String,
}

impl DroneRecord {
    /// Empty record carrying only an id.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Field-ready column holds exactly the pass token.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready_for_field_testing == PASS_TOKEN
    }

    /// Any non-blank note marks the airframe as needing repair.
    #[must_use]
    pub fn needs_repair(&self) -> bool {
        !self.notes.trim().is_empty()
    }

    /// Only the literal `X` counts here; `✗` does not.
    #[must_use]
    pub fn is_missing_camera(&self) -> bool {
        self.camera == FAIL_TOKEN
    }

    #[must_use]
    pub fn flight_test_passed(&self) -> bool {
        self.flight_test == PASS_TOKEN
    }

    /// Borrow a text column. Returns `None` for `id`, which is numeric.
    #[must_use]
    pub fn text(&self, field: DroneField) -> Option<&str> {
        let value = match field {
            DroneField::Id => return None,
            DroneField::QuadName => &self.quad_name,
            DroneField::Camera => &self.camera,
            DroneField::Type => &self.drone_type,
            DroneField::PropSize => &self.prop_size,
            DroneField::Vtx => &self.vtx,
            DroneField::RcReceiver => &self.rc_receiver,
            DroneField::Transmitter => &self.transmitter,
            DroneField::ExternalTransmitter => &self.external_transmitter,
            DroneField::TxModelNum => &self.tx_model_num,
            DroneField::BatteryType => &self.battery_type,
            DroneField::VideoChannel => &self.video_channel,
            DroneField::FlightTest => &self.flight_test,
            DroneField::ReadyForFieldTesting => &self.ready_for_field_testing,
            DroneField::Notes => &self.notes,
        };
        Some(value.as_str())
    }

    /// Stringified column value; `id` renders in decimal.
    #[must_use]
    pub fn field_value(&self, field: DroneField) -> Cow<'_, str> {
        match self.text(field) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(self.id.to_string()),
        }
    }

    /// Mutable access to a text column, used when building records
    /// positionally. Returns `None` for `id`.
    pub fn text_mut(&mut self, field: DroneField) -> Option<&mut String> {
        let slot = match field {
            DroneField::Id => return None,
            DroneField::QuadName => &mut self.quad_name,
            DroneField::Camera => &mut self.camera,
            DroneField::Type => &mut self.drone_type,
            DroneField::PropSize => &mut self.prop_size,
            DroneField::Vtx => &mut self.vtx,
            DroneField::RcReceiver => &mut self.rc_receiver,
            DroneField::Transmitter => &mut self.transmitter,
            DroneField::ExternalTransmitter => &mut self.external_transmitter,
            DroneField::TxModelNum => &mut self.tx_model_num,
            DroneField::BatteryType => &mut self.battery_type,
            DroneField::VideoChannel => &mut self.video_channel,
            DroneField::FlightTest => &mut self.flight_test,
            DroneField::ReadyForFieldTesting => &mut self.ready_for_field_testing,
            DroneField::Notes => &mut self.notes,
        };
        Some(slot)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Unknown drone field: {0}")]
    UnknownField(String),

    #[error("Unknown status filter: {0}")]
    UnknownStatusFilter(String),

    #[error("Unknown sort direction: {0}")]
    UnknownSortDirection(String),

    #[error("Unknown reset policy: {0}")]
    UnknownResetPolicy(String),
}
