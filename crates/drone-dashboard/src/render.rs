//! # Terminal Rendering
//!
//! Plain-text panels for the fleet dashboard.

use std::fmt::Write;

use drone_analytics::{ColumnChoices, DistributionEntry, FleetReport, StatusCounters};
use drone_domain::{DroneField, DroneRecord, StatusToken};
use drone_query::{QueryConfig, SelectionState, SortConfig, SortDirection};
use serde::Serialize;

use crate::config::ViewMode;

const BAR_WIDTH: usize = 24;

/// Columns shown in table mode, in display order.
pub const TABLE_COLUMNS: [DroneField; 9] = [
    DroneField::Id,
    DroneField::QuadName,
    DroneField::Type,
    DroneField::Camera,
    DroneField::BatteryType,
    DroneField::Vtx,
    DroneField::FlightTest,
    DroneField::ReadyForFieldTesting,
    DroneField::Notes,
];

/// Everything the JSON output carries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot<'a> {
    pub report: FleetReport,
    pub query: &'a QueryConfig,
    pub filters_active: bool,
    pub visible_count: usize,
    pub visible: &'a [DroneRecord],
    pub selected: Vec<i64>,
    pub column_choices: Vec<ColumnChoices>,
}

/// Inputs for one text rendering of the dashboard.
pub struct DashboardView<'a> {
    pub counters: StatusCounters,
    pub battery_distribution: &'a [DistributionEntry],
    pub type_distribution: &'a [DistributionEntry],
    pub query: &'a QueryConfig,
    pub total: usize,
    pub visible: &'a [DroneRecord],
    pub selection: &'a SelectionState,
    pub mode: ViewMode,
}

/// Headline counters panel.
pub fn render_stats(counters: &StatusCounters) -> String {
    let mut out = String::new();
    out.push_str("FLEET STATUS\n");
    let _ = writeln!(out, "  TOTAL DRONES    {:>5}", counters.total);
    let _ = writeln!(
        out,
        "  FIELD READY     {:>5}  ({}% of fleet)",
        counters.ready,
        counters.ready_percentage()
    );
    let _ = writeln!(out, "  NEEDS REPAIR    {:>5}", counters.needs_repair);
    let _ = writeln!(out, "  MISSING CAMERA  {:>5}", counters.missing_camera);
    out
}

/// Horizontal bar chart for one distribution.
pub fn render_distribution(title: &str, entries: &[DistributionEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");

    if entries.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let label_width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);
    let max = entries.iter().map(|e| e.value).max().unwrap_or(0);

    for entry in entries {
        let filled = if max == 0 { 0 } else { entry.value * BAR_WIDTH / max };
        let _ = writeln!(
            out,
            "  {} {} {}",
            pad(&entry.name, label_width),
            "█".repeat(filled.max(1)),
            entry.value
        );
    }
    out
}

/// Drone list as an aligned table. The active sort column carries an arrow.
pub fn render_table(
    drones: &[DroneRecord],
    selection: &SelectionState,
    sort: Option<&SortConfig>,
) -> String {
    let headers: Vec<String> = TABLE_COLUMNS
        .iter()
        .map(|field| {
            let arrow = match sort {
                Some(s) if s.field() == Some(*field) => match s.direction {
                    SortDirection::Ascending => " ▲",
                    SortDirection::Descending => " ▼",
                },
                _ => "",
            };
            format!("{}{arrow}", field.label())
        })
        .collect();

    let rows: Vec<Vec<String>> = drones
        .iter()
        .map(|drone| {
            TABLE_COLUMNS
                .iter()
                .map(|field| drone.field_value(*field).into_owned())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str("    ");
    push_row(&mut out, &headers, &widths);
    out.push_str("    ");
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);

    for (drone, row) in drones.iter().zip(&rows) {
        out.push_str(selection_mark(selection, drone.id));
        out.push(' ');
        push_row(&mut out, row, &widths);
    }
    out
}

/// Drone list as stacked cards.
pub fn render_cards(drones: &[DroneRecord], selection: &SelectionState) -> String {
    let mut out = String::new();
    for drone in drones {
        let name = if drone.quad_name.is_empty() {
            "(unnamed)"
        } else {
            drone.quad_name.as_str()
        };
        let _ = writeln!(
            out,
            "{} #{} {}  [{}]",
            selection_mark(selection, drone.id),
            drone.id,
            name,
            drone.drone_type
        );
        let _ = writeln!(
            out,
            "    Camera: {}  Flight Test: {}  Field Ready: {}",
            status_text(&drone.camera),
            status_text(&drone.flight_test),
            status_text(&drone.ready_for_field_testing)
        );
        let _ = writeln!(
            out,
            "    Battery: {}  VTX: {}  Channel: {}",
            or_dash(&drone.battery_type),
            or_dash(&drone.vtx),
            or_dash(&drone.video_channel)
        );
        if !drone.notes.is_empty() {
            let _ = writeln!(out, "    Notes: {}", drone.notes);
        }
        out.push('\n');
    }
    out
}

/// One-line summary of the active query.
pub fn render_query_summary(query: &QueryConfig) -> String {
    let mut parts = Vec::new();
    if !query.search_term.is_empty() {
        parts.push(format!("search \"{}\"", query.search_term));
    }
    if let Some(status) = query.status_filter {
        parts.push(format!("status: {}", status.label()));
    }
    if let Some(kind) = &query.type_filter {
        parts.push(format!("type: {kind}"));
    }
    if let Some(battery) = &query.battery_filter {
        parts.push(format!("battery: {battery}"));
    }
    for filter in &query.column_filters {
        let label = filter.field().map_or(filter.column.as_str(), |f| f.label());
        parts.push(format!("{label} = {}", filter.value));
    }

    if parts.is_empty() {
        "No filters active".to_string()
    } else {
        format!("Filters: {}", parts.join(", "))
    }
}

/// Full text dashboard.
pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let mut out = String::new();
    out.push_str(&render_stats(&view.counters));
    out.push('\n');
    out.push_str(&render_distribution("BATTERY TYPES", view.battery_distribution));
    out.push('\n');
    out.push_str(&render_distribution("DRONE TYPES", view.type_distribution));
    out.push('\n');

    let _ = writeln!(out, "{}", render_query_summary(view.query));
    let _ = writeln!(
        out,
        "Showing {} of {} drones, {} selected\n",
        view.visible.len(),
        view.total,
        view.selection.len()
    );

    if view.visible.is_empty() {
        out.push_str("No drones match the current filters.\n");
        return out;
    }

    match view.mode {
        ViewMode::Table => out.push_str(&render_table(
            view.visible,
            view.selection,
            view.query.sort.as_ref(),
        )),
        ViewMode::Cards => out.push_str(&render_cards(view.visible, view.selection)),
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn selection_mark(selection: &SelectionState, id: i64) -> &'static str {
    if selection.contains(id) { "[x]" } else { "[ ]" }
}

fn status_text(raw: &str) -> String {
    match StatusToken::classify(raw) {
        StatusToken::Other if raw.is_empty() => "-".to_string(),
        StatusToken::Other => raw.to_string(),
        token => format!("{raw} {}", token.as_str()),
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
