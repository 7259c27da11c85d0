//! Drone Fleet Dashboard CLI
//!
//! Loads a roster CSV, applies the requested filters, sort and selection,
//! and prints the dashboard.

mod config;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use drone_analytics::FleetAnalytics;
use drone_domain::{DroneField, DroneRecord};
use drone_ingest::load_fleet;
use drone_query::{FleetSession, QueryConfig, ResetPolicy, SortConfig, SortDirection, StatusFilter};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, OutputFormat, ViewMode};
use crate::render::{DashboardSnapshot, DashboardView};

/// Column filter value that removes the filter instead of matching.
const ALL_VALUES: &str = "all-values";

#[derive(Parser, Debug)]
#[command(name = "drone-dashboard")]
#[command(about = "Summarize, filter and sort a drone fleet roster")]
struct Args {
    /// Roster CSV file
    file: PathBuf,

    /// Case-insensitive search over name, type and notes
    #[arg(short, long, default_value = "")]
    search: String,

    /// Status filter (ready, not-ready, needs-repair, camera-issues, flight-test-passed)
    #[arg(long)]
    status: Option<StatusFilter>,

    /// Exact airframe type
    #[arg(long = "type")]
    drone_type: Option<String>,

    /// Exact battery type
    #[arg(long)]
    battery: Option<String>,

    /// Column filter as COLUMN=VALUE; repeatable
    #[arg(long = "column", value_parser = parse_column_filter)]
    columns: Vec<(DroneField, String)>,

    /// Sort column
    #[arg(long)]
    sort: Option<DroneField>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// List layout
    #[arg(long, value_enum)]
    view: Option<ViewMode>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Toggle selection of a drone id; repeatable
    #[arg(long = "select")]
    select: Vec<i64>,

    /// Toggle selection of every visible drone
    #[arg(long)]
    select_all: bool,

    /// Clear every filter after selecting; the sort is kept
    #[arg(long)]
    reset_filters: bool,

    /// What resetting filters does to the selection (preserve, clear)
    #[arg(long)]
    reset_policy: Option<ResetPolicy>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging on stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("drone_dashboard={}", config.log_level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let view_mode = args.view.unwrap_or(config.view);
    let format = args.format.unwrap_or(config.format);
    let reset_policy = args.reset_policy.unwrap_or(config.reset_policy);

    info!(file = %args.file.display(), ?view_mode, ?format, "Starting dashboard");

    let drones = load_fleet(&args.file)
        .await
        .with_context(|| format!("Failed to load roster {}", args.file.display()))?;

    let mut session = build_session(drones, &args, reset_policy);
    let visible = session.view().to_vec();
    let analytics = FleetAnalytics::new(session.drones());

    match format {
        OutputFormat::Text => {
            let battery = analytics.distribution(DroneField::BatteryType);
            let types = analytics.distribution(DroneField::Type);
            let view = DashboardView {
                counters: analytics.status_counters(),
                battery_distribution: &battery,
                type_distribution: &types,
                query: session.config(),
                total: session.drones().len(),
                visible: &visible,
                selection: session.selection(),
                mode: view_mode,
            };
            print!("{}", render::render_dashboard(&view));
        }
        OutputFormat::Json => {
            let snapshot = DashboardSnapshot {
                report: analytics.generate_report(),
                query: session.config(),
                filters_active: session.config().filters_active(),
                visible_count: visible.len(),
                visible: &visible,
                selected: session.selection().iter().collect(),
                column_choices: analytics.column_catalog(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&snapshot).context("Failed to serialize dashboard")?
            );
        }
        OutputFormat::Markdown => {
            print!("{}", analytics.generate_report_markdown());
        }
    }

    info!(
        total = session.drones().len(),
        visible = visible.len(),
        selected = session.selection().len(),
        "Dashboard rendered"
    );

    Ok(())
}

/// Load `drones` and replay the query, selection and reset options in
/// command-line order: filters and sort, then selection, then reset.
fn build_session(drones: Vec<DroneRecord>, args: &Args, reset_policy: ResetPolicy) -> FleetSession {
    let mut session = FleetSession::with_reset_policy(reset_policy);
    session.load(drones);
    apply_query(session.config_mut(), args);
    debug!(query = ?session.config(), "Query configured");

    for id in &args.select {
        if !session.drones().iter().any(|d| d.id == *id) {
            warn!(id, "Selected id is not in the roster");
        }
        session.toggle_selection(*id);
    }
    if args.select_all {
        session.select_all_visible();
    }
    if args.reset_filters {
        session.reset_filters();
    }
    session
}

/// Copy the command-line query options into `query`. Empty type and
/// battery values leave those filters unset.
fn apply_query(query: &mut QueryConfig, args: &Args) {
    query.search_term.clone_from(&args.search);
    query.status_filter = args.status;
    query.type_filter = args.drone_type.clone().filter(|kind| !kind.is_empty());
    query.battery_filter = args.battery.clone().filter(|battery| !battery.is_empty());

    for (field, value) in &args.columns {
        if value == ALL_VALUES {
            query.remove_column_filter(field.name());
        } else {
            query.set_column_filter(field.name(), value.as_str());
        }
    }

    if let Some(field) = args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        query.sort = Some(SortConfig::new(field, direction));
    }
}

fn parse_column_filter(raw: &str) -> Result<(DroneField, String), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got `{raw}`"))?;
    let field = DroneField::from_name(column).map_err(|e| e.to_string())?;
    if !DroneField::FILTERABLE.contains(&field) {
        let names: Vec<&str> = DroneField::FILTERABLE.iter().map(|f| f.name()).collect();
        return Err(format!(
            "column `{column}` is not filterable (choose from {})",
            names.join(", ")
        ));
    }
    Ok((field, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["drone-dashboard", "fleet.csv"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_parse_column_filter() {
        assert_eq!(
            parse_column_filter("batteryType=4S"),
            Ok((DroneField::BatteryType, "4S".to_string()))
        );
        assert_eq!(
            parse_column_filter("camera="),
            Ok((DroneField::Camera, String::new()))
        );
        assert!(parse_column_filter("camera").is_err());
        assert!(parse_column_filter("payload=1").is_err());
        assert!(parse_column_filter("notes=x").is_err());
    }

    #[test]
    fn test_apply_query_from_args() {
        let args = args(&[
            "--search", "hornet",
            "--status", "needs-repair",
            "--type", "Racing",
            "--column", "camera=X",
            "--column", "type=Racing",
            "--sort", "quadName",
            "--desc",
        ]);
        let mut query = QueryConfig::default();
        apply_query(&mut query, &args);

        assert_eq!(query.search_term, "hornet");
        assert_eq!(query.status_filter, Some(StatusFilter::NeedsRepair));
        assert_eq!(query.type_filter.as_deref(), Some("Racing"));
        assert_eq!(query.battery_filter, None);
        assert_eq!(query.column_filters.len(), 2);
        assert_eq!(
            query.sort,
            Some(SortConfig::new(DroneField::QuadName, SortDirection::Descending))
        );
    }

    #[test]
    fn test_all_values_removes_column_filter() {
        let args = args(&["--column", "camera=X", "--column", "camera=all-values"]);
        let mut query = QueryConfig::default();
        apply_query(&mut query, &args);
        assert!(query.column_filters.is_empty());
        assert!(!query.filters_active());
    }

    #[test]
    fn test_empty_type_and_battery_are_unset() {
        let args = args(&["--type", "", "--battery", ""]);
        let mut query = QueryConfig::default();
        apply_query(&mut query, &args);
        assert_eq!(query.type_filter, None);
        assert_eq!(query.battery_filter, None);
    }

    fn fleet() -> Vec<DroneRecord> {
        (1..=3)
            .map(|id| DroneRecord {
                drone_type: if id == 2 { "Racing".into() } else { "Freestyle".into() },
                ..DroneRecord::new(id)
            })
            .collect()
    }

    #[test]
    fn test_reset_filters_preserves_selection_by_default() {
        let args = args(&["--type", "Racing", "--select-all", "--reset-filters", "--sort", "id", "--desc"]);
        let mut session = build_session(fleet(), &args, ResetPolicy::PreserveSelection);

        assert!(!session.config().filters_active());
        assert!(session.config().sort.is_some());
        assert_eq!(session.selection().iter().collect::<Vec<_>>(), vec![2]);
        let ids: Vec<i64> = session.view().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_reset_filters_with_clear_policy() {
        let args = args(&["--type", "Racing", "--select", "1", "--select-all", "--reset-filters"]);
        let mut session = build_session(fleet(), &args, ResetPolicy::ClearSelection);

        assert!(session.selection().is_empty());
        assert_eq!(session.visible_count(), 3);
    }

    #[test]
    fn test_without_reset_filters_keeps_query() {
        let args = args(&["--type", "Racing", "--select", "1"]);
        let mut session = build_session(fleet(), &args, ResetPolicy::ClearSelection);

        assert!(session.config().filters_active());
        assert!(session.selection().contains(1));
        assert_eq!(session.visible_count(), 1);
    }

    #[test]
    fn test_rejects_unknown_status() {
        let argv = ["drone-dashboard", "fleet.csv", "--status", "broken"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_desc_requires_sort() {
        let argv = ["drone-dashboard", "fleet.csv", "--desc"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
