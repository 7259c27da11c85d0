//! Report generation for fleet analytics.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::FleetAnalytics;
use crate::error::Result;
use crate::queries::{DistributionEntry, StatusCounters};

/// Fleet overview report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    pub generated_at: String,
    pub counters: StatusCounters,
    pub ready_percentage: u32,
    pub battery_distribution: Vec<DistributionEntry>,
    pub type_distribution: Vec<DistributionEntry>,
}

impl FleetAnalytics<'_> {
    /// Generate the fleet overview report.
    #[must_use]
    pub fn generate_report(&self) -> FleetReport {
        let counters = self.status_counters();
        debug!(
            total = counters.total,
            ready = counters.ready,
            "Generating fleet report"
        );

        FleetReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            counters,
            ready_percentage: counters.ready_percentage(),
            battery_distribution: crate::queries::battery_distribution(self.drones),
            type_distribution: crate::queries::type_distribution(self.drones),
        }
    }

    /// Generate report as JSON string.
    pub fn generate_report_json(&self) -> Result<String> {
        let report = self.generate_report();
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Generate Markdown report.
    #[must_use]
    pub fn generate_report_markdown(&self) -> String {
        let report = self.generate_report();
        let counters = &report.counters;

        let mut md = String::new();
        md.push_str("# Drone Fleet Report\n\n");
        let _ = writeln!(md, "**Generated:** {}\n", report.generated_at);

        md.push_str("## Fleet Status\n\n");
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        let _ = writeln!(md, "| Total Drones | {} |", counters.total);
        let _ = writeln!(
            md,
            "| Ready for Field | {} ({}%) |",
            counters.ready, report.ready_percentage
        );
        let _ = writeln!(md, "| Not Ready | {} |", counters.not_ready);
        let _ = writeln!(md, "| Needs Repair | {} |", counters.needs_repair);
        let _ = writeln!(md, "| Camera Issues | {} |", counters.missing_camera);
        md.push('\n');

        write_distribution(&mut md, "Battery Distribution", "Battery Type", &report.battery_distribution);
        write_distribution(&mut md, "Drone Type Distribution", "Type", &report.type_distribution);

        md
    }
}

fn write_distribution(md: &mut String, title: &str, column: &str, entries: &[DistributionEntry]) {
    if entries.is_empty() {
        return;
    }

    let total: usize = entries.iter().map(|e| e.value).sum();
    let _ = writeln!(md, "## {title}\n");
    let _ = writeln!(md, "| {column} | Count | Share |");
    md.push_str("|------|-------|-------|\n");
    for entry in entries {
        let share = entry.value as f64 / total as f64 * 100.0;
        let _ = writeln!(md, "| {} | {} | {:.0}% |", entry.name, entry.value, share);
    }
    md.push('\n');
}
