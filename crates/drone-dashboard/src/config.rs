//! # Dashboard Configuration
//!
//! Environment-based defaults; command-line flags override them.

use std::env;

use clap::ValueEnum;
use drone_query::ResetPolicy;

/// How the drone list is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    Table,
    #[default]
    Cards,
}

/// What gets written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Stat cards, charts and the drone list
    #[default]
    Text,
    /// Full dashboard snapshot as JSON
    Json,
    /// Fleet report as Markdown
    Markdown,
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default list layout
    pub view: ViewMode,

    /// Default output format
    pub format: OutputFormat,

    /// Whether resetting filters also clears the selection
    pub reset_policy: ResetPolicy,

    /// Logging level for the dashboard crates
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            view: lookup("DASHBOARD_VIEW")
                .and_then(|v| ViewMode::from_str(&v, true).ok())
                .unwrap_or_default(),

            format: lookup("DASHBOARD_FORMAT")
                .and_then(|v| OutputFormat::from_str(&v, true).ok())
                .unwrap_or_default(),

            reset_policy: lookup("DASHBOARD_RESET_CLEARS_SELECTION")
                .map(|v| v == "true" || v == "1")
                .map_or(ResetPolicy::PreserveSelection, |clear| {
                    if clear {
                        ResetPolicy::ClearSelection
                    } else {
                        ResetPolicy::PreserveSelection
                    }
                }),

            log_level: lookup("DASHBOARD_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
