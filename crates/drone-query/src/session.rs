//! Single-owner state for one loaded fleet.

use std::fmt;
use std::str::FromStr;

use drone_domain::{DomainError, DroneRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::QueryConfig;
use crate::selection::SelectionState;
use crate::view::ViewCache;

/// What "reset filters" does to the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPolicy {
    /// Keep selected ids across a filter reset
    #[default]
    PreserveSelection,
    /// Clear the selection together with the filters
    ClearSelection,
}

impl ResetPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreserveSelection => "preserve-selection",
            Self::ClearSelection => "clear-selection",
        }
    }
}

impl fmt::Display for ResetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResetPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve-selection" | "preserve" => Ok(Self::PreserveSelection),
            "clear-selection" | "clear" => Ok(Self::ClearSelection),
            other => Err(DomainError::UnknownResetPolicy(other.to_string())),
        }
    }
}

/// Records, query configuration and selection for one loaded roster.
#[derive(Debug, Clone, Default)]
pub struct FleetSession {
    drones: Vec<DroneRecord>,
    generation: u64,
    config: QueryConfig,
    selection: SelectionState,
    reset_policy: ResetPolicy,
    cache: ViewCache,
}

impl FleetSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reset_policy(reset_policy: ResetPolicy) -> Self {
        Self {
            reset_policy,
            ..Self::default()
        }
    }

    /// Replace the record set wholesale. Query configuration and selection
    /// go back to their defaults.
    pub fn load(&mut self, drones: Vec<DroneRecord>) {
        self.generation += 1;
        self.drones = drones;
        self.config = QueryConfig::default();
        self.selection.clear();
        self.cache.invalidate();
        info!(
            generation = self.generation,
            count = self.drones.len(),
            "Loaded fleet"
        );
    }

    #[must_use]
    pub fn drones(&self) -> &[DroneRecord] {
        &self.drones
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.drones.is_empty()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Mutable query configuration. The next [`view`](Self::view) call
    /// notices the change through config equality.
    pub fn config_mut(&mut self) -> &mut QueryConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: QueryConfig) {
        self.config = config;
    }

    #[must_use]
    pub const fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Filtered and sorted drones, memoized on (generation, config).
    pub fn view(&mut self) -> &[DroneRecord] {
        self.cache
            .get_or_derive(self.generation, &self.drones, &self.config)
    }

    pub fn visible_count(&mut self) -> usize {
        self.view().len()
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn toggle_selection(&mut self, id: i64) -> bool {
        self.selection.toggle(id)
    }

    /// Toggle between "every visible drone selected" and "nothing selected".
    pub fn select_all_visible(&mut self) {
        let visible = self
            .cache
            .get_or_derive(self.generation, &self.drones, &self.config);
        self.selection.select_all(visible);
        debug!(selected = self.selection.len(), "Select all toggled");
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Clear the query filters, and the selection too under
    /// [`ResetPolicy::ClearSelection`].
    pub fn reset_filters(&mut self) {
        self.config.reset_filters();
        if self.reset_policy == ResetPolicy::ClearSelection {
            self.selection.clear();
        }
        debug!(policy = %self.reset_policy, "Filters reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusFilter;
    use drone_domain::DroneField;

    fn fleet() -> Vec<DroneRecord> {
        (1..=4)
            .map(|id| DroneRecord {
                quad_name: format!("Quad {id}"),
                ready_for_field_testing: if id % 2 == 0 { "✓".into() } else { "X".into() },
                ..DroneRecord::new(id)
            })
            .collect()
    }

    fn loaded(policy: ResetPolicy) -> FleetSession {
        let mut session = FleetSession::with_reset_policy(policy);
        session.load(fleet());
        session
    }

    #[test]
    fn test_load_resets_state() {
        let mut session = loaded(ResetPolicy::PreserveSelection);
        session.config_mut().status_filter = Some(StatusFilter::Ready);
        session.toggle_selection(1);

        session.load(fleet());
        assert_eq!(session.generation(), 2);
        assert_eq!(session.config(), &QueryConfig::default());
        assert!(session.selection().is_empty());
        assert_eq!(session.visible_count(), 4);
    }

    #[test]
    fn test_view_follows_config_changes() {
        let mut session = loaded(ResetPolicy::default());
        assert_eq!(session.visible_count(), 4);

        session.config_mut().status_filter = Some(StatusFilter::Ready);
        let ids: Vec<i64> = session.view().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 4]);

        session.config_mut().toggle_sort(DroneField::Id);
        session.config_mut().toggle_sort(DroneField::Id);
        let ids: Vec<i64> = session.view().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![4, 2]);
    }

    #[test]
    fn test_select_all_uses_visible_drones() {
        let mut session = loaded(ResetPolicy::default());
        session.config_mut().status_filter = Some(StatusFilter::NotReady);

        session.select_all_visible();
        assert_eq!(session.selection().iter().collect::<Vec<_>>(), vec![1, 3]);

        session.select_all_visible();
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_selection_survives_filtering() {
        let mut session = loaded(ResetPolicy::default());
        session.toggle_selection(1);
        session.config_mut().status_filter = Some(StatusFilter::Ready);
        assert_eq!(session.visible_count(), 2);
        assert!(session.selection().contains(1));
    }

    #[test]
    fn test_reset_filters_preserves_selection_by_default() {
        let mut session = loaded(ResetPolicy::default());
        session.toggle_selection(3);
        session.config_mut().search_term = "quad 3".into();
        assert_eq!(session.visible_count(), 1);

        session.reset_filters();
        assert_eq!(session.visible_count(), 4);
        assert!(session.selection().contains(3));
    }

    #[test]
    fn test_reset_filters_can_clear_selection() {
        let mut session = loaded(ResetPolicy::ClearSelection);
        session.toggle_selection(3);
        session.reset_filters();
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_reset_policy_parse() {
        assert_eq!("clear".parse::<ResetPolicy>(), Ok(ResetPolicy::ClearSelection));
        assert_eq!(
            "preserve-selection".parse::<ResetPolicy>(),
            Ok(ResetPolicy::PreserveSelection)
        );
        assert_eq!(
            "sometimes".parse::<ResetPolicy>(),
            Err(DomainError::UnknownResetPolicy("sometimes".to_string()))
        );
    }
}
