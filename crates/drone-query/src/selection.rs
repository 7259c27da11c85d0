//! Selected drone ids.

use std::collections::BTreeSet;

use drone_domain::DroneRecord;
use serde::{Deserialize, Serialize};

/// Set of selected drone ids. Filtering never touches it; only
/// [`select_all`](Self::select_all) looks at the current view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    ids: BTreeSet<i64>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Select exactly the visible drones, or clear the selection if it
    /// already equals that set.
    pub fn select_all(&mut self, visible: &[DroneRecord]) {
        let visible_ids: BTreeSet<i64> = visible.iter().map(|d| d.id).collect();
        if self.ids == visible_ids {
            self.ids.clear();
        } else {
            self.ids = visible_ids;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drones(ids: &[i64]) -> Vec<DroneRecord> {
        ids.iter().map(|&id| DroneRecord::new(id)).collect()
    }

    #[test]
    fn test_toggle() {
        let mut selection = SelectionState::new();
        assert!(selection.toggle(4));
        assert!(selection.contains(4));
        assert!(!selection.toggle(4));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_twice_clears() {
        let visible = drones(&[3, 1, 2]);
        let mut selection = SelectionState::new();

        selection.select_all(&visible);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![1, 2, 3]);

        selection.select_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_replaces_partial_selection() {
        let mut selection = SelectionState::new();
        selection.toggle(1);
        selection.toggle(99);

        selection.select_all(&drones(&[1, 2]));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![1, 2]);
        assert!(!selection.contains(99));
    }

    #[test]
    fn test_select_all_compares_sets_not_sizes() {
        let mut selection = SelectionState::new();
        selection.toggle(8);
        selection.toggle(9);

        // Same size as the visible set but different members.
        selection.select_all(&drones(&[1, 2]));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let mut selection = SelectionState::new();
        selection.select_all(&drones(&[5, 5, 6]));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut selection = SelectionState::new();
        selection.toggle(1);
        selection.toggle(2);
        selection.clear();
        assert!(selection.is_empty());
    }
}
