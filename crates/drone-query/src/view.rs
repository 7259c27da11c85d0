//! Derived view: filter, then sort, with a one-entry memo.

use drone_domain::DroneRecord;
use tracing::debug;

use crate::config::QueryConfig;
use crate::filter::apply_filter;
use crate::sort::sort_in_place;

/// Visible drones for `config`: filtered, then sorted.
#[must_use]
pub fn derive_view(drones: &[DroneRecord], config: &QueryConfig) -> Vec<DroneRecord> {
    let mut view = apply_filter(drones, config);
    if let Some(sort) = &config.sort {
        sort_in_place(&mut view, sort);
    }
    view
}

/// Caches the last derived view.
///
/// The key is a caller-supplied record-set generation plus the full
/// [`QueryConfig`]. Callers must bump the generation whenever the record
/// set changes.
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    key: Option<(u64, QueryConfig)>,
    view: Vec<DroneRecord>,
    hits: u64,
    misses: u64,
}

impl ViewCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view, recomputing it on a key change.
    pub fn get_or_derive(
        &mut self,
        generation: u64,
        drones: &[DroneRecord],
        config: &QueryConfig,
    ) -> &[DroneRecord] {
        let fresh = matches!(&self.key, Some((cached_gen, cached_cfg)) if *cached_gen == generation && cached_cfg == config);

        if fresh {
            self.hits += 1;
            debug!(generation, hits = self.hits, "View cache hit");
        } else {
            self.misses += 1;
            self.view = derive_view(drones, config);
            self.key = Some((generation, config.clone()));
            debug!(
                generation,
                misses = self.misses,
                visible = self.view.len(),
                "View cache miss, re-derived"
            );
        }

        &self.view
    }

    /// Drop the cached view.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.view.clear();
    }

    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}
