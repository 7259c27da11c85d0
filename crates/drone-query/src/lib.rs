//! # Drone Query
//!
//! Derives the visible, ordered subset of a fleet from a [`QueryConfig`],
//! and tracks which drones are selected.
//!
//! ## Pipeline
//!
//! ```text
//! records ──► filter ──► sort ──► view
//!                                  │
//!                     select_all ◄─┘
//! ```
//!
//! Every stage is a pure function of `(records, config)`. [`ViewCache`]
//! memoizes the last derivation and [`FleetSession`] owns one loaded fleet
//! together with its query and selection state.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod filter;
pub mod selection;
pub mod session;
pub mod sort;
pub mod view;

pub use config::{ColumnFilter, QueryConfig, SortConfig, SortDirection, StatusFilter};
pub use filter::{apply_filter, matches_query};
pub use selection::SelectionState;
pub use session::{FleetSession, ResetPolicy};
pub use sort::{apply_sort, compare_drones, sort_in_place};
pub use view::{derive_view, ViewCache};
