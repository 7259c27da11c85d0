//! # Drone Ingest
//!
//! Turns fleet roster CSV text into [`DroneRecord`](drone_domain::DroneRecord)s.
//!
//! ## Layers
//!
//! - [`parser`] - pure, total positional CSV parsing
//! - [`source`] - file acceptance and asynchronous loading

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod error;
pub mod parser;
pub mod source;

pub use error::{IngestError, Result};
pub use parser::{parse_csv, split_row};
pub use source::{is_csv_source, load_fleet, parse_fleet};
