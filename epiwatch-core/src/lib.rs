//! epiwatch-core
//!
//! Core types and the ingestion pipeline shared across the epiwatch
//! ecosystem.
//!
//! - `types`: common data structures (metrics, country keys, observations).
//! - `table`: the transient parsed form of one tabular source.
//! - `loader`: the `SourceLoader` contract implemented by connector crates.
//! - `reshape`: wide-to-long melting and long-table projection.
//! - `normalize`: raw country identity to canonical key.
//! - `reconcile`: the join/aggregate core producing an immutable store.
//! - `query`: the read-only query surface served to the presentation layer.
//!
//! The pipeline pushes all failure detection to the edges: loading and
//! reshaping return `Result`, while `reconcile` is total once its inputs are
//! well-formed long tables. Query-time failures (`UnknownMetric`,
//! `UnknownCountry`) are typed and non-fatal, and an empty history is a
//! valid answer, not an error.
#![warn(missing_docs)]

pub mod error;
/// The `SourceLoader` contract implemented by connector crates.
pub mod loader;
pub mod normalize;
/// Read-only query surface over a reconciled store.
pub mod query;
pub mod reconcile;
pub mod reshape;
/// Transient parsed tables and their structural checks.
pub mod table;
pub mod types;

pub use error::EpiError;
pub use loader::SourceLoader;
pub use query::QueryService;
pub use reconcile::{ReconciledStore, Series, reconcile};
pub use reshape::{COUNTRY_COL, LongColumns, PROVINCE_COL, melt_wide, parse_date, project_long, reshape};
pub use table::{RawTable, TableShape};
pub use types::{CountryKey, CountrySummary, Metric, Observation};
