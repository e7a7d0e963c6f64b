//! Epiwatch reconciles heterogeneous epidemic time-series sources into one
//! per-country, per-date store and serves point queries against it.
//!
//! Overview
//! - Three independently shaped sources (confirmed cases, deaths,
//!   vaccinations) are fetched concurrently through the `epiwatch_core`
//!   `SourceLoader` contract.
//! - Wide sources are melted to long format, long sources are projected, and
//!   everything is joined on a normalized country key with sub-national rows
//!   summed into national figures.
//! - Each pipeline run builds a complete new immutable store and publishes
//!   it atomically: concurrent queries see either the old store or the new
//!   one in full, never a partial update.
//! - Build-time failures abort the run and leave the previously published
//!   store serving queries; stale-but-valid beats broken-but-fresh.
//!
//! Key behaviors and trade-offs
//! - The country universe is taken from the confirmed-cases source, the most
//!   complete one; other sources are left-joined onto it with explicit zero
//!   snapshots where they have no rows.
//! - Metric selection is a closed enum parsed once at the query boundary, so
//!   an unrecognized string can never reach the pipeline core.
//! - An empty history is a valid answer (country known, no rows for that
//!   metric); `UnknownCountry` and `UnknownMetric` are typed errors.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use epiwatch::{Epiwatch, Metric};
//! use epiwatch_jhu::JhuSource;
//! use epiwatch_owid::OwidSource;
//!
//! let watch = Epiwatch::builder()
//!     .with_source(Arc::new(JhuSource::confirmed().build()?))
//!     .with_source(Arc::new(JhuSource::deaths().build()?))
//!     .with_source(Arc::new(OwidSource::vaccinations().build()?))
//!     .build()?;
//!
//! watch.refresh().await?;
//! let snapshot = watch.snapshot(Metric::ConfirmedCases)?;
//! let series = watch.history("India", Metric::Deaths)?;
//! ```
#![warn(missing_docs)]

mod core;
mod report;

pub use crate::core::{Epiwatch, EpiwatchBuilder};
pub use report::RefreshReport;

pub use epiwatch_core::{
    CountryKey, CountrySummary, EpiError, Metric, QueryService, RawTable, ReconciledStore, Series,
    SourceLoader, TableShape,
};
