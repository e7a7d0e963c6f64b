//! Deterministic in-memory sources for CI-safe examples and integration
//! tests. No network I/O; loads return a clone of a prebuilt table, or a
//! scripted failure when toggled.
#![warn(missing_docs)]

pub mod fixtures;

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use epiwatch_core::{EpiError, Metric, RawTable, SourceLoader, TableShape};

/// In-memory source with a toggleable failure mode.
pub struct MockSource {
    name: &'static str,
    metric: Metric,
    table: RawTable,
    fail: AtomicBool,
}

impl MockSource {
    /// Wrap a prebuilt table.
    #[must_use]
    pub fn new(name: &'static str, metric: Metric, table: RawTable) -> Self {
        Self {
            name,
            metric,
            table,
            fail: AtomicBool::new(false),
        }
    }

    /// Build a wide source from header/row literals.
    #[must_use]
    pub fn wide(name: &'static str, metric: Metric, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(name, metric, table_of(name, TableShape::Wide, headers, rows))
    }

    /// Build a long source from header/row literals.
    #[must_use]
    pub fn long(name: &'static str, metric: Metric, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(name, metric, table_of(name, TableShape::Long, headers, rows))
    }

    /// Make subsequent loads fail with `SourceUnavailable`.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

fn table_of(name: &str, shape: TableShape, headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        source: name.to_string(),
        shape,
        headers: headers.iter().map(ToString::to_string).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    }
}

#[async_trait]
impl SourceLoader for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    fn shape(&self) -> TableShape {
        self.table.shape
    }

    async fn load(&self) -> Result<RawTable, EpiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EpiError::unavailable(self.name, "forced failure"));
        }
        Ok(self.table.clone())
    }
}
