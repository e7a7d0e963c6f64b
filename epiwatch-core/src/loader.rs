use async_trait::async_trait;

use crate::{EpiError, LongColumns, Metric, RawTable, TableShape};

/// One raw tabular source.
///
/// This is the only interface in the system permitted to perform network
/// I/O. A loader serves exactly one metric; the orchestrator slots loaders
/// by their declared metric and fetches them concurrently.
///
/// No retry or backoff semantics are part of the contract: a single failed
/// load fails the whole pipeline run, and the previously published store
/// keeps serving queries.
#[async_trait]
pub trait SourceLoader: Send + Sync {
    /// Short source name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// The metric this source feeds.
    fn metric(&self) -> Metric;

    /// Native shape of the source table.
    fn shape(&self) -> TableShape;

    /// Column mapping for long-shaped sources; wide sources return `None`.
    fn long_columns(&self) -> Option<LongColumns> {
        match self.shape() {
            TableShape::Long => Some(LongColumns::default()),
            TableShape::Wide => None,
        }
    }

    /// Fetch and parse the source into a transient table.
    ///
    /// # Errors
    /// `SourceUnavailable` on fetch/decode failure, `SourceMalformed` when
    /// the table violates its structural column contract.
    async fn load(&self) -> Result<RawTable, EpiError>;
}
