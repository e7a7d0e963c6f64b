use std::time::Duration;

use serde::Serialize;

/// Statistics from one completed pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    /// Long rows produced from the confirmed-cases source.
    pub confirmed_rows: usize,
    /// Long rows produced from the deaths source.
    pub deaths_rows: usize,
    /// Long rows produced from the vaccination source.
    pub vaccination_rows: usize,
    /// Size of the reconciled country universe.
    pub countries: usize,
    /// Wall-clock time of the whole run, fetches included.
    pub elapsed: Duration,
}
