//! epiwatch-owid
//!
//! Connector for the Our World in Data vaccinations CSV. The file is already
//! long-shaped (one row per location per date) and carries many columns; only
//! `location`, `date`, and `total_vaccinations` are part of the contract,
//! everything else is ignored. Rows are sparse: locations report on their own
//! cadence and `total_vaccinations` is frequently blank.
#![warn(missing_docs)]

mod builder;
pub use builder::OwidSourceBuilder;

use async_trait::async_trait;
use tracing::{debug, info};

use epiwatch_core::{EpiError, LongColumns, Metric, RawTable, SourceLoader, TableShape};

/// Published OWID vaccinations dataset.
pub const VACCINATIONS_URL: &str = "https://raw.githubusercontent.com/owid/covid-19-data/master/public/data/vaccinations/vaccinations.csv";

/// Long-format loader for the OWID vaccinations file.
pub struct OwidSource {
    pub(crate) name: &'static str,
    pub(crate) url: String,
    pub(crate) client: reqwest::Client,
}

impl OwidSource {
    /// Builder preconfigured for the vaccinations dataset.
    #[must_use]
    pub fn vaccinations() -> OwidSourceBuilder {
        OwidSourceBuilder::new("owid-vaccinations", VACCINATIONS_URL)
    }
}

#[async_trait]
impl SourceLoader for OwidSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn metric(&self) -> Metric {
        Metric::Vaccinations
    }

    fn shape(&self) -> TableShape {
        TableShape::Long
    }

    async fn load(&self) -> Result<RawTable, EpiError> {
        debug!(source = self.name, url = %self.url, "fetching long csv");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| EpiError::unavailable(self.name, e.to_string()))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| EpiError::unavailable(self.name, e.to_string()))?;

        let table = RawTable::from_csv(self.name, TableShape::Long, &body)?;
        // structural contract: identity, date, and value columns must exist
        let columns = LongColumns::default();
        table.require_column(columns.country)?;
        table.require_column(columns.date)?;
        table.require_column(columns.value)?;
        info!(source = self.name, rows = table.rows.len(), "loaded");
        Ok(table)
    }
}
