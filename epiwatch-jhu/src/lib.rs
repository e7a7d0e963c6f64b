//! epiwatch-jhu
//!
//! Connector for the JHU CSSE global time-series CSVs. The confirmed-cases
//! and deaths files share one wide layout: identity columns
//! (`Province/State`, `Country/Region`, `Lat`, `Long`) followed by one column
//! per date. Rows are sub-national partitions; collapsing them into national
//! figures is the reconciler's job, not this crate's.
#![warn(missing_docs)]

mod builder;
pub use builder::JhuSourceBuilder;

use async_trait::async_trait;
use tracing::{debug, info};

use epiwatch_core::{COUNTRY_COL, EpiError, Metric, RawTable, SourceLoader, TableShape};

/// Published CSSE global confirmed-cases time series.
pub const CONFIRMED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";

/// Published CSSE global deaths time series.
pub const DEATHS_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_deaths_global.csv";

/// Wide-format loader for one CSSE global time-series file.
pub struct JhuSource {
    pub(crate) name: &'static str,
    pub(crate) metric: Metric,
    pub(crate) url: String,
    pub(crate) client: reqwest::Client,
}

impl JhuSource {
    /// Builder preconfigured for the confirmed-cases series.
    #[must_use]
    pub fn confirmed() -> JhuSourceBuilder {
        JhuSourceBuilder::new("jhu-confirmed", Metric::ConfirmedCases, CONFIRMED_URL)
    }

    /// Builder preconfigured for the deaths series.
    #[must_use]
    pub fn deaths() -> JhuSourceBuilder {
        JhuSourceBuilder::new("jhu-deaths", Metric::Deaths, DEATHS_URL)
    }
}

#[async_trait]
impl SourceLoader for JhuSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    fn shape(&self) -> TableShape {
        TableShape::Wide
    }

    async fn load(&self) -> Result<RawTable, EpiError> {
        debug!(source = self.name, url = %self.url, "fetching wide csv");
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

        let table = RawTable::from_csv(self.name, TableShape::Wide, &body)?;
        // structural contract: the country identity column must exist
        table.require_column(COUNTRY_COL)?;
        info!(source = self.name, rows = table.rows.len(), "loaded");
        Ok(table)
    }
}
