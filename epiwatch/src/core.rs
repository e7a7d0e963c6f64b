use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info};

use epiwatch_core::{
    CountryKey, CountrySummary, EpiError, Metric, QueryService, ReconciledStore, Series,
    SourceLoader, reconcile, reshape,
};

use crate::report::RefreshReport;

/// Orchestrator that runs the ingestion pipeline and serves queries against
/// the most recently published store.
pub struct Epiwatch {
    confirmed: Arc<dyn SourceLoader>,
    deaths: Arc<dyn SourceLoader>,
    vaccinations: Arc<dyn SourceLoader>,
    // None until the first successful refresh; swapped wholesale afterwards.
    store: RwLock<Option<Arc<ReconciledStore>>>,
}

impl std::fmt::Debug for Epiwatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Epiwatch")
            .field("confirmed", &self.confirmed.name())
            .field("deaths", &self.deaths.name())
            .field("vaccinations", &self.vaccinations.name())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing an [`Epiwatch`] orchestrator.
#[derive(Default)]
pub struct EpiwatchBuilder {
    confirmed: Option<Arc<dyn SourceLoader>>,
    deaths: Option<Arc<dyn SourceLoader>>,
    vaccinations: Option<Arc<dyn SourceLoader>>,
}

impl EpiwatchBuilder {
    /// Create an empty builder; every metric slot must be filled before
    /// [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source; the slot is chosen by the loader's declared metric.
    /// Registering a second loader for the same metric replaces the first.
    #[must_use]
    pub fn with_source(mut self, loader: Arc<dyn SourceLoader>) -> Self {
        match loader.metric() {
            Metric::ConfirmedCases => self.confirmed = Some(loader),
            Metric::Deaths => self.deaths = Some(loader),
            Metric::Vaccinations => self.vaccinations = Some(loader),
        }
        self
    }

    /// Finalize the orchestrator.
    ///
    /// # Errors
    /// `Config` when a metric slot has no registered source.
    pub fn build(self) -> Result<Epiwatch, EpiError> {
        let missing = |m: Metric| EpiError::config(format!("no source registered for {m}"));
        Ok(Epiwatch {
            confirmed: self.confirmed.ok_or_else(|| missing(Metric::ConfirmedCases))?,
            deaths: self.deaths.ok_or_else(|| missing(Metric::Deaths))?,
            vaccinations: self.vaccinations.ok_or_else(|| missing(Metric::Vaccinations))?,
            store: RwLock::new(None),
        })
    }
}

impl Epiwatch {
    /// Start building an orchestrator.
    #[must_use]
    pub fn builder() -> EpiwatchBuilder {
        EpiwatchBuilder::new()
    }

    /// Run one full pipeline pass: fetch the three sources concurrently,
    /// reshape, reconcile, and atomically publish the new store.
    ///
    /// The three loads have no ordering dependency but reconciliation waits
    /// for all of them. On any failure the run is abandoned and the
    /// previously published store (if any) keeps serving queries.
    ///
    /// # Errors
    /// Propagates the first `SourceUnavailable` / `SourceMalformed` /
    /// `DateParse` encountered.
    pub async fn refresh(&self) -> Result<RefreshReport, EpiError> {
        let started = Instant::now();
        let (confirmed_raw, deaths_raw, vaccination_raw) = tokio::try_join!(
            self.confirmed.load(),
            self.deaths.load(),
            self.vaccinations.load(),
        )?;

        let confirmed = reshape(&confirmed_raw, self.confirmed.long_columns().as_ref())?;
        let deaths = reshape(&deaths_raw, self.deaths.long_columns().as_ref())?;
        let vaccinations = reshape(&vaccination_raw, self.vaccinations.long_columns().as_ref())?;
        debug!(
            confirmed = confirmed.len(),
            deaths = deaths.len(),
            vaccinations = vaccinations.len(),
            "reshaped sources"
        );

        let confirmed_rows = confirmed.len();
        let deaths_rows = deaths.len();
        let vaccination_rows = vaccinations.len();

        let store = Arc::new(reconcile(confirmed, deaths, vaccinations));
        let countries = store.universe().len();
        self.publish(store);

        let elapsed = started.elapsed();
        info!(countries, ?elapsed, "published reconciled store");
        Ok(RefreshReport {
            confirmed_rows,
            deaths_rows,
            vaccination_rows,
            countries,
            elapsed,
        })
    }

    /// Query view over the currently published store.
    ///
    /// # Errors
    /// `NotReady` before the first successful [`refresh`](Self::refresh).
    pub fn query(&self) -> Result<QueryService, EpiError> {
        self.published().map(QueryService::new).ok_or(EpiError::NotReady)
    }

    /// Latest/maximum value per country, lexicographic by country key.
    ///
    /// # Errors
    /// `NotReady` before the first successful refresh.
    pub fn snapshot(&self, metric: Metric) -> Result<Vec<(CountryKey, f64)>, EpiError> {
        Ok(self.query()?.snapshot(metric))
    }

    /// Full dated series for one country and metric, dates ascending.
    ///
    /// # Errors
    /// `NotReady` before the first refresh, `UnknownCountry` when the country
    /// was never part of the universe.
    pub fn history(&self, country: &str, metric: Metric) -> Result<Series, EpiError> {
        self.query()?.history(country, metric)
    }

    /// Every country in the universe, lexicographic order.
    ///
    /// # Errors
    /// `NotReady` before the first successful refresh.
    pub fn countries(&self) -> Result<Vec<CountryKey>, EpiError> {
        Ok(self.query()?.countries())
    }

    /// The merged per-country summary across all three metrics.
    ///
    /// # Errors
    /// `NotReady` before the first successful refresh.
    pub fn overview(&self) -> Result<Vec<CountrySummary>, EpiError> {
        Ok(self.query()?.overview())
    }

    /// [`snapshot`](Self::snapshot) with the metric parsed at the boundary.
    ///
    /// # Errors
    /// `UnknownMetric` for an unrecognized name, plus the `snapshot` errors.
    pub fn snapshot_named(&self, metric: &str) -> Result<Vec<(CountryKey, f64)>, EpiError> {
        self.snapshot(metric.parse()?)
    }

    /// [`history`](Self::history) with the metric parsed at the boundary.
    ///
    /// # Errors
    /// `UnknownMetric` for an unrecognized name, plus the `history` errors.
    pub fn history_named(&self, country: &str, metric: &str) -> Result<Series, EpiError> {
        self.history(country, metric.parse()?)
    }

    /// Date range covered by one country's series, if any.
    ///
    /// # Errors
    /// `NotReady` before the first successful refresh.
    pub fn history_span(
        &self,
        country: &str,
        metric: Metric,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, EpiError> {
        Ok(self.query()?.history_span(country, metric))
    }

    fn publish(&self, store: Arc<ReconciledStore>) {
        let mut guard = self.store.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(store);
    }

    fn published(&self) -> Option<Arc<ReconciledStore>> {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
