use std::sync::Arc;

use chrono::NaiveDate;

use crate::{CountryKey, CountrySummary, EpiError, Metric, ReconciledStore, Series};

/// Read-only query surface over one published store.
///
/// Cheap to clone; holds an `Arc` to an immutable [`ReconciledStore`], so a
/// service handed out before a pipeline rebuild keeps answering from the
/// store it was created against.
#[derive(Debug, Clone)]
pub struct QueryService {
    store: Arc<ReconciledStore>,
}

impl QueryService {
    /// Wrap a published store.
    #[must_use]
    pub fn new(store: Arc<ReconciledStore>) -> Self {
        Self { store }
    }

    /// Latest/maximum value per country for one metric, ordered
    /// lexicographically by country key. Zero-filled over the universe.
    #[must_use]
    pub fn snapshot(&self, metric: Metric) -> Vec<(CountryKey, f64)> {
        self.store
            .snapshot_table(metric)
            .iter()
            .map(|(key, value)| (key.clone(), *value))
            .collect()
    }

    /// Full dated series for one country and metric, dates ascending.
    ///
    /// An empty sequence is a valid, displayable answer: the country is part
    /// of the universe but the source had no rows for it.
    ///
    /// # Errors
    /// `UnknownCountry` when the normalized key was never in the universe.
    pub fn history(&self, country: &str, metric: Metric) -> Result<Series, EpiError> {
        let key = CountryKey::normalize(country);
        if !self.store.contains(&key) {
            return Err(EpiError::unknown_country(country));
        }
        Ok(self
            .store
            .history_table(metric)
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    /// Every country in the universe, lexicographic order.
    #[must_use]
    pub fn countries(&self) -> Vec<CountryKey> {
        self.store.universe().iter().cloned().collect()
    }

    /// One row per country with all three snapshot values; the merged
    /// summary table the map view is fed from.
    #[must_use]
    pub fn overview(&self) -> Vec<CountrySummary> {
        let confirmed = self.store.snapshot_table(Metric::ConfirmedCases);
        let deaths = self.store.snapshot_table(Metric::Deaths);
        let vaccinations = self.store.snapshot_table(Metric::Vaccinations);
        self.store
            .universe()
            .iter()
            .map(|key| CountrySummary {
                country: key.clone(),
                confirmed: confirmed.get(key).copied().unwrap_or(0.0),
                deaths: deaths.get(key).copied().unwrap_or(0.0),
                vaccinations: vaccinations.get(key).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Date range covered by one country's series, if it has any rows.
    #[must_use]
    pub fn history_span(&self, country: &str, metric: Metric) -> Option<(NaiveDate, NaiveDate)> {
        let key = CountryKey::normalize(country);
        let series = self.store.history_table(metric).get(&key)?;
        match (series.first(), series.last()) {
            (Some(&(first, _)), Some(&(last, _))) => Some((first, last)),
            _ => None,
        }
    }
}
