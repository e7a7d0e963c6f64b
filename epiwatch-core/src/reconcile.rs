//! Joining the three reshaped tables into one immutable store.
//!
//! Reconciliation is total: any structural problem must already have been
//! caught by loading or reshaping. The join/aggregate core here only groups,
//! sums, and folds.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::{CountryKey, Metric, Observation};

/// Ordered history rows for one country and metric, dates ascending.
pub type Series = Vec<(NaiveDate, f64)>;

/// One slot per recognized metric, with exhaustive access.
#[derive(Debug, Clone, Default, PartialEq)]
struct MetricTable<T> {
    confirmed: T,
    deaths: T,
    vaccinations: T,
}

impl<T> MetricTable<T> {
    fn get(&self, metric: Metric) -> &T {
        match metric {
            Metric::ConfirmedCases => &self.confirmed,
            Metric::Deaths => &self.deaths,
            Metric::Vaccinations => &self.vaccinations,
        }
    }
}

/// Immutable output of one reconciliation run.
///
/// Rebuilt in full on every pipeline pass and never mutated afterwards;
/// readers hold it behind an `Arc` and see either this store or its complete
/// successor, never a partial update. All tables are `BTreeMap`s, so
/// iteration order is lexicographic by key and deterministic across rebuilds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciledStore {
    universe: BTreeSet<CountryKey>,
    history: MetricTable<BTreeMap<CountryKey, Series>>,
    snapshot: MetricTable<BTreeMap<CountryKey, f64>>,
}

impl ReconciledStore {
    /// The reconciled country universe: every key seen in the confirmed
    /// source, the most complete source by country coverage.
    #[must_use]
    pub fn universe(&self) -> &BTreeSet<CountryKey> {
        &self.universe
    }

    /// Whether a key is part of the universe.
    #[must_use]
    pub fn contains(&self, key: &CountryKey) -> bool {
        self.universe.contains(key)
    }

    /// Full per-country history for one metric, dates ascending within each
    /// country. Countries without rows for the metric are simply absent.
    #[must_use]
    pub fn history_table(&self, metric: Metric) -> &BTreeMap<CountryKey, Series> {
        self.history.get(metric)
    }

    /// Per-country snapshot for one metric, zero-filled over the whole
    /// universe: a country the source never mentions carries an explicit 0.
    #[must_use]
    pub fn snapshot_table(&self, metric: Metric) -> &BTreeMap<CountryKey, f64> {
        self.snapshot.get(metric)
    }
}

/// Join the three reshaped tables into one immutable store.
///
/// - Every observation's identity is normalized to a [`CountryKey`].
/// - Duplicates per (key, date) are summed for every metric: the wide sources
///   report disjoint sub-national partitions that must collapse into one
///   national figure, never be dropped or overwritten.
/// - The country universe is taken from the confirmed table; deaths and
///   vaccinations are left-joined onto it.
/// - Snapshots take the maximum value across dates (the metrics are
///   cumulative, so this guards against corrected historical rows reporting
///   a lower value late), with an explicit 0 where a source has no rows.
#[must_use]
pub fn reconcile(
    confirmed: Vec<Observation>,
    deaths: Vec<Observation>,
    vaccinations: Vec<Observation>,
) -> ReconciledStore {
    let confirmed = aggregate(confirmed);
    let deaths = aggregate(deaths);
    let vaccinations = aggregate(vaccinations);

    let universe: BTreeSet<CountryKey> = confirmed.keys().map(|(key, _)| key.clone()).collect();

    let (confirmed_history, confirmed_snapshot) = fold_metric(&universe, confirmed);
    let (deaths_history, deaths_snapshot) = fold_metric(&universe, deaths);
    let (vaccination_history, vaccination_snapshot) = fold_metric(&universe, vaccinations);

    ReconciledStore {
        universe,
        history: MetricTable {
            confirmed: confirmed_history,
            deaths: deaths_history,
            vaccinations: vaccination_history,
        },
        snapshot: MetricTable {
            confirmed: confirmed_snapshot,
            deaths: deaths_snapshot,
            vaccinations: vaccination_snapshot,
        },
    }
}

/// Normalize identities and sum duplicate (key, date) cells.
fn aggregate(observations: Vec<Observation>) -> BTreeMap<(CountryKey, NaiveDate), f64> {
    let mut grouped: BTreeMap<(CountryKey, NaiveDate), f64> = BTreeMap::new();
    for obs in observations {
        let key = CountryKey::normalize(&obs.country);
        *grouped.entry((key, obs.date)).or_insert(0.0) += obs.value;
    }
    grouped
}

/// Left-join one aggregated metric onto the universe.
fn fold_metric(
    universe: &BTreeSet<CountryKey>,
    grouped: BTreeMap<(CountryKey, NaiveDate), f64>,
) -> (BTreeMap<CountryKey, Series>, BTreeMap<CountryKey, f64>) {
    let mut history: BTreeMap<CountryKey, Series> = BTreeMap::new();
    let mut snapshot: BTreeMap<CountryKey, f64> =
        universe.iter().map(|key| (key.clone(), 0.0)).collect();

    for ((key, date), value) in grouped {
        if !universe.contains(&key) {
            continue;
        }
        if let Some(slot) = snapshot.get_mut(&key) {
            if value > *slot {
                *slot = value;
            }
        }
        history.entry(key).or_default().push((date, value));
    }

    (history, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_date;

    fn obs(country: &str, date: &str, value: f64) -> Observation {
        Observation {
            country: country.to_string(),
            date: parse_date(date).unwrap(),
            value,
        }
    }

    fn key(raw: &str) -> CountryKey {
        CountryKey::normalize(raw)
    }

    #[test]
    fn sums_subnational_partitions() {
        let store = reconcile(
            vec![obs("Australia", "1/22/20", 5.0), obs("Australia", "1/22/20", 7.0)],
            vec![],
            vec![],
        );
        let series = &store.history_table(Metric::ConfirmedCases)[&key("Australia")];
        assert_eq!(series, &vec![(parse_date("1/22/20").unwrap(), 12.0)]);
    }

    #[test]
    fn universe_comes_from_the_confirmed_source() {
        let store = reconcile(
            vec![obs("India", "1/22/20", 1.0)],
            vec![obs("Elbonia", "1/22/20", 2.0)],
            vec![obs("World", "2021-01-16", 3.0)],
        );
        assert!(store.contains(&key("India")));
        assert!(!store.contains(&key("Elbonia")));
        // non-universe rows are left-joined away entirely
        assert!(store.history_table(Metric::Deaths).get(&key("Elbonia")).is_none());
        assert!(store.snapshot_table(Metric::Vaccinations).get(&key("World")).is_none());
    }

    #[test]
    fn absent_source_rows_snapshot_as_explicit_zero() {
        let store = reconcile(vec![obs("India", "1/22/20", 1.0)], vec![], vec![]);
        assert_eq!(store.snapshot_table(Metric::Deaths)[&key("India")], 0.0);
        assert_eq!(store.snapshot_table(Metric::Vaccinations)[&key("India")], 0.0);
    }

    #[test]
    fn snapshot_is_the_maximum_across_dates() {
        // a corrected historical row reports a lower value on a later date
        let store = reconcile(
            vec![
                obs("India", "1/22/20", 10.0),
                obs("India", "1/23/20", 40.0),
                obs("India", "1/24/20", 30.0),
            ],
            vec![],
            vec![],
        );
        assert_eq!(store.snapshot_table(Metric::ConfirmedCases)[&key("India")], 40.0);
    }

    #[test]
    fn histories_are_date_ascending() {
        let store = reconcile(
            vec![
                obs("India", "1/24/20", 9.0),
                obs("India", "1/22/20", 0.0),
                obs("India", "1/23/20", 3.0),
            ],
            vec![],
            vec![],
        );
        let dates: Vec<NaiveDate> = store.history_table(Metric::ConfirmedCases)[&key("India")]
            .iter()
            .map(|&(date, _)| date)
            .collect();
        let mut sorted = dates.clone();
        sorted.sort_unstable();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn spellings_that_normalize_together_are_one_country() {
        let store = reconcile(
            vec![obs(" TAIWAN* ", "1/22/20", 1.0), obs("Taiwan", "1/23/20", 2.0)],
            vec![],
            vec![],
        );
        assert_eq!(store.universe().len(), 1);
        assert_eq!(store.history_table(Metric::ConfirmedCases)[&key("taiwan")].len(), 2);
    }

    #[test]
    fn rebuilding_from_identical_inputs_is_idempotent() {
        let confirmed = vec![obs("India", "1/22/20", 1.0), obs("Australia", "1/22/20", 2.0)];
        let deaths = vec![obs("India", "1/22/20", 0.0)];
        let vaccinations = vec![obs("India", "2021-01-16", 5.0)];
        let a = reconcile(confirmed.clone(), deaths.clone(), vaccinations.clone());
        let b = reconcile(confirmed, deaths, vaccinations);
        assert_eq!(a, b);
    }
}
