//! Common data structures shared across the pipeline and query layer.

use core::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::EpiError;

/// Closed set of metrics served by the reconciled store.
///
/// Replaces string-keyed dispatch on a user-chosen metric name: strings are
/// parsed once at the query boundary via [`FromStr`], and everything deeper
/// matches exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Cumulative confirmed cases.
    ConfirmedCases,
    /// Cumulative deaths.
    Deaths,
    /// Cumulative vaccination doses administered.
    Vaccinations,
}

impl Metric {
    /// All recognized metrics, in canonical order.
    pub const ALL: [Self; 3] = [Self::ConfirmedCases, Self::Deaths, Self::Vaccinations];

    /// Canonical snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfirmedCases => "confirmed_cases",
            Self::Deaths => "deaths",
            Self::Vaccinations => "vaccinations",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = EpiError;

    /// Accepts the canonical names plus the labels the upstream sources and
    /// dashboards historically used ("Confirmed Cases", "total_vaccinations").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase().replace('_', " ");
        match folded.as_str() {
            "confirmed cases" | "confirmed" | "cases" => Ok(Self::ConfirmedCases),
            "deaths" => Ok(Self::Deaths),
            "vaccinations" | "total vaccinations" => Ok(Self::Vaccinations),
            _ => Err(EpiError::unknown_metric(s)),
        }
    }
}

/// Canonical country identifier; the single join key across all sources.
///
/// Construct via [`CountryKey::normalize`], which is total: degenerate input
/// maps to the [`CountryKey::unknown`] sentinel rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryKey(pub(crate) String);

impl CountryKey {
    /// The normalized key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sentinel key for identities that normalize to nothing.
    #[must_use]
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    /// Whether this is the sentinel key.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == "unknown"
    }
}

impl fmt::Display for CountryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One long-format sample prior to key normalization.
///
/// `country` is still the raw provider identity; the reconciler normalizes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Raw country identity as the provider spells it.
    pub country: String,
    /// Calendar date of the sample.
    pub date: NaiveDate,
    /// Non-negative cumulative value.
    pub value: f64,
}

/// One row of the merged per-country summary: every metric's snapshot value.
///
/// Countries absent from a source carry an explicit 0 for that source's
/// metric, never a missing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySummary {
    /// Canonical country key.
    pub country: CountryKey,
    /// Snapshot of cumulative confirmed cases.
    pub confirmed: f64,
    /// Snapshot of cumulative deaths.
    pub deaths: f64,
    /// Snapshot of cumulative vaccinations.
    pub vaccinations: f64,
}
