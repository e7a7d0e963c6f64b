//! Reshaping heterogeneous source tables into long-format observations.
//!
//! Wide tables are melted (every date-labeled column becomes one row per
//! identity per date); long tables are projected down to the three columns
//! the pipeline cares about. Date handling is deliberately asymmetric: a wide
//! header that fails to parse is a structural defect and fails the source,
//! while a long row with an unparsable date is an optional sparse sample and
//! is skipped.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::{EpiError, Observation, RawTable, TableShape};

/// Country-level identity column of the wide sources.
pub const COUNTRY_COL: &str = "Country/Region";
/// Sub-national identity column of the wide sources; dropped by design, the
/// join key is country-level only.
pub const PROVINCE_COL: &str = "Province/State";

/// Identity columns of the wide layout; every other column must be a date.
const WIDE_IDENTITY: [&str; 4] = [PROVINCE_COL, COUNTRY_COL, "Lat", "Long"];

/// Column mapping for a long-shaped source.
#[derive(Debug, Clone)]
pub struct LongColumns {
    /// Country identity column.
    pub country: &'static str,
    /// Date column.
    pub date: &'static str,
    /// Cumulative value column.
    pub value: &'static str,
}

impl Default for LongColumns {
    fn default() -> Self {
        Self {
            country: "location",
            date: "date",
            value: "total_vaccinations",
        }
    }
}

/// Shared date rule across all sources: ISO dates first, then the short
/// month/day/year form the wide headers use (`1/22/20`).
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%y"))
        .ok()
}

/// Reshape a raw table into long-format observations according to its shape.
///
/// # Errors
/// Propagates [`melt_wide`] / [`project_long`] failures.
pub fn reshape(table: &RawTable, columns: Option<&LongColumns>) -> Result<Vec<Observation>, EpiError> {
    match table.shape {
        TableShape::Wide => melt_wide(table),
        TableShape::Long => {
            let default_columns = LongColumns::default();
            project_long(table, columns.unwrap_or(&default_columns))
        }
    }
}

/// Melt a wide table into one observation per identity row per date column.
///
/// Output has exactly `rows × date-columns` observations, in input identity
/// order then ascending date. Empty value cells read as 0: the wide sources
/// publish a dense cumulative grid where a blank means "nothing yet".
///
/// # Errors
/// `SourceMalformed` when the country column is missing; `DateParse` naming
/// the offending label when a non-identity column is not a date.
pub fn melt_wide(table: &RawTable) -> Result<Vec<Observation>, EpiError> {
    let country_idx = table.require_column(COUNTRY_COL)?;

    let mut date_cols: Vec<(usize, NaiveDate)> = Vec::new();
    for (idx, label) in table.headers.iter().enumerate() {
        if is_wide_identity(label) {
            continue;
        }
        let date =
            parse_date(label).ok_or_else(|| EpiError::date_parse(&table.source, label))?;
        date_cols.push((idx, date));
    }
    date_cols.sort_by_key(|&(_, date)| date);

    let mut out = Vec::with_capacity(table.rows.len().saturating_mul(date_cols.len()));
    for row in &table.rows {
        let country = row
            .get(country_idx)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        for &(idx, date) in &date_cols {
            let value = parse_value(row.get(idx)).unwrap_or(0.0);
            out.push(Observation {
                country: country.clone(),
                date,
                value,
            });
        }
    }
    Ok(out)
}

/// Project a long table down to (identity, date, value) observations.
///
/// Rows with unparsable dates or absent values are sparse samples and are
/// skipped rather than failing the source. Output preserves first-appearance
/// identity order, then ascending date.
///
/// # Errors
/// `SourceMalformed` when one of the contract columns is missing.
pub fn project_long(table: &RawTable, columns: &LongColumns) -> Result<Vec<Observation>, EpiError> {
    let country_idx = table.require_column(columns.country)?;
    let date_idx = table.require_column(columns.date)?;
    let value_idx = table.require_column(columns.value)?;

    let mut identity_rank: HashMap<String, usize> = HashMap::new();
    let mut ranked: Vec<(usize, Observation)> = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;

    for row in &table.rows {
        let Some(date) = row.get(date_idx).and_then(|s| parse_date(s)) else {
            skipped += 1;
            continue;
        };
        let Some(value) = parse_value(row.get(value_idx)) else {
            skipped += 1;
            continue;
        };
        let country = row
            .get(country_idx)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let next_rank = identity_rank.len();
        let rank = *identity_rank.entry(country.clone()).or_insert(next_rank);
        ranked.push((rank, Observation { country, date, value }));
    }

    if skipped > 0 {
        debug!(source = %table.source, skipped, "skipped sparse rows in long source");
    }

    ranked.sort_by(|a, b| (a.0, a.1.date).cmp(&(b.0, b.1.date)));
    Ok(ranked.into_iter().map(|(_, obs)| obs).collect())
}

fn is_wide_identity(label: &str) -> bool {
    WIDE_IDENTITY
        .iter()
        .any(|c| c.eq_ignore_ascii_case(label.trim()))
}

/// Parse a value cell. Empty, non-numeric, or negative cells count as absent.
fn parse_value(cell: Option<&String>) -> Option<f64> {
    let v = cell?.trim();
    if v.is_empty() {
        return None;
    }
    v.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}
