//! A small deterministic world mirroring the real source shapes.
//!
//! Countries are chosen to exercise the interesting joins: Australia has two
//! sub-national rows, Taiwan carries the `*` annotation and is missing from
//! the deaths source, and the vaccination file includes a `World` aggregate
//! that is not part of the confirmed universe.

use epiwatch_core::Metric;

use crate::MockSource;

const WIDE_HEADERS: [&str; 7] = [
    "Province/State",
    "Country/Region",
    "Lat",
    "Long",
    "1/22/20",
    "1/23/20",
    "1/24/20",
];

/// Confirmed-cases fixture: wide, with sub-national Australia rows.
#[must_use]
pub fn confirmed() -> MockSource {
    MockSource::wide(
        "mock-confirmed",
        Metric::ConfirmedCases,
        &WIDE_HEADERS,
        &[
            &["", "India", "20.59", "78.96", "0", "3", "9"],
            &["New South Wales", "Australia", "-33.87", "151.21", "1", "2", "4"],
            &["Victoria", "Australia", "-37.81", "144.96", "0", "1", "3"],
            &["", "Taiwan*", "23.7", "121.0", "1", "1", "2"],
        ],
    )
}

/// Deaths fixture: wide, same layout, no Taiwan row.
#[must_use]
pub fn deaths() -> MockSource {
    MockSource::wide(
        "mock-deaths",
        Metric::Deaths,
        &WIDE_HEADERS,
        &[
            &["", "India", "20.59", "78.96", "0", "0", "1"],
            &["New South Wales", "Australia", "-33.87", "151.21", "0", "0", "1"],
            &["Victoria", "Australia", "-37.81", "144.96", "0", "0", "0"],
        ],
    )
}

/// Vaccinations fixture: long, sparse, with a `World` aggregate row and a
/// broken row that reshaping must skip.
#[must_use]
pub fn vaccinations() -> MockSource {
    MockSource::long(
        "mock-vaccinations",
        Metric::Vaccinations,
        &["location", "date", "total_vaccinations", "daily_vaccinations"],
        &[
            &["India", "2021-01-16", "191181", ""],
            &["India", "2021-01-17", "", "224"],
            &["India", "2021-01-18", "454049", "1100"],
            &["Australia", "2021-02-22", "30", "30"],
            &["World", "2021-01-16", "500000", ""],
            &["Atlantis", "not-a-date", "5", ""],
        ],
    )
}
