//! Unified error type for the epiwatch workspace.

use thiserror::Error;

/// Unified error type for the epiwatch workspace.
///
/// Build-time variants (`SourceUnavailable`, `SourceMalformed`, `DateParse`)
/// are fatal to a pipeline run: no partial store is ever published. Query-time
/// variants (`UnknownMetric`, `UnknownCountry`, `NotReady`) are returned to
/// the caller and leave the service untouched.
#[derive(Debug, Error)]
pub enum EpiError {
    /// A source could not be fetched or its payload could not be read.
    #[error("{source} unavailable: {msg}")]
    SourceUnavailable {
        /// Source name that failed (e.g. "jhu-confirmed").
        ///
        /// Written as `r#source` so thiserror does not treat this plain
        /// string as the error's `source()` cause.
        r#source: String,
        /// Human-readable transport or decode failure.
        msg: String,
    },

    /// A source was fetched but violates its structural column contract.
    #[error("{source} malformed: {msg}")]
    SourceMalformed {
        /// Source name that failed.
        r#source: String,
        /// Description of the structural problem (e.g. a missing column).
        msg: String,
    },

    /// A structural date label in a wide table could not be parsed.
    #[error("{source}: unparsable date label \"{label}\"")]
    DateParse {
        /// Source name whose header is broken.
        r#source: String,
        /// The offending column label.
        label: String,
    },

    /// The requested metric is not one of the recognized values.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// The requested country was never part of the reconciled universe.
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    /// Invalid orchestrator configuration (e.g. a missing source slot).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No reconciled store has been published yet.
    #[error("no reconciled store has been published yet")]
    NotReady,
}

impl EpiError {
    /// Helper: build a `SourceUnavailable` error for a named source.
    pub fn unavailable(source: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source: source.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceMalformed` error for a named source.
    pub fn malformed(source: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::SourceMalformed {
            source: source.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `DateParse` error naming the offending column label.
    pub fn date_parse(source: impl Into<String>, label: impl Into<String>) -> Self {
        Self::DateParse {
            source: source.into(),
            label: label.into(),
        }
    }

    /// Helper: build an `UnknownMetric` error from the rejected input.
    pub fn unknown_metric(raw: impl Into<String>) -> Self {
        Self::UnknownMetric(raw.into())
    }

    /// Helper: build an `UnknownCountry` error from the rejected input.
    pub fn unknown_country(raw: impl Into<String>) -> Self {
        Self::UnknownCountry(raw.into())
    }

    /// Helper: build a `Config` error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
