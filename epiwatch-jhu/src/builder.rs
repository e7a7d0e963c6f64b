use std::time::Duration;

use epiwatch_core::{EpiError, Metric};

use crate::JhuSource;

/// Builder for [`JhuSource`] instances.
///
/// Defaults target the published CSSE URLs; tests point the URL at a local
/// mock server instead.
pub struct JhuSourceBuilder {
    name: &'static str,
    metric: Metric,
    url: String,
    timeout: Duration,
}

impl JhuSourceBuilder {
    pub(crate) fn new(name: &'static str, metric: Metric, url: &str) -> Self {
        Self {
            name,
            metric,
            url: url.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the endpoint URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Override the whole-request timeout (default 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the source.
    ///
    /// # Errors
    /// Returns `SourceUnavailable` when the HTTP client cannot be built.
    pub fn build(self) -> Result<JhuSource, EpiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| EpiError::unavailable(self.name, e.to_string()))?;
        Ok(JhuSource {
            name: self.name,
            metric: self.metric,
            url: self.url,
            client,
        })
    }
}
