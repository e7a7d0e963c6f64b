use std::time::Duration;

use epiwatch_core::EpiError;

use crate::OwidSource;

/// Builder for [`OwidSource`] instances.
pub struct OwidSourceBuilder {
    name: &'static str,
    url: String,
    timeout: Duration,
}

impl OwidSourceBuilder {
    pub(crate) fn new(name: &'static str, url: &str) -> Self {
        Self {
            name,
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
    pub fn build(self) -> Result<OwidSource, EpiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| EpiError::unavailable(self.name, e.to_string()))?;
        Ok(OwidSource {
            name: self.name,
            url: self.url,
            client,
        })
    }
}
