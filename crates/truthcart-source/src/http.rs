//! HTTP client for a signal aggregation endpoint.
//!
//! Posts the product query as JSON and expects a [`SourceBatch`] body. The
//! endpoint does the actual community collection; this client only enforces
//! a bounded timeout and surfaces failures as [`SourceError`]. No retries:
//! the caller degrades to an empty item list on any failure.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SourceError;
use crate::types::{SourceBatch, SourceQuery};

/// Client for a configured signal aggregation endpoint.
///
/// Use [`HttpSignalSource::new`] with the URL from configuration; tests
/// point it at a mock server the same way.
#[derive(Debug)]
pub struct HttpSignalSource {
    client: Client,
    endpoint: Url,
}

impl HttpSignalSource {
    /// Creates a client posting to `base_url` with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash and its absence must hit the same route, so the
        // stored endpoint always drops it.
        let trimmed = base_url.trim_end_matches('/');
        let endpoint = Url::parse(trimmed).map_err(|e| SourceError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    /// Fetches the raw signal batch for one product query.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure, timeout, or a non-2xx
    ///   status.
    /// - [`SourceError::Deserialize`] if the body is not a valid batch.
    pub async fn fetch(&self, query: &SourceQuery) -> Result<SourceBatch, SourceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let batch: SourceBatch =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: self.endpoint.to_string(),
                source: e,
            })?;

        tracing::debug!(
            product = %query.product_name,
            items = batch.items.len(),
            has_metadata = batch.metadata.is_some(),
            "fetched signal batch"
        );
        Ok(batch)
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized_away() {
        let a = HttpSignalSource::new("http://127.0.0.1:9000/signals/", 5, "test-agent")
            .expect("client construction should not fail");
        let b = HttpSignalSource::new("http://127.0.0.1:9000/signals", 5, "test-agent")
            .expect("client construction should not fail");
        assert_eq!(a.endpoint(), b.endpoint());
        assert_eq!(a.endpoint(), "http://127.0.0.1:9000/signals");
    }

    #[test]
    fn a_bare_host_keeps_the_root_path() {
        let client = HttpSignalSource::new("http://127.0.0.1:9000", 5, "test-agent")
            .expect("client construction should not fail");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn an_unparseable_url_is_rejected() {
        let err = HttpSignalSource::new("not a url", 5, "test-agent").unwrap_err();
        assert!(matches!(err, SourceError::InvalidUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }
}
