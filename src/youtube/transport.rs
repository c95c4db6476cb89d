//! HTTP access to the YouTube Data API.
//!
//! The client talks to upstream through [`Transport`] so tests can swap in a
//! canned responder.

use crate::error::YouTubeError;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Query parameters for a single list call.
pub type Params = Vec<(&'static str, String)>;

/// A GET against one Data API resource (`search`, `videos`, ...).
pub trait Transport: Send + Sync {
    /// Fetch `resource` with `params` and return the decoded JSON body.
    ///
    /// Non-2xx responses must surface as [`YouTubeError::Api`].
    fn get(
        &self,
        resource: &'static str,
        params: Params,
    ) -> impl Future<Output = Result<Value, YouTubeError>> + Send;
}

/// reqwest-backed transport, authenticating with an API key.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL for YouTube Data API
    base_url: String,
}

impl HttpTransport {
    /// Create a new transport.
    ///
    /// # Arguments
    /// * `api_key` - Data API key, already checked to be non-empty
    /// * `base_url` - API root, e.g. `https://www.googleapis.com/youtube/v3`
    /// * `timeout` - Per-request timeout
    ///
    /// # Returns
    /// * `Result<HttpTransport, YouTubeError>` - New transport or error
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, YouTubeError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, resource: &'static str, params: Params) -> Result<Value, YouTubeError> {
        let url = format!("{}/{}", self.base_url, resource);
        tracing::debug!(resource, ?params, "YouTube API request");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = HttpTransport::new(
            "test_key",
            "https://www.googleapis.com/youtube/v3/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(transport.base_url, "https://www.googleapis.com/youtube/v3");
    }
}
