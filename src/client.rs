//! HTTP client for the search backend's single endpoint.
//!
//! Issues `GET <base>/search?q=<query>&from=<from>&size=<size>` and
//! decodes the JSON envelope. No authentication, no request body.

use std::time::Duration;

use url::Url;

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::route::SearchWindow;
use crate::types::SearchResponse;

/// Default User-Agent when none is configured.
const USER_AGENT: &str = concat!("stars-view/", env!("CARGO_PKG_VERSION"));

/// Client for the backend search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base: Url,
}

impl SearchClient {
    /// Build a client from the viewer configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Config`] if the configuration is invalid,
    /// or [`ViewerError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        let base = Url::parse(&config.base_url)
            .map_err(|e| ViewerError::Config(format!("base_url is not a valid URL: {e}")))?;

        let ua = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(ua)
            .build()
            .map_err(|e| ViewerError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base })
    }

    /// Fetch one window of results for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Http`] on transport failure or a
    /// non-success status, and [`ViewerError::Decode`] if the body is
    /// not a valid search response.
    pub async fn fetch(
        &self,
        query: &str,
        window: SearchWindow,
    ) -> Result<SearchResponse, ViewerError> {
        let url = self.search_url(query, window)?;
        tracing::trace!(from = window.from, size = window.size, "search request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ViewerError::Http(format!("search request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ViewerError::Http(format!("search HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| ViewerError::Http(format!("search response read failed: {e}")))?;
        tracing::trace!(bytes = body.len(), "search response received");

        serde_json::from_str(&body)
            .map_err(|e| ViewerError::Decode(format!("invalid search response: {e}")))
    }

    /// Build the request URL for one window.
    fn search_url(&self, query: &str, window: SearchWindow) -> Result<Url, ViewerError> {
        let mut url = self
            .base
            .join("search")
            .map_err(|e| ViewerError::Http(format!("invalid search URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("from", &window.from.to_string())
            .append_pair("size", &window.size.to_string());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str) -> SearchClient {
        SearchClient::new(&ViewerConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
        .expect("client")
    }

    #[test]
    fn build_client_with_default_config() {
        let client = SearchClient::new(&ViewerConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn build_client_rejects_invalid_base_url() {
        let result = SearchClient::new(&ViewerConfig {
            base_url: "not a url".into(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ViewerError::Config(_))));
    }

    #[test]
    fn build_client_rejects_zero_page_size() {
        let result = SearchClient::new(&ViewerConfig {
            page_size: 0,
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn search_url_carries_window_params() {
        let client = client_for("http://backend.test:9090");
        let url = client
            .search_url("rust", SearchWindow { from: 20, size: 10 })
            .expect("url");
        assert_eq!(url.as_str(), "http://backend.test:9090/search?q=rust&from=20&size=10");
    }

    #[test]
    fn search_url_encodes_query_text() {
        let client = client_for("http://backend.test");
        let url = client
            .search_url("search engine", SearchWindow { from: 0, size: 10 })
            .expect("url");
        assert_eq!(
            url.query(),
            Some("q=search+engine&from=0&size=10")
        );
    }

    #[test]
    fn search_url_first_page_from_zero() {
        let client = client_for("http://backend.test");
        let url = client
            .search_url("x", SearchWindow::for_page(1, 10))
            .expect("url");
        assert!(url.query().expect("query").contains("from=0"));
    }
}
