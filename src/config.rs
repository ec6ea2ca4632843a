//! Viewer configuration with sensible defaults.
//!
//! [`ViewerConfig`] controls which backend is queried, the page size of
//! the result window, and HTTP request behaviour. Only `base_url` has no
//! universally sensible value; the default points at a local backend.

use url::Url;

use crate::error::ViewerError;
use crate::route::DEFAULT_PAGE_SIZE;

/// Configuration for the results viewer.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Base URL of the search backend. The viewer issues
    /// `GET <base_url>/search?q&from&size` against it.
    pub base_url: String,
    /// Number of hits requested per page. Also determines the window
    /// offset: `from = (page - 1) * page_size`.
    pub page_size: u32,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, a crate-identifying default
    /// is used.
    pub user_agent: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

impl ViewerConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must parse as an absolute URL
    /// - `page_size` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), ViewerError> {
        if let Err(err) = Url::parse(&self.base_url) {
            return Err(ViewerError::Config(format!(
                "base_url is not a valid URL: {err}"
            )));
        }
        if self.page_size == 0 {
            return Err(ViewerError::Config(
                "page_size must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ViewerError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
