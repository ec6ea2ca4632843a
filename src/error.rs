//! Error types for the stars-view crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Missing URL parameters are not an error:
//! they are recovered locally by navigating back to the landing route.

/// Errors that can occur while configuring or driving the results viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Invalid viewer configuration.
    #[error("config error: {0}")]
    Config(String),

    /// An HTTP request to the search backend failed, or returned a
    /// non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The search backend returned a body that could not be decoded as
    /// a search response.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Convenience type alias for stars-view results.
pub type Result<T> = std::result::Result<T, ViewerError>;
