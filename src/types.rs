//! Wire types for the search backend response.
//!
//! The backend returns a bleve-style search envelope. Everything is
//! carried as-is: `cost`, `status`, `request`, `max_score` and `facets`
//! are part of the wire contract but unused by rendering, and hit order
//! is the backend's relevance order, never re-sorted client-side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of ranked results as returned by `GET /search`.
///
/// Replaced wholesale on every successful fetch of a new window; never
/// partially merged with a prior response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Backend-reported processing duration in nanoseconds.
    pub took: u64,
    /// Total number of hits matching the query, across all pages.
    pub total_hits: u64,
    /// Highest relevance score in the full result set.
    #[serde(default)]
    pub max_score: f64,
    /// Backend-reported query cost. Pass-through, unused by rendering.
    #[serde(default)]
    pub cost: u64,
    /// Per-shard execution status. Pass-through, unused by rendering.
    #[serde(default)]
    pub status: SearchStatus,
    /// Echo of the normalised request. Kept opaque.
    #[serde(default)]
    pub request: Value,
    /// Facet results. Kept opaque; the viewer requests none.
    #[serde(default)]
    pub facets: Value,
    /// Ranked hits for the requested window, in relevance order.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Per-shard execution status reported by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStatus {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
}

/// One ranked search result with its backend-assigned score and
/// display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    /// Document identifier.
    pub id: String,
    /// Name of the index that produced this hit.
    #[serde(default)]
    pub index: String,
    /// Relevance score assigned by the backend.
    pub score: f64,
    /// Sort key values for this hit.
    #[serde(default)]
    pub sort: Vec<String>,
    /// Stored display fields.
    #[serde(default)]
    pub fields: Fields,
}

/// Flat map of stored display fields.
///
/// Keys such as `"primary_language.name"` contain literal dots; they are
/// opaque strings into a flat mapping, never nested-object paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(pub BTreeMap<String, Value>);

/// Field key for the repository description.
pub const FIELD_DESCRIPTION: &str = "description";
/// Field key for the `owner/name` repository label.
pub const FIELD_NAME_WITH_OWNER: &str = "name_with_owner";
/// Field key for the repository URL.
pub const FIELD_URL: &str = "url";
/// Field key for the primary language name (literal dot, flat key).
pub const FIELD_LANGUAGE_NAME: &str = "primary_language.name";
/// Field key for the primary language hex colour (literal dot, flat key).
pub const FIELD_LANGUAGE_COLOR: &str = "primary_language.color";

impl Fields {
    /// Look up a field as a string, returning `None` when absent or
    /// not a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The repository description, if stored.
    pub fn description(&self) -> Option<&str> {
        self.get_str(FIELD_DESCRIPTION)
    }

    /// The `owner/name` repository label, if stored.
    pub fn name_with_owner(&self) -> Option<&str> {
        self.get_str(FIELD_NAME_WITH_OWNER)
    }

    /// The repository URL, if stored.
    pub fn url(&self) -> Option<&str> {
        self.get_str(FIELD_URL)
    }

    /// The primary language name, if stored.
    pub fn language_name(&self) -> Option<&str> {
        self.get_str(FIELD_LANGUAGE_NAME)
    }

    /// The primary language hex colour, if stored.
    pub fn language_color(&self) -> Option<&str> {
        self.get_str(FIELD_LANGUAGE_COLOR)
    }
}
