//! Application URL model: routes, query-string state, result windows.
//!
//! The URL is the only persisted state in the viewer. A location is a
//! path plus ordered query pairs; the results route carries the active
//! search as `q` (query text) and `p` (1-based page). Re-entering the
//! same location reproduces an identical view.

use std::fmt;

use url::form_urlencoded;

/// Path of the landing route.
pub const LANDING_PATH: &str = "/";
/// Path of the results route.
pub const RESULTS_PATH: &str = "/search";
/// Query-string key carrying the search text.
pub const QUERY_PARAM: &str = "q";
/// Query-string key carrying the 1-based page number.
pub const PAGE_PARAM: &str = "p";

/// Default number of hits per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// An application location: a path plus ordered query pairs.
///
/// Values are stored decoded; encoding happens on [`fmt::Display`] and
/// decoding on [`Location::parse`], via `form_urlencoded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    params: Vec<(String, String)>,
}

impl Location {
    /// A location with the given path and no query pairs.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// The landing route, `/`.
    pub fn landing() -> Self {
        Self::new(LANDING_PATH)
    }

    /// The results route for the given query and page:
    /// `/search?q=<query>&p=<page>`.
    pub fn results(query: &str, page: u32) -> Self {
        Self::new(RESULTS_PATH)
            .with_param(QUERY_PARAM, query)
            .with_param(PAGE_PARAM, page.to_string())
    }

    /// Append a query pair, returning the modified location.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Parse a location from its string form, e.g. `/search?q=rust&p=2`.
    ///
    /// Percent- and plus-encoding in the query string is decoded. An
    /// absent query string yields no pairs.
    pub fn parse(raw: &str) -> Self {
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };
        let params = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self {
            path: path.to_string(),
            params,
        }
    }

    /// The path component of this location.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The first value for the given query key, if present.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this location is on the results route.
    pub fn is_results(&self) -> bool {
        self.path == RESULTS_PATH
    }

    /// Read the search state carried by this location's query string.
    ///
    /// Absence of a key, or a `p` value that does not parse as an
    /// integer `>= 1`, yields `None` for that field.
    pub fn search_state(&self) -> SearchState {
        let query = self.param(QUERY_PARAM).map(str::to_string);
        let page = self
            .param(PAGE_PARAM)
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p >= 1);
        SearchState { query, page }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if self.params.is_empty() {
            return Ok(());
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish();
        write!(f, "?{query}")
    }
}

/// The canonical `(query, page)` pair read from the URL.
///
/// Absence of either field means "no active search". Invariant:
/// `page >= 1` when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Search text from the `q` key.
    pub query: Option<String>,
    /// 1-based page number from the `p` key.
    pub page: Option<u32>,
}

impl SearchState {
    /// The validated pair, present only when both fields are.
    pub fn active(&self) -> Option<ActiveSearch> {
        match (&self.query, self.page) {
            (Some(query), Some(page)) => Some(ActiveSearch {
                query: query.clone(),
                page,
            }),
            _ => None,
        }
    }
}

/// A validated active search: both query text and page are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSearch {
    /// Search text.
    pub query: String,
    /// 1-based page number, `>= 1`.
    pub page: u32,
}

impl ActiveSearch {
    /// Derive the request window for this search at the given page size.
    pub fn window(&self, page_size: u32) -> SearchWindow {
        SearchWindow::for_page(self.page, page_size)
    }
}

/// The `(from, size)` pair identifying which slice of ranked results
/// to request. Derived from the page, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    /// 0-based offset of the first hit: `(page - 1) * size`.
    pub from: u64,
    /// Number of hits requested.
    pub size: u32,
}

impl SearchWindow {
    /// The window for a 1-based page. `from` is never negative; a page
    /// of 0 (outside the invariant) saturates to `from = 0`.
    pub fn for_page(page: u32, size: u32) -> Self {
        Self {
            from: u64::from(page).saturating_sub(1) * u64::from(size),
            size,
        }
    }
}
