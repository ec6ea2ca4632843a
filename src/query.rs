//! Query state manager: keeps `(query, page)` synchronized with the URL
//! and exposes the navigation operations of the results view.
//!
//! All state lives in the URL behind the injected [`Navigator`]; this
//! type is a stateless view over it. Submitting a query always resets to
//! page 1, and paging preserves the query text.

use std::sync::Arc;

use crate::nav::Navigator;
use crate::route::{ActiveSearch, Location, SearchState};

/// Direction for a pagination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// One page back. A no-op on page 1.
    Previous,
    /// One page forward. No upper bound is enforced client-side; callers
    /// may consult `total_hits` to decide whether to offer the control.
    Next,
}

/// Read view and navigation operations over the URL-carried search state.
pub struct QueryState {
    navigator: Arc<dyn Navigator>,
}

impl QueryState {
    /// A query state manager over the given navigator.
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// Navigate to the results view for `text`, with the page reset to 1.
    ///
    /// `text` is accepted as-is; empty or whitespace text is the
    /// caller's concern, not this layer's.
    pub fn submit_query(&self, text: &str) {
        tracing::debug!(page = 1, "submit query");
        self.navigator.navigate(Location::results(text, 1));
    }

    /// The raw `(query, page)` state at the current location, without
    /// side effects.
    pub fn state(&self) -> SearchState {
        self.navigator.current().search_state()
    }

    /// The validated `(query, page)` pair at the current location.
    ///
    /// Hard precondition of the results view: if either field is absent
    /// on the results route, this navigates to the landing route and
    /// returns `None`. Never attempts a fetch with partial state.
    pub fn read_state(&self) -> Option<ActiveSearch> {
        let location = self.navigator.current();
        match location.search_state().active() {
            Some(active) => Some(active),
            None => {
                if location.is_results() {
                    tracing::debug!(location = %location, "missing search params, returning to landing");
                    self.navigator.navigate(Location::landing());
                }
                None
            }
        }
    }

    /// Step one page in the given direction, preserving the query text.
    ///
    /// Returns `true` if a navigation happened. `Previous` on page 1 is
    /// a no-op: a request for a page below 1 is never issued. Without a
    /// valid active search there is nothing to page through.
    pub fn go_to_page(&self, direction: PageDirection) -> bool {
        let Some(active) = self.state().active() else {
            return false;
        };
        let new_page = match direction {
            PageDirection::Previous => {
                if active.page <= 1 {
                    return false;
                }
                active.page - 1
            }
            PageDirection::Next => active.page + 1,
        };
        tracing::debug!(page = new_page, "go to page");
        self.navigator.navigate(Location::results(&active.query, new_page));
        true
    }

    /// Whether the "previous" control should be enabled. Disabled
    /// exactly when the current page is 1 (or no search is active).
    pub fn previous_enabled(&self) -> bool {
        matches!(self.state().page, Some(page) if page > 1)
    }
}
