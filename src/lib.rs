//! # stars-view
//!
//! Client-side results viewer for a starred-repository search backend.
//!
//! The viewer takes a free-text query and a 1-based page number carried
//! in an application URL, requests one page of ranked results from the
//! backend's single `GET /search?q&from&size` endpoint, and projects the
//! JSON response into a render-ready view model with pagination
//! affordances. Rendering itself is the embedder's concern.
//!
//! ## Design
//!
//! - The URL is the only persisted state: `(query, page)` live in the
//!   `q`/`p` keys of the results route, behind an injected [`Navigator`]
//!   rather than any ambient global location
//! - One-directional pipeline: state change → fetch → result slot →
//!   view snapshot; no component holds state another doesn't expose
//! - A per-request generation counter drops stale responses, so the
//!   view always reflects the most recently *requested* window
//! - Fetch failures surface as an explicit failed state with retry,
//!   never an indefinite loading hang
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> stars_view::Result<()> {
//! use std::sync::Arc;
//! use stars_view::{MemoryNavigator, SearchSession, ViewerConfig, ViewState};
//!
//! let navigator = Arc::new(MemoryNavigator::new());
//! let session = SearchSession::new(ViewerConfig::default(), navigator)?;
//!
//! session.submit("rust").await;
//! if let ViewState::Ready(view) = session.view() {
//!     for hit in &view.hits {
//!         println!("{}", hit.title.as_deref().unwrap_or("<untitled>"));
//!     }
//!     println!("{}", view.summary());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod nav;
pub mod query;
pub mod route;
pub mod types;
pub mod view;

use std::sync::Arc;

pub use client::SearchClient;
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use nav::{MemoryNavigator, Navigator};
pub use query::{PageDirection, QueryState};
pub use route::{ActiveSearch, Location, SearchState, SearchWindow, DEFAULT_PAGE_SIZE};
pub use types::{Fields, Hit, SearchResponse, SearchStatus};
pub use view::{HitView, ResultsProjector, ResultsView, ViewState, round_took};

/// The viewer's composition root: navigator, query state, and projector
/// wired into the one-directional pipeline.
///
/// Every operation that changes the effective `(query, page)` pair
/// triggers a fetch of the corresponding window; [`SearchSession::view`]
/// reads the resulting snapshot. Concurrent operations on a shared
/// session are safe; the latest requested window wins the view.
pub struct SearchSession {
    navigator: Arc<dyn Navigator>,
    state: QueryState,
    projector: ResultsProjector,
}

impl SearchSession {
    /// Build a session over the given navigator.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Config`] or [`ViewerError::Http`] if the
    /// configuration is invalid or the HTTP client cannot be built.
    pub fn new(config: ViewerConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let client = SearchClient::new(&config)?;
        Ok(Self {
            state: QueryState::new(Arc::clone(&navigator)),
            projector: ResultsProjector::new(client, config.page_size),
            navigator,
        })
    }

    /// Submit a query from the landing form: navigate to page 1 of the
    /// results route and fetch its window.
    pub async fn submit(&self, text: &str) {
        self.state.submit_query(text);
        self.sync().await;
    }

    /// Step to the next page. Unbounded client-side.
    pub async fn next_page(&self) {
        if self.state.go_to_page(PageDirection::Next) {
            self.sync().await;
        }
    }

    /// Step to the previous page. A no-op on page 1: no navigation
    /// happens and no request is issued.
    pub async fn previous_page(&self) {
        if self.state.go_to_page(PageDirection::Previous) {
            self.sync().await;
        }
    }

    /// Re-read the URL and fetch the window it describes.
    ///
    /// Call after external navigation (history back/forward, entering a
    /// shared link). With partial state on the results route this
    /// navigates to the landing route instead of fetching.
    pub async fn sync(&self) {
        if let Some(active) = self.state.read_state() {
            self.projector.refresh(&active).await;
        }
    }

    /// Re-issue the fetch for the most recently requested window, e.g.
    /// from a retry affordance after a failure.
    pub async fn retry(&self) {
        self.projector.retry().await;
    }

    /// A snapshot of the current view state.
    pub fn view(&self) -> ViewState {
        self.projector.view()
    }

    /// Whether the "previous" control should be enabled.
    pub fn previous_enabled(&self) -> bool {
        self.state.previous_enabled()
    }

    /// The current application location.
    pub fn location(&self) -> Location {
        self.navigator.current()
    }
}
