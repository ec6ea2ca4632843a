//! Results fetch and view projection.
//!
//! [`ResultsProjector`] turns `(query, page)` into exactly one in-flight
//! request per state change and projects the response into a
//! render-ready [`ResultsView`]. A per-request generation counter
//! guarantees that only the response matching the latest requested
//! window may update the view: a slow superseded response is discarded,
//! regardless of arrival order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::client::SearchClient;
use crate::route::{ActiveSearch, SearchWindow};
use crate::types::{Hit, SearchResponse};

/// Display state of the results view.
///
/// `Loading` until the first response for the current window arrives,
/// then `Ready` on success or `Failed` on fetch/decode failure. The
/// failed state carries a message and supports retrying via
/// [`ResultsProjector::retry`].
#[derive(Debug, Clone)]
pub enum ViewState {
    /// No result is present for the current window yet.
    Loading,
    /// A result for the current window is available.
    Ready(ResultsView),
    /// The fetch for the current window failed.
    Failed {
        /// Human-readable failure description.
        message: String,
    },
}

impl ViewState {
    /// Whether the view is still waiting for a result.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether a result is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Whether the last fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Render model for one page of results.
#[derive(Debug, Clone)]
pub struct ResultsView {
    /// Hits in backend relevance order.
    pub hits: Vec<HitView>,
    /// 1-based page this view was projected for.
    pub page: u32,
    /// 0-based offset of the window.
    pub from: u64,
    /// Requested window size.
    pub size: u32,
    /// Total hits across all pages, from the backend.
    pub total_hits: u64,
    /// Pre-formatted elapsed time, per [`round_took`].
    pub elapsed: String,
    /// Whether the "previous" control is enabled. False exactly on page 1.
    pub previous_enabled: bool,
}

impl ResultsView {
    /// Project a raw backend response into a render model.
    pub fn project(response: &SearchResponse, search: &ActiveSearch, window: SearchWindow) -> Self {
        Self {
            hits: response.hits.iter().map(HitView::from_hit).collect(),
            page: search.page,
            from: window.from,
            size: window.size,
            total_hits: response.total_hits,
            elapsed: round_took(response.took),
            previous_enabled: search.page > 1,
        }
    }

    /// The pagination summary line.
    ///
    /// `from` is 0-based and shown as-is, and the upper bound is not
    /// clamped to `total_hits` even when it exceeds it. The elapsed
    /// string carries its own unit, so "1s seconds" is faithful output.
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results ({} seconds)",
            self.from,
            self.from + u64::from(self.size),
            self.total_hits,
            self.elapsed
        )
    }
}

/// Render model for a single hit.
#[derive(Debug, Clone)]
pub struct HitView {
    /// Document identifier.
    pub id: String,
    /// The `owner/name` repository label.
    pub title: Option<String>,
    /// Link target for the hit.
    pub url: Option<String>,
    /// Repository description.
    pub description: Option<String>,
    /// Primary language name.
    pub language_name: Option<String>,
    /// Primary language hex colour.
    pub language_color: Option<String>,
    /// Backend relevance score.
    pub score: f64,
}

impl HitView {
    /// Pull display attributes out of a hit's flat field map.
    pub fn from_hit(hit: &Hit) -> Self {
        let fields = &hit.fields;
        Self {
            id: hit.id.clone(),
            title: fields.name_with_owner().map(str::to_string),
            url: fields.url().map(str::to_string),
            description: fields.description().map(str::to_string),
            language_name: fields.language_name().map(str::to_string),
            language_color: fields.language_color().map(str::to_string),
            score: hit.score,
        }
    }
}

/// Format a backend-reported duration (nanoseconds) for humans.
///
/// - under 1ms: the literal `"less than 1ms"`
/// - under 1s: milliseconds rounded to the nearest integer, e.g. `"15ms"`
/// - otherwise: milliseconds rounded first, then divided to seconds,
///   e.g. `"1.234s"` — the two-stage rounding is deliberate and changes
///   output for boundary values
pub fn round_took(took_ns: u64) -> String {
    const NANOS_PER_MILLI: u64 = 1_000_000;
    const NANOS_PER_SECOND: u64 = 1_000_000_000;

    if took_ns < NANOS_PER_MILLI {
        return "less than 1ms".to_string();
    }

    let round_ms = (took_ns as f64 / NANOS_PER_MILLI as f64).round();
    if took_ns < NANOS_PER_SECOND {
        return format!("{round_ms}ms");
    }

    format!("{}s", round_ms / 1000.0)
}

/// Owns the single "current result" slot and the generation counter.
///
/// One writer (this projector), any number of readers via cloned
/// [`ViewState`] snapshots. Concurrent refreshes are safe: whichever
/// refresh was requested last wins the slot, and every earlier response
/// is dropped on arrival.
pub struct ResultsProjector {
    client: SearchClient,
    page_size: u32,
    generation: AtomicU64,
    slot: Mutex<ViewState>,
    last: Mutex<Option<(u64, ActiveSearch)>>,
}

impl ResultsProjector {
    /// A projector fetching through `client` with the given page size.
    pub fn new(client: SearchClient, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            generation: AtomicU64::new(0),
            slot: Mutex::new(ViewState::Loading),
            last: Mutex::new(None),
        }
    }

    /// A snapshot of the current view state.
    pub fn view(&self) -> ViewState {
        lock(&self.slot).clone()
    }

    /// Fetch the window for `search` and update the slot.
    ///
    /// Issues exactly one request. If a newer refresh is requested while
    /// this one is in flight, the response is discarded on arrival; no
    /// cancellation is attempted.
    pub async fn refresh(&self, search: &ActiveSearch) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        remember_latest(&mut lock(&self.last), generation, search);

        {
            // Only show the loading state if nothing newer has started.
            let mut slot = lock(&self.slot);
            if self.generation.load(Ordering::SeqCst) == generation {
                *slot = ViewState::Loading;
            }
        }

        let window = search.window(self.page_size);
        let outcome = self.client.fetch(&search.query, window).await;

        let mut slot = lock(&self.slot);
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding superseded search response");
            return;
        }

        *slot = match outcome {
            Ok(response) => {
                tracing::debug!(
                    total_hits = response.total_hits,
                    took = response.took,
                    page = search.page,
                    "search response projected"
                );
                ViewState::Ready(ResultsView::project(&response, search, window))
            }
            Err(err) => {
                tracing::warn!(error = %err, page = search.page, "search fetch failed");
                ViewState::Failed {
                    message: err.to_string(),
                }
            }
        };
    }

    /// Re-issue the fetch for the most recently requested window.
    ///
    /// A no-op if nothing has been requested yet.
    pub async fn retry(&self) {
        let search = lock(&self.last).as_ref().map(|(_, search)| search.clone());
        if let Some(search) = search {
            tracing::debug!(page = search.page, "retrying search");
            self.refresh(&search).await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Record the window of a starting refresh as the retry target, keeping
/// the highest generation. Concurrent refreshes may reach this in any
/// order; an older request must never displace a newer one.
fn remember_latest(
    last: &mut Option<(u64, ActiveSearch)>,
    generation: u64,
    search: &ActiveSearch,
) {
    match last {
        Some((newest, _)) if *newest >= generation => {}
        _ => *last = Some((generation, search.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Fields;
    use serde_json::json;

    // ── round_took ───────────────────────────────────────────────────────

    #[test]
    fn round_took_under_one_milli() {
        assert_eq!(round_took(0), "less than 1ms");
        assert_eq!(round_took(999_999), "less than 1ms");
    }

    #[test]
    fn round_took_exact_milli_boundary() {
        assert_eq!(round_took(1_000_000), "1ms");
    }

    #[test]
    fn round_took_rounds_to_nearest_milli() {
        assert_eq!(round_took(1_400_000), "1ms");
        assert_eq!(round_took(1_500_000), "2ms");
        assert_eq!(round_took(15_300_000), "15ms");
    }

    #[test]
    fn round_took_just_under_one_second() {
        // Still below the seconds branch, but rounds up to 1000ms.
        assert_eq!(round_took(999_999_999), "1000ms");
    }

    #[test]
    fn round_took_exact_second_boundary() {
        assert_eq!(round_took(1_000_000_000), "1s");
    }

    #[test]
    fn round_took_two_stage_rounding() {
        // 1_234_000_000ns → 1234ms → 1.234s.
        assert_eq!(round_took(1_234_000_000), "1.234s");
        // Millisecond-rounded first: 1_234_499_999ns → 1234ms, not 1.2344995s.
        assert_eq!(round_took(1_234_499_999), "1.234s");
        assert_eq!(round_took(1_234_500_000), "1.235s");
    }

    #[test]
    fn round_took_no_trailing_zero_padding() {
        assert_eq!(round_took(2_000_000_000), "2s");
        assert_eq!(round_took(1_230_000_000), "1.23s");
        assert_eq!(round_took(1_200_000_000), "1.2s");
    }

    // ── projection ───────────────────────────────────────────────────────

    fn response_with_hits(total_hits: u64, took: u64, ids: &[&str]) -> SearchResponse {
        SearchResponse {
            took,
            total_hits,
            max_score: 1.0,
            cost: 0,
            status: Default::default(),
            request: json!(null),
            facets: json!(null),
            hits: ids
                .iter()
                .enumerate()
                .map(|(i, id)| Hit {
                    id: (*id).to_string(),
                    index: "ghs.belve".into(),
                    score: 1.0 - i as f64 * 0.1,
                    sort: vec!["_score".into()],
                    fields: serde_json::from_value::<Fields>(json!({
                        "name_with_owner": format!("owner/{id}"),
                        "description": format!("repo {id}"),
                        "url": format!("https://github.com/owner/{id}"),
                        "primary_language.name": "Rust",
                        "primary_language.color": "#dea584"
                    }))
                    .expect("fields"),
                })
                .collect(),
        }
    }

    fn active(query: &str, page: u32) -> ActiveSearch {
        ActiveSearch {
            query: query.into(),
            page,
        }
    }

    #[test]
    fn projection_preserves_hit_order() {
        let response = response_with_hits(3, 1, &["b", "a", "c"]);
        let search = active("rust", 1);
        let view = ResultsView::project(&response, &search, search.window(10));
        let ids: Vec<&str> = view.hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn projection_carries_window_and_totals() {
        let response = response_with_hits(42, 15_300_000, &["x"]);
        let search = active("rust", 3);
        let view = ResultsView::project(&response, &search, search.window(10));
        assert_eq!(view.page, 3);
        assert_eq!(view.from, 20);
        assert_eq!(view.size, 10);
        assert_eq!(view.total_hits, 42);
        assert_eq!(view.elapsed, "15ms");
    }

    #[test]
    fn projection_previous_enabled_off_page_one() {
        let response = response_with_hits(42, 1, &[]);
        let search = active("rust", 1);
        let view = ResultsView::project(&response, &search, search.window(10));
        assert!(!view.previous_enabled);

        let search = active("rust", 2);
        let view = ResultsView::project(&response, &search, search.window(10));
        assert!(view.previous_enabled);
    }

    #[test]
    fn hit_view_pulls_flat_fields() {
        let response = response_with_hits(1, 1, &["serde"]);
        let hit = HitView::from_hit(&response.hits[0]);
        assert_eq!(hit.title.as_deref(), Some("owner/serde"));
        assert_eq!(hit.url.as_deref(), Some("https://github.com/owner/serde"));
        assert_eq!(hit.language_name.as_deref(), Some("Rust"));
        assert_eq!(hit.language_color.as_deref(), Some("#dea584"));
    }

    #[test]
    fn hit_view_tolerates_missing_fields() {
        let hit = Hit {
            id: "bare".into(),
            index: String::new(),
            score: 0.5,
            sort: vec![],
            fields: Fields::default(),
        };
        let view = HitView::from_hit(&hit);
        assert_eq!(view.title, None);
        assert_eq!(view.description, None);
        assert!((view.score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_shows_zero_based_from() {
        let response = response_with_hits(42, 15_300_000, &[]);
        let search = active("rust", 1);
        let view = ResultsView::project(&response, &search, search.window(10));
        assert_eq!(view.summary(), "Showing 0 to 10 of 42 results (15ms seconds)");
    }

    #[test]
    fn summary_upper_bound_not_clamped() {
        // 42 total, page 5 shows "40 to 50" even though only 42 exist.
        let response = response_with_hits(42, 2_000_000, &[]);
        let search = active("rust", 5);
        let view = ResultsView::project(&response, &search, search.window(10));
        assert_eq!(view.summary(), "Showing 40 to 50 of 42 results (2ms seconds)");
    }

    #[test]
    fn summary_elapsed_keeps_its_own_unit() {
        let response = response_with_hits(1, 1_000_000_000, &[]);
        let search = active("rust", 1);
        let view = ResultsView::project(&response, &search, search.window(10));
        assert_eq!(view.summary(), "Showing 0 to 10 of 1 results (1s seconds)");
    }

    // ── view state ───────────────────────────────────────────────────────

    #[test]
    fn view_state_predicates() {
        assert!(ViewState::Loading.is_loading());
        assert!(!ViewState::Loading.is_ready());

        let failed = ViewState::Failed {
            message: "HTTP error: connection refused".into(),
        };
        assert!(failed.is_failed());
        assert!(!failed.is_loading());
    }

    #[test]
    fn projector_starts_loading() {
        let client = SearchClient::new(&crate::config::ViewerConfig::default()).expect("client");
        let projector = ResultsProjector::new(client, 10);
        assert!(projector.view().is_loading());
    }

    #[test]
    fn retry_target_keeps_newest_generation() {
        // Refresh starts may reach the retry slot in any order; an older
        // request must not displace a newer one.
        let mut last = None;
        remember_latest(&mut last, 2, &active("rust", 3));
        remember_latest(&mut last, 1, &active("rust", 2));

        let (generation, search) = last.expect("retry target");
        assert_eq!(generation, 2);
        assert_eq!(search.page, 3);
    }

    #[test]
    fn retry_target_advances_in_order() {
        let mut last = None;
        remember_latest(&mut last, 1, &active("rust", 2));
        remember_latest(&mut last, 2, &active("rust", 3));

        let (generation, search) = last.expect("retry target");
        assert_eq!(generation, 2);
        assert_eq!(search.page, 3);
    }

    #[test]
    fn projector_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResultsProjector>();
    }
}
