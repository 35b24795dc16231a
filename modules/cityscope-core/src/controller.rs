//! The search controller.
//!
//! Mediates between raw user input and the remote search operation: owns the
//! query text, filters, pagination cursor and result set, debounces fetches,
//! and exposes presentation-ready snapshots.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use geodb_client::CitySearchRequest;

use crate::filter::filtered_cities;
use crate::provider::CityProvider;
use crate::state::{FilterUpdate, SearchSnapshot, SearchState, PAGE_SIZE};

/// Quiet period between the last input event and the remote fetch.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Queries shorter than this (after trimming) never reach the remote API.
const MIN_QUERY_LEN: usize = 2;

/// Fixed user-facing message for any failed fetch.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch cities. Please try again.";

/// Direction of a pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

/// Owns the search state and decides when the remote API is called.
///
/// Cheap to clone; all clones share one state container. Dropping the last
/// clone cancels any pending debounce timer, so no fetch fires after
/// teardown.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<SearchState>,
    provider: Arc<dyn CityProvider>,
    /// Pending debounce timer. Aborted and replaced on every new trigger.
    debounce: std::sync::Mutex<Option<JoinHandle<()>>>,
    /// Sequence number of the most recently initiated fetch. A completing
    /// fetch applies its outcome only while it is still the latest.
    fetch_seq: AtomicU64,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.debounce.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

impl SearchController {
    pub fn new(provider: Arc<dyn CityProvider>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SearchState::default()),
                provider,
                debounce: std::sync::Mutex::new(None),
                fetch_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Store the query text verbatim, reset to the first page, and (re)arm
    /// the debounce timer. No immediate fetch.
    pub async fn update_query(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.inner.state.lock().await;
            state.query = text;
            state.page = 0;
        }
        self.schedule_fetch();
    }

    /// Merge a partial filter update. Filtering is applied locally to the
    /// last-fetched result set, so this neither fetches nor resets the page.
    pub async fn update_filters(&self, update: FilterUpdate) {
        let mut state = self.inner.state.lock().await;
        if let Some(min) = update.min_population {
            state.filters.min_population = min;
        }
        if let Some(max) = update.max_population {
            state.filters.max_population = max;
        }
        if let Some(country) = update.country {
            state.filters.country = country;
        }
    }

    /// Move one page back or forward, clamped to `[0, total_pages - 1]`.
    /// A clamp no-op or an in-flight fetch makes the whole call a no-op.
    pub async fn change_page(&self, direction: PageDirection) {
        {
            let mut state = self.inner.state.lock().await;
            if state.loading {
                return;
            }
            let last = state.total_pages().saturating_sub(1);
            let target = match direction {
                PageDirection::Prev => state.page.saturating_sub(1),
                PageDirection::Next => (state.page + 1).min(last),
            };
            if target == state.page {
                return;
            }
            state.page = target;
        }
        self.schedule_fetch();
    }

    /// Mark the city with the given id (from the current result set) as
    /// selected for map focus. Unknown ids clear the selection.
    pub async fn select_city(&self, id: u64) {
        let mut state = self.inner.state.lock().await;
        state.selected = state.cities.iter().find(|c| c.id == id).cloned();
    }

    /// Immutable snapshot for one render cycle, with the filter view already
    /// derived.
    pub async fn snapshot(&self) -> SearchSnapshot {
        let state = self.inner.state.lock().await;
        SearchSnapshot {
            query: state.query.clone(),
            page: state.page,
            total_pages: state.total_pages(),
            total_count: state.total_count,
            cities: filtered_cities(&state.cities, &state.filters),
            selected: state.selected.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// (Re)arm the debounce timer. Any previously scheduled fetch is
    /// canceled; only the most recent trigger survives the quiet period.
    ///
    /// The timer task holds a weak handle so a torn-down controller is never
    /// revived by its own timer.
    fn schedule_fetch(&self) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_WINDOW).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            // Detach the fetch from the timer: canceling a later debounce
            // window must not kill an in-flight request. Ordering is the
            // sequence guard's job.
            tokio::spawn(async move {
                SearchController { inner }.run_fetch().await;
            });
        });

        if let Ok(mut pending) = self.inner.debounce.lock() {
            if let Some(previous) = pending.replace(task) {
                previous.abort();
            }
        }
    }

    /// Runs once the quiet period has elapsed. Short queries clear the
    /// result set without a remote call; everything else fetches the current
    /// page and applies the outcome under the last-started-wins guard.
    async fn run_fetch(&self) {
        let (query, page) = {
            let mut state = self.inner.state.lock().await;
            if state.query.trim().chars().count() < MIN_QUERY_LEN {
                debug!(query = %state.query, "Query below minimum length, clearing results");
                // Invalidate any in-flight fetch so its late result cannot
                // resurrect the cleared set.
                self.inner.fetch_seq.fetch_add(1, Ordering::SeqCst);
                state.cities.clear();
                state.total_count = 0;
                state.loading = false;
                return;
            }
            state.loading = true;
            state.error = None;
            (state.query.clone(), state.page)
        };

        let seq = self.inner.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let request = CitySearchRequest {
            name_prefix: query,
            offset: page * PAGE_SIZE,
            limit: PAGE_SIZE,
            min_population: None,
            max_population: None,
        };

        debug!(
            provider = self.inner.provider.name(),
            prefix = %request.name_prefix,
            offset = request.offset,
            "Fetching cities"
        );

        let outcome = self.inner.provider.search(&request).await;

        let mut state = self.inner.state.lock().await;
        if self.inner.fetch_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "Discarding stale fetch result");
            return;
        }

        match outcome {
            Ok(resp) => {
                debug!(
                    count = resp.data.len(),
                    total = resp.metadata.total_count,
                    "Applying fetch result"
                );
                state.cities = resp.data;
                state.total_count = resp.metadata.total_count;
                state.loading = false;
            }
            Err(e) => {
                warn!(error = %e, "City search failed");
                state.cities.clear();
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                state.loading = false;
            }
        }
    }
}
