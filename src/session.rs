//! Search session: the single display slot shared by successive searches.
//!
//! Each invocation gets a generation number and a cancellation token. Starting
//! a new search cancels the previous token and resets the slot, so a pending
//! older search can never publish over a newer one. The searching indicator is
//! owned by an RAII guard and is cleared exactly once for the generation that
//! set it, whatever way the invocation ends.

use crate::backend::SearchBackend;
use crate::executor::{SearchExecutor, SearchOutcome};
use crate::routing::route;
use crate::types::SearchRequest;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Snapshot of what the UI should display.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Generation of the invocation that owns this snapshot.
    pub generation: u64,
    pub searching: bool,
    /// Outcome of `generation`, once it completed.
    pub outcome: Option<Arc<SearchOutcome>>,
}

/// Shared search state and the executor that feeds it.
pub struct SearchSession<B> {
    executor: SearchExecutor<B>,

    /// Last issued generation
    generation: AtomicU64,

    /// Token of the in-flight invocation
    current: Mutex<CancellationToken>,

    state: watch::Sender<SearchState>,
}

impl<B> std::fmt::Debug for SearchSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SearchSession")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("searching", &state.searching)
            .field("has_outcome", &state.outcome.is_some())
            .finish()
    }
}

impl<B: SearchBackend> SearchSession<B> {
    pub fn new(executor: SearchExecutor<B>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            executor,
            generation: AtomicU64::new(0),
            current: Mutex::new(CancellationToken::new()),
            state,
        }
    }

    pub const fn executor(&self) -> &SearchExecutor<B> {
        &self.executor
    }

    /// Current display snapshot.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Route and run one search.
    ///
    /// Returns the outcome when this invocation is still the latest when it
    /// finishes, and `None` when a newer search superseded it.
    pub async fn search(&self, request: SearchRequest) -> Option<Arc<SearchOutcome>> {
        // Generation, token and slot reset are updated under one lock
        let (generation, token) = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let token = CancellationToken::new();
            current.cancel();
            *current = token.clone();
            self.state.send_replace(SearchState {
                generation,
                searching: true,
                outcome: None,
            });
            (generation, token)
        };

        let _indicator = IndicatorGuard {
            state: &self.state,
            generation,
        };

        let decision = route(&request);
        tracing::debug!(generation, query = %request.query, "Search started");

        let outcome = tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::debug!(generation, "Search superseded before completion");
                return None;
            }
            outcome = self.executor.execute(&request, &decision) => Arc::new(outcome),
        };

        let published = self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.outcome = Some(outcome.clone());
            state.searching = false;
            true
        });

        if published {
            Some(outcome)
        } else {
            tracing::debug!(generation, "Discarding stale search outcome");
            None
        }
    }

    /// Cancel whatever search is in flight.
    pub fn cancel(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }
}

/// Clears the searching flag for one generation when dropped.
struct IndicatorGuard<'a> {
    state: &'a watch::Sender<SearchState>,
    generation: u64,
}

impl Drop for IndicatorGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if state.generation == self.generation && state.searching {
                state.searching = false;
                true
            } else {
                false
            }
        });
    }
}
