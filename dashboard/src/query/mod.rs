//! Query Engine: name and role filtering behind a simulated latency.
//!
//! The engine is a state holder. Callers push new inputs with
//! [`QueryEngine::set_inputs`] and observe [`QueryState`] through a `watch`
//! channel from [`QueryEngine::subscribe`]. Every invocation takes a fresh
//! [`QueryGeneration`]; a delayed resolution commits only while its
//! generation is still the latest, so results are last-write-wins by
//! issuance order regardless of when timers fire.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;
use user_directory::UserDirectory;

mod criteria;
mod filter;
mod sleeper;
mod state;

pub use criteria::QueryCriteria;
pub use filter::filter_users;
pub use sleeper::{LatencySleeper, TokioSleeper};
pub use state::{QueryGeneration, QueryState, ResultsView};

#[cfg(test)]
pub(crate) use sleeper::MockLatencySleeper;

/// Default simulated round-trip time.
pub const DEFAULT_QUERY_LATENCY: Duration = Duration::from_millis(500);

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryEngineConfig {
    /// Delay between issuing a constrained query and its resolution.
    pub latency: Duration,
}

impl Default for QueryEngineConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_QUERY_LATENCY,
        }
    }
}

/// Reactive, cancellable query state holder over a directory snapshot.
pub struct QueryEngine {
    directory: Arc<UserDirectory>,
    config: QueryEngineConfig,
    sleeper: Arc<dyn LatencySleeper>,
    state: Arc<watch::Sender<QueryState>>,
    pending: Mutex<Option<AbortHandle>>,
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("records", &self.directory.len())
            .field("config", &self.config)
            .field("generation", &self.state.borrow().generation())
            .finish_non_exhaustive()
    }
}

impl QueryEngine {
    /// Builds an engine that sleeps on the Tokio timer.
    #[must_use]
    pub fn new(directory: Arc<UserDirectory>, config: QueryEngineConfig) -> Self {
        Self::with_sleeper(directory, config, Arc::new(TokioSleeper))
    }

    /// Builds an engine with a custom latency implementation.
    #[must_use]
    pub fn with_sleeper(
        directory: Arc<UserDirectory>,
        config: QueryEngineConfig,
        sleeper: Arc<dyn LatencySleeper>,
    ) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            directory,
            config,
            sleeper,
            state: Arc::new(state),
            pending: Mutex::new(None),
        }
    }

    /// The directory snapshot being queried.
    #[must_use]
    pub fn directory(&self) -> &Arc<UserDirectory> {
        &self.directory
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Re-evaluates the query for new inputs.
    ///
    /// - Criteria equivalent to the current ones change nothing.
    /// - Unconstrained criteria reset the state to empty, not loading,
    ///   immediately.
    /// - Anything else marks the state loading now and resolves after the
    ///   configured latency.
    ///
    /// Any outstanding resolution is cancelled and, should it still fire,
    /// discarded.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime while constrained criteria
    /// need a resolution task.
    pub fn set_inputs(&self, criteria: QueryCriteria) -> QueryGeneration {
        // Held until the new task is recorded so that issue order, abort
        // order, and the surviving handle agree across callers.
        let mut pending = self.pending_slot();

        let mut issued = None;
        self.state.send_if_modified(|state| {
            if state.criteria().is_equivalent(&criteria) {
                return false;
            }
            let generation = state.generation().next();
            if criteria.is_unconstrained() {
                state.reset(generation);
            } else {
                state.begin(generation, criteria.clone());
            }
            issued = Some(generation);
            true
        });

        let Some(generation) = issued else {
            return self.state.borrow().generation();
        };

        if let Some(handle) = pending.take() {
            handle.abort();
        }
        if criteria.is_unconstrained() {
            debug!(generation = generation.get(), "query reset");
        } else {
            debug!(
                generation = generation.get(),
                search_term = criteria.search_term(),
                role = ?criteria.role(),
                "query issued"
            );
            *pending = Some(self.spawn_resolution(generation, criteria));
        }
        generation
    }

    fn spawn_resolution(
        &self,
        generation: QueryGeneration,
        criteria: QueryCriteria,
    ) -> AbortHandle {
        let directory = Arc::clone(&self.directory);
        let sleeper = Arc::clone(&self.sleeper);
        let state = Arc::clone(&self.state);
        let latency = self.config.latency;

        let task = tokio::spawn(async move {
            sleeper.sleep(latency).await;
            let results = filter_users(directory.records(), &criteria);
            let count = results.len();
            if state.send_if_modified(|current| current.commit(generation, results)) {
                debug!(generation = generation.get(), count, "query resolved");
            } else {
                debug!(generation = generation.get(), "stale query resolution discarded");
            }
        });

        task.abort_handle()
    }

    fn pending_slot(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for QueryEngine {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_slot().take() {
            handle.abort();
        }
    }
}
