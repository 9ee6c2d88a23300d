//! Dashboard session: search input, role selection, and detail view wired
//! to a query engine.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use user_directory::{Role, UserDirectory, UserId, UserRecord};

use crate::query::{
    DEFAULT_QUERY_LATENCY, QueryCriteria, QueryEngine, QueryEngineConfig, QueryGeneration,
    QueryState,
};
use crate::search_input::{DEFAULT_DEBOUNCE, SearchInput};

/// Timing parameters of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Simulated query latency.
    pub latency: Duration,
    /// Search box quiet period.
    pub debounce: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_QUERY_LATENCY,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Combines the committed term with the role filter into query criteria.
///
/// Both writers go through `gate`, and each reads the newest term and role
/// while holding it, so the last generation issued always carries both.
#[derive(Debug)]
struct CriteriaFeed {
    engine: Arc<QueryEngine>,
    committed: watch::Receiver<String>,
    role: watch::Sender<Option<Role>>,
    gate: Mutex<()>,
}

impl CriteriaFeed {
    fn refresh(&self) -> QueryGeneration {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        self.issue()
    }

    fn select_role(&self, role: Option<Role>) -> QueryGeneration {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        self.role.send_replace(role);
        debug!(role = ?role, "role filter changed");
        self.issue()
    }

    fn issue(&self) -> QueryGeneration {
        let term = self.committed.borrow().clone();
        let role = *self.role.borrow();
        self.engine.set_inputs(QueryCriteria::new(term, role))
    }
}

/// One interactive dashboard.
///
/// Every committed search term and every role change is forwarded to the
/// query engine as new criteria. The detail view holds at most one record,
/// chosen from the visible results.
#[derive(Debug)]
pub struct DashboardSession {
    engine: Arc<QueryEngine>,
    input: SearchInput,
    feed: Arc<CriteriaFeed>,
    selection: watch::Sender<Option<Arc<UserRecord>>>,
    binding: JoinHandle<()>,
}

impl DashboardSession {
    /// Starts a session over `directory` on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn start(directory: Arc<UserDirectory>, config: SessionConfig) -> Self {
        let engine = Arc::new(QueryEngine::new(
            directory,
            QueryEngineConfig {
                latency: config.latency,
            },
        ));
        let input = SearchInput::spawn(config.debounce);
        let (role, _) = watch::channel(None);
        let (selection, _) = watch::channel(None);
        let feed = Arc::new(CriteriaFeed {
            engine: Arc::clone(&engine),
            committed: input.committed(),
            role,
            gate: Mutex::new(()),
        });

        let mut committed = input.committed();
        let bound = Arc::clone(&feed);
        let binding = tokio::spawn(async move {
            while committed.changed().await.is_ok() {
                bound.refresh();
            }
        });

        Self {
            engine,
            input,
            feed,
            selection,
            binding,
        }
    }

    /// Replaces the search box contents.
    pub fn type_text(&self, text: impl Into<String>) {
        self.input.type_text(text);
    }

    /// Commits the search box immediately; `false` while it is blank.
    pub fn submit(&self) -> bool {
        self.input.submit()
    }

    /// Selects or clears the role filter and re-queries at once.
    pub fn select_role(&self, role: Option<Role>) -> QueryGeneration {
        self.feed.select_role(role)
    }

    /// The active role filter.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        *self.feed.role.borrow()
    }

    /// Subscribes to role filter changes.
    #[must_use]
    pub fn role_filter(&self) -> watch::Receiver<Option<Role>> {
        self.feed.role.subscribe()
    }

    /// The search box contents as last typed.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.input.current_text()
    }

    /// Subscribes to the raw search box contents.
    #[must_use]
    pub fn raw_text(&self) -> watch::Receiver<String> {
        self.input.raw()
    }

    /// Subscribes to query state changes.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<QueryState> {
        self.engine.subscribe()
    }

    /// Returns a copy of the current query state.
    #[must_use]
    pub fn snapshot(&self) -> QueryState {
        self.engine.snapshot()
    }

    /// The directory this session queries.
    #[must_use]
    pub fn directory(&self) -> &Arc<UserDirectory> {
        self.engine.directory()
    }

    /// Opens the detail view for `id` if that record is currently visible.
    pub fn open_details(&self, id: UserId) -> Option<Arc<UserRecord>> {
        let record = self
            .engine
            .snapshot()
            .results()
            .iter()
            .find(|user| user.id() == id)
            .cloned()?;
        debug!(id = id.get(), "detail view opened");
        self.selection.send_replace(Some(Arc::clone(&record)));
        Some(record)
    }

    /// Closes the detail view; returns `false` if nothing was open.
    pub fn close_details(&self) -> bool {
        self.selection.send_replace(None).is_some()
    }

    /// The record shown in the detail view.
    #[must_use]
    pub fn selected(&self) -> Option<Arc<UserRecord>> {
        self.selection.borrow().clone()
    }

    /// Subscribes to detail view changes.
    #[must_use]
    pub fn selection(&self) -> watch::Receiver<Option<Arc<UserRecord>>> {
        self.selection.subscribe()
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.binding.abort();
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn directory() -> Arc<UserDirectory> {
        Arc::new(UserDirectory::bundled().expect("bundled directory"))
    }

    async fn settled(session: &DashboardSession) -> QueryState {
        let mut rx = session.state();
        let state = rx
            .wait_for(|state| !state.is_loading())
            .await
            .expect("session alive");
        state.clone()
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn role_selection_queries_without_debounce(directory: Arc<UserDirectory>) {
        let session = DashboardSession::start(directory, SessionConfig::default());

        session.select_role(Some(Role::Viewer));
        assert!(session.snapshot().is_loading());
        let state = settled(&session).await;

        let names: Vec<_> = state.results().iter().map(|user| user.name()).collect();
        assert_eq!(names, ["Marco Esposito", "Victor Barnes"]);
        assert_eq!(session.role(), Some(Role::Viewer));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn details_open_only_for_visible_records(directory: Arc<UserDirectory>) {
        let session = DashboardSession::start(directory, SessionConfig::default());
        session.select_role(Some(Role::Admin));
        settled(&session).await;

        assert!(session.open_details(UserId::new(2)).is_none());
        let opened = session
            .open_details(UserId::new(1))
            .expect("George Harris is visible");

        assert_eq!(opened.name(), "George Harris");
        assert_eq!(
            session.selected().map(|user| user.id()),
            Some(UserId::new(1))
        );
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn closing_details_clears_selection(directory: Arc<UserDirectory>) {
        let session = DashboardSession::start(directory, SessionConfig::default());
        assert!(!session.close_details());

        session.select_role(Some(Role::Guest));
        settled(&session).await;
        session.open_details(UserId::new(5)).expect("Emma Clark is visible");

        assert!(session.close_details());
        assert!(session.selected().is_none());
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn clearing_role_with_empty_term_hides_results(directory: Arc<UserDirectory>) {
        let session = DashboardSession::start(directory, SessionConfig::default());
        session.select_role(Some(Role::Guest));
        settled(&session).await;

        session.select_role(None);

        let state = session.snapshot();
        assert!(!state.is_loading());
        assert!(state.results().is_empty());
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_role_and_term_changes_settle_on_both(directory: Arc<UserDirectory>) {
        let config = SessionConfig {
            latency: Duration::from_millis(1),
            debounce: Duration::from_millis(1),
        };
        let runtime = tokio::runtime::Handle::current();
        for round in 0..200_u32 {
            let session = Arc::new(DashboardSession::start(Arc::clone(&directory), config));
            session.type_text("a");
            let barrier = Arc::new(std::sync::Barrier::new(2));

            let chooser_session = Arc::clone(&session);
            let chooser_barrier = Arc::clone(&barrier);
            let chooser_runtime = runtime.clone();
            let chooser = std::thread::spawn(move || {
                let _entered = chooser_runtime.enter();
                chooser_barrier.wait();
                chooser_session.select_role(Some(Role::Viewer));
            });
            let submitter_session = Arc::clone(&session);
            let submitter = std::thread::spawn(move || {
                barrier.wait();
                submitter_session.submit()
            });
            chooser.join().expect("role thread");
            assert!(submitter.join().expect("submit thread"));

            let mut rx = session.state();
            let state = tokio::time::timeout(
                Duration::from_millis(500),
                rx.wait_for(|state| {
                    state.criteria().search_term() == "a" && !state.is_loading()
                }),
            )
            .await
            .expect("committed term reaches the engine")
            .expect("session alive")
            .clone();

            assert_eq!(state.criteria().role(), Some(Role::Viewer), "round {round}");
            let names: Vec<_> = state.results().iter().map(|user| user.name()).collect();
            assert_eq!(names, ["Marco Esposito", "Victor Barnes"], "round {round}");
        }
    }
}
