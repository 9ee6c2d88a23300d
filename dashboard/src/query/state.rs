//! Observable query state and its generation-guarded transitions.

use std::fmt;
use std::sync::Arc;

use user_directory::UserRecord;

use super::criteria::QueryCriteria;

/// Issuance number of a query; later invocations carry larger numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryGeneration(u64);

impl QueryGeneration {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for QueryGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a result list should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView {
    /// Nothing has been asked for; render no result area at all.
    Hidden,
    /// A query is in flight.
    Loading,
    /// The last query matched nothing.
    NoResults,
    /// The last query matched `count` records.
    Populated {
        /// Number of visible records.
        count: usize,
    },
}

/// The observable output of the Query Engine.
///
/// Only the engine mutates a state; observers receive clones through a
/// `watch` channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    generation: QueryGeneration,
    criteria: QueryCriteria,
    loading: bool,
    results: Vec<Arc<UserRecord>>,
}

impl QueryState {
    /// Generation of the query this state belongs to.
    #[must_use]
    pub const fn generation(&self) -> QueryGeneration {
        self.generation
    }

    /// Criteria of the latest issued query.
    #[must_use]
    pub const fn criteria(&self) -> &QueryCriteria {
        &self.criteria
    }

    /// Returns `true` while the latest query has not resolved.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Visible records in store order.
    #[must_use]
    pub fn results(&self) -> &[Arc<UserRecord>] {
        &self.results
    }

    /// Number of visible records.
    #[must_use]
    pub fn count(&self) -> usize {
        self.results.len()
    }

    /// Classifies the state for rendering.
    ///
    /// Only unconstrained criteria hide the results area. A role filter
    /// without a search term still shows loading and "no results", so the
    /// filter stays on screen.
    ///
    /// # Examples
    /// ```
    /// use dashboard::query::{QueryState, ResultsView};
    ///
    /// assert_eq!(QueryState::default().view(), ResultsView::Hidden);
    /// ```
    #[must_use]
    pub fn view(&self) -> ResultsView {
        if self.results.is_empty() && self.criteria.is_unconstrained() {
            ResultsView::Hidden
        } else if self.loading {
            ResultsView::Loading
        } else if self.results.is_empty() {
            ResultsView::NoResults
        } else {
            ResultsView::Populated {
                count: self.results.len(),
            }
        }
    }

    /// Starts a delayed query; earlier results stay visible until it lands.
    pub(crate) fn begin(&mut self, generation: QueryGeneration, criteria: QueryCriteria) {
        self.generation = generation;
        self.criteria = criteria;
        self.loading = true;
    }

    /// Returns to the unconstrained, empty state without any delay.
    pub(crate) fn reset(&mut self, generation: QueryGeneration) {
        self.generation = generation;
        self.criteria = QueryCriteria::unconstrained();
        self.loading = false;
        self.results.clear();
    }

    /// Applies a resolution if it belongs to the latest issued query.
    ///
    /// Returns `false`, leaving the state untouched, for stale generations.
    pub(crate) fn commit(
        &mut self,
        generation: QueryGeneration,
        results: Vec<Arc<UserRecord>>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.results = results;
        self.loading = false;
        true
    }
}
