//! Query inputs: the committed search term and the optional role filter.

use user_directory::{Role, UserRecord};

/// The inputs of one query evaluation.
///
/// ## Invariants
/// - The search term is kept exactly as committed; blank terms count as
///   absent, but a non-blank term is matched without trimming.
///
/// # Examples
/// ```
/// use dashboard::query::QueryCriteria;
/// use user_directory::Role;
///
/// assert!(QueryCriteria::new("   ", None).is_unconstrained());
/// assert!(!QueryCriteria::new("", Some(Role::Guest)).is_unconstrained());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    search_term: String,
    folded_term: String,
    role: Option<Role>,
}

impl QueryCriteria {
    /// Builds criteria from a committed search term and role selection.
    pub fn new(search_term: impl Into<String>, role: Option<Role>) -> Self {
        let search_term = search_term.into();
        let folded_term = search_term.to_lowercase();
        Self {
            search_term,
            folded_term,
            role,
        }
    }

    /// Criteria with no search term and no role.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// The search term as committed.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The role filter, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns `true` if the search term has visible content.
    #[must_use]
    pub fn has_search_term(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Returns `true` if neither a search term nor a role is set.
    ///
    /// Unconstrained queries resolve to no results at all rather than the
    /// whole directory.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        !self.has_search_term() && self.role.is_none()
    }

    /// Returns `true` if both criteria select the same records.
    ///
    /// Unconstrained criteria are interchangeable whatever blank term they
    /// carry; otherwise the term must match exactly.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self == other || (self.is_unconstrained() && other.is_unconstrained())
    }

    /// Returns `true` if `record` satisfies every filter that is set.
    ///
    /// Names match by case-insensitive substring, roles by equality.
    #[must_use]
    pub fn matches(&self, record: &UserRecord) -> bool {
        if self.has_search_term() && !record.name().to_lowercase().contains(&self.folded_term) {
            return false;
        }
        self.role.is_none_or(|role| record.role() == role)
    }
}
