//! Pure filtering over the directory snapshot.

use std::sync::Arc;

use user_directory::UserRecord;

use super::criteria::QueryCriteria;

/// Returns the records satisfying `criteria`, in store order.
///
/// Filters are conjunctive and the result is a subsequence of `records`.
/// This is the computation step only: the engine decides separately that
/// unconstrained criteria resolve to nothing.
///
/// # Examples
/// ```
/// use dashboard::query::{QueryCriteria, filter_users};
/// use user_directory::{Role, UserDirectory};
///
/// let directory = UserDirectory::bundled().expect("bundled directory");
/// let guests = filter_users(directory.records(), &QueryCriteria::new("", Some(Role::Guest)));
///
/// let names: Vec<_> = guests.iter().map(|user| user.name()).collect();
/// assert_eq!(names, ["Sarah Williams", "Emma Clark", "Serena Parisi"]);
/// ```
#[must_use]
pub fn filter_users(records: &[Arc<UserRecord>], criteria: &QueryCriteria) -> Vec<Arc<UserRecord>> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
