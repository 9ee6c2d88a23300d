//! Behavioural tests for query filtering.
//!
//! These scenarios pin the filtering rules the query engine applies once its
//! simulated latency has elapsed: case-insensitive name matching, exact role
//! matching, conjunction, and store order.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use dashboard::query::{QueryCriteria, filter_users};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use user_directory::{Role, UserDirectory, UserRecord};

const THREE_USERS_JSON: &str = r#"{
    "version": 1,
    "users": [
        {"id": 1, "name": "John Doe", "title": "Software Engineer", "team": "Engineering",
         "email": "john@example.com", "role": "admin", "details": "Test details"},
        {"id": 2, "name": "Jane Smith", "title": "Product Manager", "team": "Product",
         "email": "jane@example.com", "role": "editor", "details": "Test details"},
        {"id": 3, "name": "Bob Wilson", "title": "Designer", "team": "Design",
         "email": "bob@example.com", "role": "viewer", "details": "Test details"}
    ]
}"#;

/// Test world holding the directory, criteria, and filtered results.
#[derive(Default, ScenarioState)]
struct World {
    directory: Slot<UserDirectory>,
    criteria: Slot<QueryCriteria>,
    results: Slot<Vec<Arc<UserRecord>>>,
}

impl World {
    fn filter(&self, criteria: QueryCriteria) {
        let directory = self.directory.get().expect("directory should be set");
        self.results.set(filter_users(directory.records(), &criteria));
        self.criteria.set(criteria);
    }

    fn names(&self) -> Vec<String> {
        self.results
            .get()
            .expect("results should be set")
            .iter()
            .map(|user| user.name().to_owned())
            .collect()
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("the three-user directory")]
fn the_three_user_directory(world: &World) {
    let directory = UserDirectory::from_json(THREE_USERS_JSON).expect("valid directory");
    world.directory.set(directory);
}

#[given("the bundled directory")]
fn the_bundled_directory(world: &World) {
    world
        .directory
        .set(UserDirectory::bundled().expect("bundled directory"));
}

// ============================================================================
// When steps
// ============================================================================

#[when("the directory is filtered by the name fragment john")]
fn filtered_by_john(world: &World) {
    world.filter(QueryCriteria::new("john", None));
}

#[when("the directory is filtered by the name fragment a and the editor role")]
fn filtered_by_a_and_editor(world: &World) {
    world.filter(QueryCriteria::new("a", Some(Role::Editor)));
}

#[when("the directory is filtered by the name NonExistent")]
fn filtered_by_nonexistent(world: &World) {
    world.filter(QueryCriteria::new("NonExistent", None));
}

#[when("the directory is filtered by the guest role")]
fn filtered_by_guest(world: &World) {
    world.filter(QueryCriteria::new("", Some(Role::Guest)));
}

#[when("the criteria hold only whitespace")]
fn criteria_hold_only_whitespace(world: &World) {
    world.criteria.set(QueryCriteria::new(" \t ", None));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("only John Doe is listed")]
fn only_john_doe_is_listed(world: &World) {
    assert_eq!(world.names(), ["John Doe"]);
}

#[then("only Jane Smith is listed")]
fn only_jane_smith_is_listed(world: &World) {
    assert_eq!(world.names(), ["Jane Smith"]);
}

#[then("no users are listed")]
fn no_users_are_listed(world: &World) {
    assert!(world.names().is_empty());
}

#[then("{count:usize} users are listed")]
fn users_are_listed(world: &World, count: usize) {
    assert_eq!(world.names().len(), count);
}

#[then("every listed user is a guest")]
fn every_listed_user_is_a_guest(world: &World) {
    let results = world.results.get().expect("results should be set");
    assert!(results.iter().all(|user| user.role() == Role::Guest));
}

#[then("the listed users keep store order")]
fn the_listed_users_keep_store_order(world: &World) {
    let directory = world.directory.get().expect("directory should be set");
    let results = world.results.get().expect("results should be set");
    let mut store = directory.records().iter();
    for user in &results {
        assert!(
            store.any(|candidate| Arc::ptr_eq(candidate, user)),
            "{} is out of store order",
            user.name()
        );
    }
}

#[then("the criteria are unconstrained")]
fn the_criteria_are_unconstrained(world: &World) {
    let criteria = world.criteria.get().expect("criteria should be set");
    assert!(criteria.is_unconstrained());
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/query_engine.feature",
    name = "Name search matches case-insensitively"
)]
fn name_search_matches_case_insensitively(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_engine.feature",
    name = "Name and role filters combine"
)]
fn name_and_role_filters_combine(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_engine.feature",
    name = "Unmatched names yield nothing"
)]
fn unmatched_names_yield_nothing(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_engine.feature",
    name = "Role filter alone keeps store order"
)]
fn role_filter_alone_keeps_store_order(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_engine.feature",
    name = "Blank search without a role is unconstrained"
)]
fn blank_search_without_a_role_is_unconstrained(world: World) {
    let _ = world;
}
