//! End-to-end tests for the search session on a paused Tokio clock.
//!
//! Keystrokes flow through the debounced input into the query engine; these
//! tests pin when results become visible and which results win a race.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;
use std::time::Duration;

use dashboard::query::{QueryState, ResultsView};
use dashboard::session::{DashboardSession, SessionConfig};
use rstest::{fixture, rstest};
use tokio::time::{Instant, sleep};
use user_directory::{Role, UserDirectory};

const DEBOUNCE: Duration = Duration::from_millis(500);
const LATENCY: Duration = Duration::from_millis(500);

#[fixture]
fn session() -> DashboardSession {
    let directory = Arc::new(UserDirectory::bundled().expect("bundled directory"));
    DashboardSession::start(
        directory,
        SessionConfig {
            latency: LATENCY,
            debounce: DEBOUNCE,
        },
    )
}

async fn first_resolution(session: &DashboardSession) -> QueryState {
    let mut rx = session.state();
    let state = rx
        .wait_for(|state| state.generation().get() > 0 && !state.is_loading())
        .await
        .expect("session alive");
    state.clone()
}

fn names(state: &QueryState) -> Vec<&str> {
    state.results().iter().map(|user| user.name()).collect()
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn typed_search_resolves_after_debounce_and_latency(session: DashboardSession) {
    let started = Instant::now();
    session.type_text("emma");

    let state = first_resolution(&session).await;

    assert_eq!(started.elapsed(), DEBOUNCE + LATENCY);
    assert_eq!(names(&state), ["Emma Clark"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn submit_skips_the_debounce(session: DashboardSession) {
    let started = Instant::now();
    session.type_text("Victor");
    assert!(session.submit());

    let state = first_resolution(&session).await;

    assert_eq!(started.elapsed(), LATENCY);
    assert_eq!(names(&state), ["Victor Barnes"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn only_the_settled_term_is_queried(session: DashboardSession) {
    for text in ["S", "Se", "Ser", "Sere"] {
        session.type_text(text);
        sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(session.snapshot().generation().get(), 0);

    let state = first_resolution(&session).await;

    assert_eq!(state.criteria().search_term(), "Sere");
    assert_eq!(names(&state), ["Serena Parisi"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn newer_term_wins_over_pending_query(session: DashboardSession) {
    session.type_text("George");
    assert!(session.submit());
    sleep(LATENCY / 2).await;
    session.type_text("Arianna");
    assert!(session.submit());

    let state = first_resolution(&session).await;
    sleep(LATENCY * 2).await;

    assert_eq!(names(&state), ["Arianna Russo"]);
    assert_eq!(names(&session.snapshot()), ["Arianna Russo"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn role_filter_narrows_the_committed_term(session: DashboardSession) {
    session.type_text("a");
    assert!(session.submit());
    let everyone = first_resolution(&session).await;
    assert_eq!(everyone.count(), 7);

    session.select_role(Some(Role::Viewer));
    assert_eq!(session.snapshot().view(), ResultsView::Loading);
    assert_eq!(session.snapshot().count(), 7);
    let mut rx = session.state();
    let narrowed = rx
        .wait_for(|state| !state.is_loading())
        .await
        .expect("session alive")
        .clone();

    assert_eq!(names(&narrowed), ["Marco Esposito", "Victor Barnes"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn clearing_the_box_hides_results(session: DashboardSession) {
    session.type_text("Sarah");
    assert!(session.submit());
    first_resolution(&session).await;

    session.type_text("");
    assert!(!session.submit());
    sleep(DEBOUNCE + Duration::from_millis(1)).await;

    let state = session.snapshot();
    assert!(!state.is_loading());
    assert_eq!(state.view(), ResultsView::Hidden);
}
