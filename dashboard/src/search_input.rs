//! Debounced search box adapter.
//!
//! Keystrokes publish the raw box contents immediately and commit them once
//! typing has been quiet for the debounce period. An explicit submit commits
//! the current text at once. Committed values are what the query engine
//! consumes.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Default quiet period before a keystroke burst is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
enum InputEvent {
    Keystroke,
    Submit(String),
}

/// Handle to a running search box adapter.
///
/// Dropping the handle stops the debounce task.
///
/// # Examples
/// ```
/// use dashboard::search_input::SearchInput;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let input = SearchInput::spawn(Duration::from_millis(10));
/// let mut committed = input.committed();
/// input.type_text("jane");
/// assert!(input.submit());
/// committed.changed().await.expect("adapter running");
/// assert_eq!(*committed.borrow(), "jane");
/// # }
/// ```
#[derive(Debug)]
pub struct SearchInput {
    events: mpsc::UnboundedSender<InputEvent>,
    raw: watch::Sender<String>,
    committed: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl SearchInput {
    /// Starts the adapter on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(debounce: Duration) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let (raw, raw_rx) = watch::channel(String::new());
        let (committed_tx, committed) = watch::channel(String::new());
        let debouncer = Debouncer {
            debounce,
            events: rx,
            raw: raw_rx,
            committed: committed_tx,
        };
        let task = tokio::spawn(debouncer.run());
        Self {
            events,
            raw,
            committed,
            task,
        }
    }

    /// Replaces the box contents, as on a keystroke.
    pub fn type_text(&self, text: impl Into<String>) {
        self.raw.send_replace(text.into());
        self.send(InputEvent::Keystroke);
    }

    /// Commits the current contents without waiting for the debounce.
    ///
    /// Returns `false`, committing nothing, while the box is blank.
    pub fn submit(&self) -> bool {
        let text = self.current_text();
        if text.trim().is_empty() {
            debug!("blank submit ignored");
            return false;
        }
        self.send(InputEvent::Submit(text));
        true
    }

    /// The box contents as last typed.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.raw.borrow().clone()
    }

    /// Subscribes to raw box contents, updated on every keystroke.
    #[must_use]
    pub fn raw(&self) -> watch::Receiver<String> {
        self.raw.subscribe()
    }

    /// Subscribes to committed search terms.
    #[must_use]
    pub fn committed(&self) -> watch::Receiver<String> {
        self.committed.clone()
    }

    fn send(&self, event: InputEvent) {
        if self.events.send(event).is_err() {
            warn!("search input task is no longer running");
        }
    }
}

impl Drop for SearchInput {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Debouncer {
    debounce: Duration,
    events: mpsc::UnboundedReceiver<InputEvent>,
    raw: watch::Receiver<String>,
    committed: watch::Sender<String>,
}

impl Debouncer {
    async fn run(mut self) {
        let mut pending = false;
        loop {
            let next = if pending {
                match timeout(self.debounce, self.events.recv()).await {
                    Ok(event) => event,
                    Err(_) => {
                        pending = false;
                        let settled = self.raw.borrow().clone();
                        self.commit(&settled, "debounce");
                        continue;
                    }
                }
            } else {
                self.events.recv().await
            };

            match next {
                Some(InputEvent::Keystroke) => pending = true,
                Some(InputEvent::Submit(text)) => {
                    pending = false;
                    self.commit(&text, "submit");
                }
                None => break,
            }
        }
    }

    fn commit(&self, text: &str, via: &'static str) {
        let changed = self.committed.send_if_modified(|current| {
            if current == text {
                return false;
            }
            text.clone_into(current);
            true
        });
        if changed {
            debug!(via, term = text, "search term committed");
        }
    }
}
