//! User directory dashboard core.
//!
//! Purpose: filter an immutable [`UserDirectory`](user_directory::UserDirectory)
//! by name and role behind a simulated query latency, and feed it from a
//! debounced search box.
//!
//! Public surface:
//! - [`query`]: the Query Engine, a cancellable state holder that observers
//!   subscribe to.
//! - [`search_input`]: debounced search box adapter with immediate submit.
//! - [`session`]: search input and role selection wired to the engine.
//! - [`config`]: settings loaded via `OrthoConfig`.
//! - [`cli`]: command parsing and rendering for the terminal front end.

pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod search_input;
pub mod session;

pub use self::error::DashboardError;
