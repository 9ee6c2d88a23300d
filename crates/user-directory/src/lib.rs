//! Immutable in-memory user directory for the dashboard.
//!
//! This crate owns the Record Store: the ordered, read-only sequence of user
//! records that the dashboard's query engine filters. It is independent of
//! the dashboard crate so that record types can be shared by loaders,
//! generators, and front ends alike.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - The bundled seven-record demo directory
//! - Loading directory documents from JSON strings or files
//! - Validation of ids, names, email addresses, and role values
//! - Deterministic demo directory generation from a named seed
//!
//! # Example
//!
//! ```
//! use user_directory::{Role, UserDirectory};
//!
//! let directory = UserDirectory::bundled().expect("bundled directory is valid");
//! let admins = directory
//!     .records()
//!     .iter()
//!     .filter(|user| user.role() == Role::Admin)
//!     .count();
//!
//! assert_eq!(directory.len(), 7);
//! assert_eq!(admins, 1);
//! ```

mod directory;
mod error;
mod generator;
mod record;
mod role;
mod validation;

pub use directory::{DIRECTORY_VERSION, UserDirectory};
pub use error::{DirectoryError, GenerationError, UnknownRole};
pub use generator::generate_directory;
pub use record::{UserId, UserRecord, UserRecordDraft};
pub use role::Role;
pub use validation::is_valid_email;
