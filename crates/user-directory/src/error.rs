//! Error types for the user-directory crate.
//!
//! Directory construction is the only fallible step: once a
//! [`UserDirectory`](crate::UserDirectory) exists every read is infallible.

use std::path::PathBuf;

use thiserror::Error;

/// A role string outside the closed role set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{value}'; expected one of admin, editor, viewer, guest, owner, inactive")]
pub struct UnknownRole {
    /// The rejected input.
    pub value: String,
}

/// Errors that can occur when loading or validating a directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory file could not be read.
    #[error("failed to read directory file at '{path}': {message}")]
    IoError {
        /// Path to the directory file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The directory JSON is malformed or missing required fields.
    #[error("invalid directory JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The directory document version is not supported.
    #[error("unsupported directory version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the document.
        actual: u32,
    },

    /// Two records share the same id.
    #[error("duplicate user id {id}")]
    DuplicateId {
        /// The repeated id.
        id: u32,
    },

    /// A record has an empty or whitespace-only name.
    #[error("user {id} has a blank name")]
    BlankName {
        /// Id of the offending record.
        id: u32,
    },

    /// A record's email is not a syntactically valid mail address.
    #[error("user {id} has an invalid email address: {email}")]
    InvalidEmail {
        /// Id of the offending record.
        id: u32,
        /// The rejected address.
        email: String,
    },

    /// A record's role is outside the closed role set.
    #[error("user {id} has an unknown role: {source}")]
    UnknownRole {
        /// Id of the offending record.
        id: u32,
        /// Underlying parse failure.
        #[source]
        source: UnknownRole,
    },
}

/// Errors that can occur during demo directory generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to derive a usable email address after maximum retries.
    #[error("failed to generate a valid email address after {max_attempts} attempts")]
    EmailGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The requested user count does not fit the id space.
    #[error("cannot generate {requested} users; ids are limited to {max}")]
    TooManyUsers {
        /// Requested number of users.
        requested: usize,
        /// Largest representable id.
        max: u32,
    },

    /// The generated records failed directory validation.
    #[error("generated directory is invalid: {0}")]
    Invalid(#[from] DirectoryError),
}
