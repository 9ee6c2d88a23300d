//! The Record Store and its JSON document format.
//!
//! A directory is validated once when it is built and never mutates
//! afterwards. Records are handed out as shared [`Arc`] references so query
//! results can point into the store without copying.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::error::DirectoryError;
use crate::record::{UserId, UserRecord, UserRecordDraft};
use crate::role::Role;

/// Current supported directory document version.
pub const DIRECTORY_VERSION: u32 = 1;

/// The demo directory compiled into the crate.
const BUNDLED_DIRECTORY_JSON: &str = include_str!("../fixtures/users.json");

/// An immutable, ordered sequence of user records.
///
/// # Example
///
/// ```
/// use user_directory::UserDirectory;
///
/// let json = r#"{
///     "version": 1,
///     "users": [{
///         "id": 1,
///         "name": "John Doe",
///         "title": "Software Engineer",
///         "team": "Engineering",
///         "email": "john@example.com",
///         "role": "admin",
///         "details": "Test details"
///     }]
/// }"#;
///
/// let directory = UserDirectory::from_json(json).expect("valid directory");
/// assert_eq!(directory.len(), 1);
/// assert_eq!(directory.records()[0].name(), "John Doe");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    records: Vec<Arc<UserRecord>>,
}

impl UserDirectory {
    /// Returns the seven-record demo directory shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] only if the bundled fixture has been
    /// edited into an invalid state.
    pub fn bundled() -> Result<Self, DirectoryError> {
        Self::from_json(BUNDLED_DIRECTORY_JSON)
    }

    /// Parses a directory document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if:
    /// - The JSON is malformed or missing required fields
    /// - The version is unsupported
    /// - A role is not one of the closed role values
    /// - A name is blank or an email address is invalid
    /// - Two records share an id
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let raw: RawDirectory =
            serde_json::from_str(json).map_err(|e| DirectoryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a directory document from a JSON file.
    ///
    /// The file is opened through a capability handle on its parent
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, DirectoryError> {
        let io_error = |message: String| DirectoryError::IoError {
            path: path.to_path_buf(),
            message,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("directory path must be a file".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;
        let contents = dir
            .read_to_string(Path::new(file_name))
            .map_err(|e| io_error(e.to_string()))?;

        Self::from_json(&contents)
    }

    /// Validates programmatically built records, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateId`] if two records share an id.
    pub fn from_records(records: Vec<UserRecord>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(DirectoryError::DuplicateId {
                    id: record.id().get(),
                });
            }
        }

        Ok(Self {
            records: records.into_iter().map(Arc::new).collect(),
        })
    }

    fn from_raw(raw: RawDirectory) -> Result<Self, DirectoryError> {
        if raw.version != DIRECTORY_VERSION {
            return Err(DirectoryError::UnsupportedVersion {
                expected: DIRECTORY_VERSION,
                actual: raw.version,
            });
        }

        let records = raw
            .users
            .into_iter()
            .map(RawUserRecord::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records)
    }

    /// Returns every record in store order.
    #[must_use]
    pub fn records(&self) -> &[Arc<UserRecord>] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the directory holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<&Arc<UserRecord>> {
        self.records.iter().find(|record| record.id() == id)
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
struct RawDirectory {
    version: u32,
    users: Vec<RawUserRecord>,
}

/// Raw JSON representation of a record; the role stays a string so unknown
/// values can be reported against their record id.
#[derive(Debug, Deserialize)]
struct RawUserRecord {
    id: u32,
    name: String,
    title: String,
    team: String,
    email: String,
    role: String,
    details: String,
}

impl RawUserRecord {
    fn into_record(self) -> Result<UserRecord, DirectoryError> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|source| DirectoryError::UnknownRole {
                id: self.id,
                source,
            })?;

        UserRecord::new(UserRecordDraft {
            id: self.id,
            name: self.name,
            title: self.title,
            team: self.team,
            email: self.email,
            role,
            details: self.details,
        })
    }
}
