//! User record types.

use std::fmt;

use crate::error::DirectoryError;
use crate::role::Role;
use crate::validation::{is_present, is_valid_email};

/// Stable user identifier, unique within a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(u32);

impl UserId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UserId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Unvalidated record fields, checked by [`UserRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecordDraft {
    /// Unique identifier.
    pub id: u32,
    /// Full name, matched by search.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Team name.
    pub team: String,
    /// Contact address.
    pub email: String,
    /// Role tag, matched by the role filter.
    pub role: Role,
    /// Free-form notes.
    pub details: String,
}

/// An immutable directory entry.
///
/// ## Invariants
/// - `name` is non-empty once trimmed of whitespace.
/// - `email` is a syntactically valid mail address.
///
/// # Example
///
/// ```
/// use user_directory::{Role, UserRecord, UserRecordDraft};
///
/// let user = UserRecord::new(UserRecordDraft {
///     id: 1,
///     name: "John Doe".to_owned(),
///     title: "Software Engineer".to_owned(),
///     team: "Engineering".to_owned(),
///     email: "john@example.com".to_owned(),
///     role: Role::Admin,
///     details: "Test details".to_owned(),
/// })
/// .expect("valid record");
///
/// assert_eq!(user.mailto_href(), "mailto:john@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    name: String,
    title: String,
    team: String,
    email: String,
    role: Role,
    details: String,
}

impl UserRecord {
    /// Validates the draft and builds a record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::BlankName`] or
    /// [`DirectoryError::InvalidEmail`] when a field breaks its invariant.
    pub fn new(draft: UserRecordDraft) -> Result<Self, DirectoryError> {
        let UserRecordDraft {
            id,
            name,
            title,
            team,
            email,
            role,
            details,
        } = draft;

        if !is_present(&name) {
            return Err(DirectoryError::BlankName { id });
        }
        if !is_valid_email(&email) {
            return Err(DirectoryError::InvalidEmail { id, email });
        }

        Ok(Self {
            id: UserId(id),
            name,
            title,
            team,
            email,
            role,
            details,
        })
    }

    /// Returns the record id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the job title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the team name.
    #[must_use]
    pub fn team(&self) -> &str {
        &self.team
    }

    /// Returns the contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role tag.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the free-form notes.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Builds the `mailto:` link shown in the detail view.
    #[must_use]
    pub fn mailto_href(&self) -> String {
        format!("mailto:{}", self.email)
    }
}
