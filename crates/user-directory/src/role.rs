//! Closed role enumeration used for exact-match filtering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownRole;

/// Role tag carried by every user record.
///
/// The set is closed; strings from outside the program are parsed with
/// [`FromStr`] and rejected when they do not name a variant.
///
/// # Example
///
/// ```
/// use user_directory::Role;
///
/// assert_eq!("editor".parse::<Role>(), Ok(Role::Editor));
/// assert_eq!(Role::Owner.as_str(), "owner");
/// assert!("superuser".parse::<Role>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// May edit content.
    Editor,
    /// Read-only member.
    Viewer,
    /// External guest.
    Guest,
    /// Owns the workspace.
    Owner,
    /// Deactivated account.
    Inactive,
}

impl Role {
    /// Every role in the stable order used to build filter controls.
    pub const ALL: [Self; 6] = [
        Self::Admin,
        Self::Editor,
        Self::Viewer,
        Self::Guest,
        Self::Owner,
        Self::Inactive,
    ];

    /// Returns the lowercase wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
            Self::Guest => "guest",
            Self::Owner => "owner",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRole {
                value: value.to_owned(),
            })
    }
}
