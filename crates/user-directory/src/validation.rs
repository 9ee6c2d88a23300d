//! Field validation applied when records enter a directory.
//!
//! # Validation Rules
//!
//! - Names must not be blank once trimmed
//! - Email addresses must be syntactically valid so the detail view can
//!   build a `mailto:` link from them

use std::sync::OnceLock;

use regex::Regex;

/// Longest address accepted, per the SMTP path limit.
const EMAIL_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot-separated atoms before the `@`, at least two labels after it.
        let pattern = concat!(
            r"^[A-Za-z0-9_%+-]+(\.[A-Za-z0-9_%+-]+)*",
            r"@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?",
            r"(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)+$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Returns `true` if `email` is a syntactically valid mail address.
///
/// # Examples
///
/// ```
/// use user_directory::is_valid_email;
///
/// assert!(is_valid_email("george.harris@example.com"));
/// assert!(!is_valid_email("george.harris"));
/// assert!(!is_valid_email("george..harris@example.com"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX && email_regex().is_match(email)
}

/// Returns `true` if the name has visible content.
#[must_use]
pub(crate) fn is_present(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Reduces a display name fragment to characters usable in an email local
/// part.
#[must_use]
pub(crate) fn sanitize_local_part(fragment: &str) -> String {
    fragment
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
