//! Deterministic demo directory generation.
//!
//! The same seed always produces an identical directory, so demonstrations
//! and load exercises can be reproduced exactly.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use crate::directory::UserDirectory;
use crate::error::GenerationError;
use crate::record::{UserRecord, UserRecordDraft};
use crate::role::Role;
use crate::validation::sanitize_local_part;

/// Maximum number of attempts to produce a name with a usable email.
const MAX_EMAIL_ATTEMPTS: usize = 100;

/// Mail domain used for every generated address.
const EMAIL_DOMAIN: &str = "example.com";

const TITLES: [&str; 6] = [
    "Software Engineer",
    "Product Designer",
    "Product Manager",
    "Data Analyst",
    "Support Specialist",
    "Engineering Manager",
];

const TEAMS: [&str; 6] = [
    "Security",
    "Website",
    "Finance",
    "Marketing",
    "Platform",
    "Operations",
];

/// Generates a demo directory of `user_count` records from `seed`.
///
/// Generated records have:
///
/// - Sequential ids starting at 1
/// - A first and last name
/// - A title and team drawn from fixed pools
/// - A role drawn from [`Role::ALL`]
/// - A unique `first.last@example.com` address
/// - A lorem sentence as details
///
/// # Errors
///
/// Returns [`GenerationError`] if `user_count` exceeds the id space or a
/// usable email address cannot be derived.
///
/// # Example
///
/// ```
/// use user_directory::generate_directory;
///
/// let first = generate_directory(2026, 12).expect("generated");
/// let second = generate_directory(2026, 12).expect("generated");
///
/// assert_eq!(first.len(), 12);
/// assert_eq!(first, second);
/// ```
pub fn generate_directory(seed: u64, user_count: usize) -> Result<UserDirectory, GenerationError> {
    let last_id = u32::try_from(user_count).map_err(|_| GenerationError::TooManyUsers {
        requested: user_count,
        max: u32::MAX,
    })?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut used_local_parts = HashSet::with_capacity(user_count);
    let mut records = Vec::with_capacity(user_count);

    for id in 1..=last_id {
        let record = generate_single_user(&mut rng, id, &mut used_local_parts)?;
        records.push(record);
    }

    Ok(UserDirectory::from_records(records)?)
}

fn generate_single_user(
    rng: &mut ChaCha8Rng,
    id: u32,
    used_local_parts: &mut HashSet<String>,
) -> Result<UserRecord, GenerationError> {
    let (name, local_part) = generate_name(rng)?;

    // Homonyms keep their address unique by borrowing the record id.
    let local_part = if used_local_parts.contains(&local_part) {
        format!("{local_part}.{id}")
    } else {
        local_part
    };
    used_local_parts.insert(local_part.clone());

    let title = TITLES.choose(rng).copied().unwrap_or("Software Engineer");
    let team = TEAMS.choose(rng).copied().unwrap_or("Platform");
    let role = Role::ALL.choose(rng).copied().unwrap_or(Role::Viewer);
    let details: String = Sentence(EN, 6..12).fake_with_rng(rng);

    Ok(UserRecord::new(UserRecordDraft {
        id,
        name,
        title: title.to_owned(),
        team: team.to_owned(),
        email: format!("{local_part}@{EMAIL_DOMAIN}"),
        role,
        details,
    })?)
}

/// Generates a display name and the email local part derived from it.
///
/// Retries when sanitising either half of the name leaves nothing usable.
fn generate_name(rng: &mut ChaCha8Rng) -> Result<(String, String), GenerationError> {
    for _ in 0..MAX_EMAIL_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);

        let first_part = sanitize_local_part(&first);
        let last_part = sanitize_local_part(&last);
        if first_part.is_empty() || last_part.is_empty() {
            continue;
        }

        return Ok((format!("{first} {last}"), format!("{first_part}.{last_part}")));
    }

    Err(GenerationError::EmailGenerationFailed {
        max_attempts: MAX_EMAIL_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;
    use crate::validation::is_valid_email;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(25)]
    fn generates_requested_user_count(#[case] count: usize) {
        let directory = generate_directory(42, count).expect("generated");
        assert_eq!(directory.len(), count);
    }

    #[test]
    fn generation_is_deterministic() {
        let first = generate_directory(42, 20).expect("generated");
        let second = generate_directory(42, 20).expect("generated");

        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_produce_different_directories() {
        let first = generate_directory(42, 20).expect("generated");
        let second = generate_directory(43, 20).expect("generated");

        assert_ne!(first, second);
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let directory = generate_directory(7, 10).expect("generated");
        let ids: Vec<_> = directory.records().iter().map(|u| u.id().get()).collect();

        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn emails_are_valid_and_unique() {
        let directory = generate_directory(2026, 200).expect("generated");
        let mut seen = HashSet::new();

        for user in directory.records() {
            assert!(is_valid_email(user.email()), "invalid email {}", user.email());
            assert!(seen.insert(user.email().to_owned()), "duplicate {}", user.email());
        }
    }

    #[test]
    fn titles_and_teams_come_from_pools() {
        let directory = generate_directory(9, 50).expect("generated");

        for user in directory.records() {
            assert!(TITLES.contains(&user.title()));
            assert!(TEAMS.contains(&user.team()));
        }
    }
}
