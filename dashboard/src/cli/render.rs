//! Plain-text rendering of dashboard state.

use user_directory::{Role, UserRecord};

use crate::query::{QueryState, ResultsView};

/// Renders the role filter row followed by the result list.
///
/// Hidden states render as an empty string, loading states as a single
/// `Loading...` line.
#[must_use]
pub fn render_state(state: &QueryState, active: Option<Role>) -> String {
    let mut lines = Vec::new();
    match state.view() {
        ResultsView::Hidden => return String::new(),
        ResultsView::Loading => return "Loading...".to_owned(),
        ResultsView::NoResults => {
            lines.push(filter_row(active));
            lines.push("No results found".to_owned());
        }
        ResultsView::Populated { count } => {
            lines.push(filter_row(active));
            lines.push(match count {
                1 => "1 result".to_owned(),
                n => format!("{n} results"),
            });
            lines.extend(state.results().iter().map(|user| summary_line(user)));
        }
    }
    lines.join("\n")
}

/// Renders every detail of `user`.
#[must_use]
pub fn render_details(user: &UserRecord) -> String {
    [
        format!("{} (#{})", user.name(), user.id()),
        format!("  Title:   {}", user.title()),
        format!("  Team:    {}", user.team()),
        format!("  Role:    {}", user.role()),
        format!("  Contact: {} <{}>", user.email(), user.mailto_href()),
        format!("  Details: {}", user.details()),
        "  (/close to dismiss)".to_owned(),
    ]
    .join("\n")
}

/// Lists the roles, marking the active one.
#[must_use]
pub fn render_roles(active: Option<Role>) -> String {
    let listed: Vec<String> = Role::ALL
        .into_iter()
        .map(|role| {
            if Some(role) == active {
                format!("* {role}")
            } else {
                format!("  {role}")
            }
        })
        .collect();
    listed.join("\n")
}

fn filter_row(active: Option<Role>) -> String {
    let buttons: Vec<String> = Role::ALL
        .into_iter()
        .map(|role| {
            if Some(role) == active {
                format!("[{role}]")
            } else {
                role.to_string()
            }
        })
        .collect();
    format!("FILTER BY: {}", buttons.join(" "))
}

fn summary_line(user: &UserRecord) -> String {
    format!(
        "  #{} [{}] {}, {} | Team: {} | {}",
        user.id(),
        user.role(),
        user.name(),
        user.title(),
        user.team(),
        user.email()
    )
}
