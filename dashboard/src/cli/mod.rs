//! Terminal front end support.
//!
//! Lines read from standard input parse into [`Command`] values that
//! [`execute`] applies to a [`DashboardSession`]. Rendering is kept in plain
//! functions returning strings so the binary only owns the I/O.

use user_directory::{Role, UserId};

use crate::session::DashboardSession;

mod error;
mod render;

pub use error::CommandError;
pub use render::{render_details, render_roles, render_state};

/// Usage text printed by `/help`.
pub const USAGE: &str = "\
Type to search by name; results follow once typing pauses.
Commands:
  /submit        search for the current text immediately
  /role <role>   filter by role (/role none clears the filter)
  /roles         list the available roles
  /show <id>     open the details of a listed user
  /close         close the details view
  /help          show this message
  /quit          exit";

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search box contents.
    Type(String),
    /// Commit the search box without waiting.
    Submit,
    /// Select or clear the role filter.
    Role(Option<Role>),
    /// List the role values.
    Roles,
    /// Open the detail view.
    Show(UserId),
    /// Close the detail view.
    Close,
    /// Print usage.
    Help,
    /// Leave the dashboard.
    Quit,
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading commands.
    Continue,
    /// Print the message and keep reading commands.
    Print(String),
    /// Stop the dashboard.
    Quit,
}

/// Parses one input line.
///
/// Lines not starting with `/` are search box contents, verbatim.
///
/// # Errors
///
/// Returns [`CommandError`] for unknown commands, missing arguments, and
/// arguments that do not parse.
///
/// # Example
///
/// ```
/// use dashboard::cli::{Command, parse_command};
/// use user_directory::Role;
///
/// assert_eq!(parse_command("Emma"), Ok(Command::Type("Emma".to_owned())));
/// assert_eq!(parse_command("/role guest"), Ok(Command::Role(Some(Role::Guest))));
/// assert_eq!(parse_command("/role none"), Ok(Command::Role(None)));
/// ```
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Command::Type(line.to_owned()));
    };
    let (name, argument) = match command.trim().split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim()).filter(|arg| !arg.is_empty())),
        None => (command.trim(), None),
    };

    match name {
        "submit" => Ok(Command::Submit),
        "role" => parse_role(argument),
        "roles" => Ok(Command::Roles),
        "show" => parse_show(argument),
        "close" => Ok(Command::Close),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::UnknownCommand {
            name: other.to_owned(),
        }),
    }
}

fn parse_role(argument: Option<&str>) -> Result<Command, CommandError> {
    let value = argument.ok_or(CommandError::MissingArgument { command: "role" })?;
    if value.eq_ignore_ascii_case("none") {
        return Ok(Command::Role(None));
    }
    Ok(Command::Role(Some(value.parse()?)))
}

fn parse_show(argument: Option<&str>) -> Result<Command, CommandError> {
    let value = argument.ok_or(CommandError::MissingArgument { command: "show" })?;
    value
        .parse::<u32>()
        .map(|id| Command::Show(UserId::new(id)))
        .map_err(|err| CommandError::InvalidId {
            value: value.to_owned(),
            message: err.to_string(),
        })
}

/// Applies `command` to `session`.
pub fn execute(session: &DashboardSession, command: Command) -> Outcome {
    match command {
        Command::Type(text) => {
            session.type_text(text);
            Outcome::Continue
        }
        Command::Submit => {
            if session.submit() {
                Outcome::Continue
            } else {
                Outcome::Print("Type a name before submitting.".to_owned())
            }
        }
        Command::Role(role) => {
            session.select_role(role);
            Outcome::Continue
        }
        Command::Roles => Outcome::Print(render_roles(session.role())),
        Command::Show(id) => {
            if session.open_details(id).is_some() {
                Outcome::Continue
            } else {
                Outcome::Print(format!("No listed user with id {id}."))
            }
        }
        Command::Close => {
            if session.close_details() {
                Outcome::Continue
            } else {
                Outcome::Print("No details are open.".to_owned())
            }
        }
        Command::Help => Outcome::Print(USAGE.to_owned()),
        Command::Quit => Outcome::Quit,
    }
}
