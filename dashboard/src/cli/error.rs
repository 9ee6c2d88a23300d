//! Error types for terminal command parsing.

use thiserror::Error;
use user_directory::UnknownRole;

/// Errors surfaced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command name is not recognised.
    #[error("unknown command: /{name} (try /help)")]
    UnknownCommand {
        /// Command name without the leading slash.
        name: String,
    },
    /// A command expected an argument but none was provided.
    #[error("missing argument for /{command}")]
    MissingArgument {
        /// Command that was missing its argument.
        command: &'static str,
    },
    /// A record id failed to parse.
    #[error("invalid user id '{value}' ({message})")]
    InvalidId {
        /// Raw value supplied.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The role argument is not one of the known roles.
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),
}
