//! Subcommand implementations.
//!
//! Read commands never write; write commands issue exactly the requests the
//! matching library operation issues.

pub mod path;
pub mod read;
pub mod write;

/// Error type shared by every command.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
