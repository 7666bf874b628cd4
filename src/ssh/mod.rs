// ABOUTME: Remote-login command construction and shell execution for the update run
// ABOUTME: The ssh client itself is external; this module only formats and launches its command line

pub mod command;
pub mod launcher;

pub use command::RemoteCommand;
pub use launcher::{CommandRunner, ShellLauncher};
