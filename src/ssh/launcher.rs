// ABOUTME: Runs the remote update command through the system shell with the terminal's standard streams
// ABOUTME: The CommandRunner trait lets the update flow be exercised without spawning processes

use crate::error::UpdateError;
use crate::ssh::command::RemoteCommand;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub trait CommandRunner {
    /// Run the update command to completion. Returns the exit code, or
    /// `None` when the process was terminated by a signal.
    fn run(&mut self, command: &RemoteCommand) -> Result<Option<i32>>;
}

/// Executes `sh -c "<update command>"`, inheriting stdin, stdout and stderr.
pub struct ShellLauncher {
    shell: String,
}

impl ShellLauncher {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    fn shell_command(&self, command: &RemoteCommand) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command.update_command())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ShellLauncher {
    fn run(&mut self, command: &RemoteCommand) -> Result<Option<i32>> {
        let client = locate_client(command.binary())?;
        tracing::debug!("Remote-login client resolved to {}", client.display());

        let mut cmd = self.shell_command(command);
        tracing::debug!("Spawning: {:?}", cmd);

        let status = cmd
            .status()
            .with_context(|| format!("Failed to start '{}' for: {}", self.shell, command))?;

        tracing::debug!("Remote command finished with {}", status);
        Ok(status.code())
    }
}

/// Resolve the remote-login client on PATH (or as given, when it is a path).
pub fn locate_client(binary: &str) -> Result<PathBuf> {
    which::which(binary).map_err(|e| {
        tracing::debug!("Lookup of '{}' failed: {}", binary, e);
        UpdateError::ClientNotFound {
            binary: binary.to_string(),
        }
        .into()
    })
}
