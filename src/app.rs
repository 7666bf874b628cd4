// ABOUTME: The update run: read the Ansible config, pick the machine address, confirm and execute
// ABOUTME: Prompt and process execution are injected so the whole flow is testable without a terminal

use crate::ansible::{read_ansible_config, read_machine_address};
use crate::error::UpdateError;
use crate::prompt::Confirm;
use crate::settings::Settings;
use crate::ssh::{CommandRunner, RemoteCommand};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    DryRun,
    Declined,
}

/// Steps one and two: resolve both Ansible inputs into the command to run.
pub fn prepare_command(settings: &Settings, config_path: &Path) -> Result<RemoteCommand> {
    tracing::debug!("Reading Ansible configuration from {}", config_path.display());
    let ansible = read_ansible_config(config_path)?;

    let address = read_machine_address(&ansible.hostfile, settings.inventory.address_line)?;

    Ok(RemoteCommand::new(settings, ansible.private_key_file, address))
}

/// Step three: show the command, wait for confirmation and run it.
pub fn execute<C, R, W>(
    command: &RemoteCommand,
    dry_run: bool,
    confirm: &mut C,
    runner: &mut R,
    out: &mut W,
) -> Result<Outcome>
where
    C: Confirm,
    R: CommandRunner,
    W: Write,
{
    if dry_run {
        writeln!(out, "{command}")?;
        return Ok(Outcome::DryRun);
    }

    let message = format!(
        "\nThis is the command line that updates the operating system of this instance:\n\n    \
         {command}\n\n\
         Press RETURN to run it now (and connect to the machine)"
    );

    if !confirm.confirm(&message)? {
        writeln!(out, "\nNo confirmation received; nothing was run.")?;
        return Ok(Outcome::Declined);
    }

    writeln!(out, "\nCommand to execute: {command}\n")?;
    out.flush()?;

    tracing::info!("Updating {}", command.address());
    let code = runner.run(command)?;
    writeln!(out)?;

    match code {
        Some(0) => Ok(Outcome::Updated),
        code => {
            tracing::warn!("Update of {} did not complete", command.address());
            Err(UpdateError::RemoteCommandFailed { code }.into())
        }
    }
}
