// ABOUTME: Builds the remote-login command lines for the update run from settings and resolved inputs
// ABOUTME: Output is deterministic so the exact line shown to the user is the line that gets executed

use crate::settings::Settings;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteCommand {
    binary: String,
    key_file: String,
    user: String,
    address: String,
    remote_command: String,
}

impl RemoteCommand {
    pub fn new(settings: &Settings, key_file: String, address: String) -> Self {
        Self {
            binary: settings.ssh.binary.clone(),
            key_file,
            user: settings.ssh.user.clone(),
            address,
            remote_command: settings.remote.command.clone(),
        }
    }

    /// The same command with placeholders for the two values normally read
    /// from the Ansible files, for users who want to run it by hand.
    pub fn manual_template(settings: &Settings) -> String {
        Self::new(
            settings,
            "<private_key_file>".to_string(),
            "<machine_address>".to_string(),
        )
        .update_command()
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Interactive login: `<binary> -i <key> <user>@<address>`
    pub fn login_command(&self) -> String {
        format!(
            "{} -i {} {}@{}",
            self.binary, self.key_file, self.user, self.address
        )
    }

    /// Login plus a forced pseudo-terminal running the remote command.
    pub fn update_command(&self) -> String {
        format!("{} -t '{}'", self.login_command(), self.remote_command)
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.update_command())
    }
}
