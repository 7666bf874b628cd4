// ABOUTME: Designed failure conditions for the update run and their process exit codes
// ABOUTME: Each variant carries enough context to print remediation guidance before exiting

use std::path::PathBuf;
use thiserror::Error;

/// Terminal failures of an update run. Anything else that goes wrong
/// (I/O, parse errors) travels as a plain `anyhow::Error` and exits with 1.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("no 'hostfile' key in the [{section}] section of {}", path.display())]
    MissingHostfileKey { path: PathBuf, section: String },

    #[error("host inventory file not found: {}", path.display())]
    HostfileNotFound { path: PathBuf },

    #[error(
        "host inventory {} has no machine address on line {} ({found} lines found)",
        path.display(),
        line + 1
    )]
    MalformedHostfile {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("remote command failed: {}", describe_status(*code))]
    RemoteCommandFailed { code: Option<i32> },

    #[error("no 'private_key_file' key in the [{section}] section of {}", path.display())]
    MissingPrivateKeyKey { path: PathBuf, section: String },

    #[error("remote-login client '{binary}' not found in PATH")]
    ClientNotFound { binary: String },
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl UpdateError {
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateError::ConfigNotFound { .. } => 1,
            UpdateError::MissingHostfileKey { .. } => 2,
            UpdateError::HostfileNotFound { .. } => 3,
            UpdateError::MalformedHostfile { .. } => 4,
            UpdateError::RemoteCommandFailed { .. } => 5,
            UpdateError::MissingPrivateKeyKey { .. } => 6,
            UpdateError::ClientNotFound { .. } => 7,
        }
    }

    /// Remediation text shown under the error message.
    ///
    /// `manual_command` is the command template a user can type by hand
    /// when they would rather skip the configuration files.
    pub fn guidance(&self, manual_command: &str) -> Option<String> {
        match self {
            UpdateError::ConfigNotFound { .. } => Some(format!(
                "Generate the Ansible configuration first, or point --config at an\n\
                 existing ansible.cfg.\n\n{}",
                bypass_hint(manual_command)
            )),
            UpdateError::HostfileNotFound { path } => Some(format!(
                "The machine address could not be read from '{}'.\n\
                 Check the 'hostfile' entry of the configuration.\n\n{}",
                path.display(),
                bypass_hint(manual_command)
            )),
            UpdateError::MalformedHostfile { line, .. } => Some(format!(
                "Expected the machine address on line {} of the inventory, below the\n\
                 group header (for example '[webservers]').",
                line + 1
            )),
            UpdateError::ClientNotFound { .. } => Some(
                "Install an OpenSSH client or set [ssh] binary in the settings file.".to_string(),
            ),
            _ => None,
        }
    }
}

fn bypass_hint(manual_command: &str) -> String {
    format!(
        "To skip the configuration, only the private key path and the machine\n\
         address are needed. The update can then be run by hand:\n\n    \
         {manual_command}\n\n\
         Setting up the configuration is still worthwhile; the other exercises\n\
         rely on it."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = vec![
            UpdateError::ConfigNotFound { path: "a".into() },
            UpdateError::MissingHostfileKey {
                path: "a".into(),
                section: "defaults".to_string(),
            },
            UpdateError::HostfileNotFound { path: "h".into() },
            UpdateError::MalformedHostfile {
                path: "h".into(),
                line: 1,
                found: 1,
            },
            UpdateError::RemoteCommandFailed { code: Some(1) },
            UpdateError::MissingPrivateKeyKey {
                path: "a".into(),
                section: "defaults".to_string(),
            },
            UpdateError::ClientNotFound {
                binary: "ssh".to_string(),
            },
        ];

        let mut codes: Vec<i32> = errors.iter().map(UpdateError::exit_code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_remote_failure_message() {
        let err = UpdateError::RemoteCommandFailed { code: Some(255) };
        assert_eq!(err.to_string(), "remote command failed: exit status 255");

        let err = UpdateError::RemoteCommandFailed { code: None };
        assert_eq!(err.to_string(), "remote command failed: terminated by signal");
    }

    #[test]
    fn test_guidance_includes_manual_command() {
        let manual = "ssh -i <key> ec2-user@<address> -t 'sudo yum update -y'";
        let err = UpdateError::ConfigNotFound {
            path: "./ansible.cfg".into(),
        };
        assert!(err.guidance(manual).unwrap().contains(manual));

        let err = UpdateError::HostfileNotFound {
            path: "/tmp/hosts".into(),
        };
        let text = err.guidance(manual).unwrap();
        assert!(text.contains("/tmp/hosts"));
        assert!(text.contains(manual));
    }

    #[test]
    fn test_malformed_hostfile_reports_one_based_line() {
        let err = UpdateError::MalformedHostfile {
            path: "/tmp/hosts".into(),
            line: 1,
            found: 1,
        };
        assert!(err.to_string().contains("on line 2 (1 lines found)"));
        assert!(err.guidance("").unwrap().contains("line 2"));
    }

    #[test]
    fn test_missing_key_has_no_guidance() {
        let err = UpdateError::MissingHostfileKey {
            path: "ansible.cfg".into(),
            section: "defaults".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.guidance("ssh").is_none());
    }
}
