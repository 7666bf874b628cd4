// ABOUTME: Tool settings describing how the remote update command is built and where inputs live
// ABOUTME: Loaded from an optional TOML file under the user's config directory, with validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    pub ssh: SshSettings,
    pub remote: RemoteSettings,
    pub ansible: AnsibleSettings,
    #[serde(default)]
    pub inventory: InventorySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SshSettings {
    pub binary: String,
    pub user: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RemoteSettings {
    pub command: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AnsibleSettings {
    pub config_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct InventorySettings {
    /// Zero-based index of the inventory line holding the machine address.
    #[serde(default = "default_address_line")]
    pub address_line: usize,
}

fn default_address_line() -> usize {
    1
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            address_line: default_address_line(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ssh: SshSettings {
                binary: "ssh".to_string(),
                user: "ec2-user".to_string(),
            },
            remote: RemoteSettings {
                command: "sudo yum update -y".to_string(),
            },
            ansible: AnsibleSettings {
                config_path: "./ansible.cfg".to_string(),
            },
            inventory: InventorySettings::default(),
        }
    }
}

impl Settings {
    pub fn default_settings_content() -> &'static str {
        r#"# remote-update settings

[ssh]
# Remote-login client and the account used on the target machine
binary = "ssh"
user = "ec2-user"

[remote]
# Runs under a forced pseudo-terminal so sudo can prompt if it needs to.
# Must not contain single quotes.
command = "sudo yum update -y"

[ansible]
# Overridden by --config
config_path = "./ansible.cfg"

[inventory]
# Zero-based line of the inventory file holding the machine address.
# Line 0 is usually the group header, e.g. [webservers]
address_line = 1
"#
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::load_from_str(&content)
    }

    /// Load settings, falling back to defaults when no file exists at the
    /// default location. An explicitly requested file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let path = Self::default_settings_path()?;
        if path.exists() {
            tracing::debug!("Loading settings from {}", path.display());
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn default_settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(config_dir.join("remote-update").join("config.toml"))
    }

    pub fn expand_paths(&mut self) -> Result<()> {
        self.ansible.config_path = expand_tilde(&self.ansible.config_path)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.ssh.binary.trim().is_empty() {
            anyhow::bail!("ssh binary cannot be empty");
        }

        if self.ssh.user.trim().is_empty() {
            anyhow::bail!("ssh user cannot be empty");
        }

        if self.remote.command.trim().is_empty() {
            anyhow::bail!("remote command cannot be empty");
        }

        // The command is wrapped in single quotes on the shell line
        if self.remote.command.contains('\'') {
            anyhow::bail!("remote command must not contain single quotes");
        }

        if self.ansible.config_path.trim().is_empty() {
            anyhow::bail!("ansible config_path cannot be empty");
        }

        Ok(())
    }

    pub fn save_default_settings(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Settings file already exists: {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        fs::write(path, Self::default_settings_content())
            .with_context(|| format!("Failed to write default settings to: {}", path.display()))?;

        Ok(())
    }
}

pub fn expand_tilde(path: &str) -> Result<String> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(rest).to_string_lossy().into_owned())
    } else {
        Ok(path.to_string())
    }
}
