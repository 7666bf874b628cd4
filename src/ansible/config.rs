// ABOUTME: Reads the Ansible configuration file and extracts the private key and inventory paths
// ABOUTME: Missing files and keys become designed errors; a relative hostfile resolves against the config's directory

use crate::ansible::ini::IniFile;
use crate::error::UpdateError;
use crate::settings::expand_tilde;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULTS_SECTION: &str = "defaults";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsibleConfig {
    /// Passed to the remote-login client untouched.
    pub private_key_file: String,
    pub hostfile: PathBuf,
}

pub fn read_ansible_config(path: &Path) -> Result<AnsibleConfig> {
    if !path.exists() {
        return Err(UpdateError::ConfigNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    let config = parse_ansible_config(&content, path)?;
    tracing::debug!(
        "Ansible config {}: hostfile={}, private_key_file={}",
        path.display(),
        config.hostfile.display(),
        config.private_key_file
    );

    Ok(config)
}

fn parse_ansible_config(content: &str, path: &Path) -> Result<AnsibleConfig> {
    let ini = IniFile::parse(content)
        .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

    let lookup = |key: &str| {
        ini.get(DEFAULTS_SECTION, key)
            .with_context(|| format!("Failed to read '{key}' from {}", path.display()))
    };

    let hostfile = lookup("hostfile")?.ok_or_else(|| UpdateError::MissingHostfileKey {
        path: path.to_path_buf(),
        section: DEFAULTS_SECTION.to_string(),
    })?;

    let private_key_file =
        lookup("private_key_file")?.ok_or_else(|| UpdateError::MissingPrivateKeyKey {
            path: path.to_path_buf(),
            section: DEFAULTS_SECTION.to_string(),
        })?;

    Ok(AnsibleConfig {
        private_key_file,
        hostfile: resolve_hostfile(&hostfile, path)?,
    })
}

fn resolve_hostfile(hostfile: &str, config_path: &Path) -> Result<PathBuf> {
    let hostfile = PathBuf::from(expand_tilde(hostfile)?);
    if hostfile.is_absolute() {
        return Ok(hostfile);
    }

    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.join(hostfile)),
        _ => Ok(hostfile),
    }
}
