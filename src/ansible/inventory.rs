// ABOUTME: Extracts the target machine address from a line-oriented host inventory file
// ABOUTME: The address is a single line picked by index; short or blank inventories are rejected

use crate::error::UpdateError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn read_machine_address(path: &Path, address_line: usize) -> Result<String> {
    if !path.exists() {
        return Err(UpdateError::HostfileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read host inventory: {}", path.display()))?;

    let address = machine_address_from_content(&content, address_line).map_err(|found| {
        UpdateError::MalformedHostfile {
            path: path.to_path_buf(),
            line: address_line,
            found,
        }
    })?;

    tracing::debug!("Machine address from {}: {}", path.display(), address);
    Ok(address)
}

/// Returns the trimmed line at `index`, or the number of lines in the
/// content when that line is missing or blank.
fn machine_address_from_content(content: &str, index: usize) -> Result<String, usize> {
    let lines: Vec<&str> = content.lines().collect();

    match lines.get(index).map(|line| line.trim()) {
        Some(address) if !address.is_empty() => Ok(address.to_string()),
        _ => Err(lines.len()),
    }
}
