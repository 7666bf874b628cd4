// ABOUTME: Command-line interface definition for remote-update
// ABOUTME: Selects input paths and run mode; everything else comes from the settings file

use crate::settings::Settings;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "remote-update",
    version,
    about = "Update the packages of an Ansible-managed machine over SSH",
    long_about = "Reads the private key and inventory paths from an Ansible configuration \
                  file, takes the machine address from the inventory, and runs \
                  `sudo yum update -y` on it through the ssh client after confirmation."
)]
pub struct Cli {
    /// Ansible configuration file [default: ./ansible.cfg, or [ansible] config_path]
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Settings file [default: <config dir>/remote-update/config.toml]
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Run without waiting for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Print the command instead of running it
    #[arg(short = 'n', long, conflicts_with = "yes")]
    pub dry_run: bool,

    /// Write a default settings file and exit
    #[arg(long, conflicts_with_all = ["config", "yes", "dry_run"])]
    pub init_settings: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn config_path(&self, settings: &Settings) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(&settings.ansible.config_path))
    }
}
