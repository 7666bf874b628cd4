// ABOUTME: Ansible input files: the ansible.cfg configuration and the host inventory it points to
// ABOUTME: Provides the INI parser plus the two readers the update run starts from

pub mod config;
pub mod ini;
pub mod inventory;

pub use config::read_ansible_config;
pub use inventory::read_machine_address;
