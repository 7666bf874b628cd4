// ABOUTME: End-to-end checks of the remote-update binary: exit codes, guidance text and dry-run output
// ABOUTME: Each test runs in its own temporary directory with explicit settings, never reaching ssh

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::{TempDir, tempdir};

const SETTINGS: &str = r#"
[ssh]
binary = "ssh"
user = "ec2-user"

[remote]
command = "sudo yum update -y"

[ansible]
config_path = "./ansible.cfg"
"#;

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("settings.toml"), SETTINGS).unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_remote-update"))
        .current_dir(dir)
        .arg("--settings")
        .arg(dir.join("settings.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_missing_config_exits_1_with_guidance() {
    let dir = workspace();

    let output = run(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("configuration file not found"));
    assert!(err.contains("ssh -i <private_key_file> ec2-user@<machine_address> -t 'sudo yum update -y'"));
}

#[test]
fn test_missing_hostfile_key_exits_2() {
    let dir = workspace();
    fs::write(
        dir.path().join("ansible.cfg"),
        "[defaults]\nprivate_key_file = key.pem\n",
    )
    .unwrap();

    let output = run(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no 'hostfile' key"));
}

#[test]
fn test_missing_inventory_exits_3() {
    let dir = workspace();
    fs::write(
        dir.path().join("ansible.cfg"),
        "[defaults]\nhostfile = hosts\nprivate_key_file = key.pem\n",
    )
    .unwrap();

    let output = run(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("host inventory file not found"));
    assert!(err.contains("To skip the configuration"));
}

#[test]
fn test_short_inventory_exits_4() {
    let dir = workspace();
    fs::write(
        dir.path().join("ansible.cfg"),
        "[defaults]\nhostfile = hosts\nprivate_key_file = key.pem\n",
    )
    .unwrap();
    fs::write(dir.path().join("hosts"), "[webservers]\n").unwrap();

    let output = run(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_dry_run_prints_command() {
    let dir = workspace();
    let hosts = dir.path().join("hosts");
    fs::write(&hosts, "[webservers]\n10.0.0.5\n").unwrap();
    fs::write(
        dir.path().join("ansible.cfg"),
        format!(
            "[defaults]\nhostfile={}\nprivate_key_file=/tmp/key.pem\n",
            hosts.display()
        ),
    )
    .unwrap();

    let output = run(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ssh -i /tmp/key.pem ec2-user@10.0.0.5 -t 'sudo yum update -y'\n"
    );
}

#[test]
fn test_explicit_config_path() {
    let dir = workspace();
    let nested = dir.path().join("ansible");
    fs::create_dir(&nested).unwrap();
    fs::write(
        nested.join("ansible.cfg"),
        "[defaults]\nhostfile = hosts\nprivate_key_file = /keys/lab.pem\n",
    )
    .unwrap();
    fs::write(nested.join("hosts"), "[webservers]\nweb1.internal\n").unwrap();

    let output = run(dir.path(), &["--dry-run", "--config", "ansible/ansible.cfg"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ssh -i /keys/lab.pem ec2-user@web1.internal -t 'sudo yum update -y'\n"
    );
}

#[test]
fn test_invalid_settings_exit_1() {
    let dir = workspace();
    fs::write(dir.path().join("settings.toml"), "[ssh]\nbinary = 3\n").unwrap();

    let output = run(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse settings"));
}

#[test]
fn test_init_settings_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf").join("config.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_remote-update"))
        .arg("--init-settings")
        .arg("--settings")
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(fs::read_to_string(&path).unwrap().contains("[ssh]"));
}
