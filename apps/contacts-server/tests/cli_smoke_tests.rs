//! CLI smoke tests for the contacts-server binary
//!
//! These tests verify that the CLI commands work correctly, including
//! configuration validation, help output, and the contact tooling commands
//! against a real on-disk SQLite database.

use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run the contacts-server binary with given arguments
fn run_contacts_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_contacts-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute contacts-server")
}

/// Write a config pointing home dir and database into `dir`.
fn write_config(dir: &Path) -> std::path::PathBuf {
    let home_dir = dir.join("home");
    let config_path = dir.join("config.yaml");

    let config_content = format!(
        r#"
server:
  home_dir: "{}"
  host: "127.0.0.1"
  port: 8080

database:
  url: "sqlite://contacts.db"

logging:
  default:
    console_level: error
    file: ""
    file_level: "off"
"#,
        home_dir.to_string_lossy().replace('\\', "/")
    );

    std::fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path
}

#[test]
fn test_cli_help_command() {
    let output = run_contacts_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("contacts-server"),
        "Should contain binary name"
    );
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(
        stdout.contains("upsert"),
        "Should contain 'upsert' subcommand"
    );
    assert!(stdout.contains("read"), "Should contain 'read' subcommand");
    assert!(
        stdout.contains("delete"),
        "Should contain 'delete' subcommand"
    );
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_contacts_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("contacts-server"),
        "Should contain binary name"
    );
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_contacts_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid") || stderr.contains("unexpected"),
        "Should contain error message about invalid command"
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_contacts_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Config file not found"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");

    // Write invalid YAML
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_contacts_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path());

    let output = run_contacts_server(&["--config", config_path.to_str().unwrap(), "check"]);

    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
        eprintln!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
    }

    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Configuration check passed"),
        "Should indicate successful validation: {}",
        stdout
    );
}

#[test]
fn test_cli_upsert_read_delete_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path());
    let config = config_path.to_str().unwrap();

    // create
    let output = run_contacts_server(&[
        "--config",
        config,
        "upsert",
        "Alice Johnson",
        "+61412345678",
        "alice@example.com",
    ]);
    assert!(
        output.status.success(),
        "upsert should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Contact Alice Johnson created successfully!"));

    // upsert again with the same phone number updates instead
    let output = run_contacts_server(&[
        "--config",
        config,
        "upsert",
        "Alice Smith",
        "+61412345678",
        "alice.smith@example.com",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Contact Alice Smith updated successfully!"));

    // read by phone number
    let output = run_contacts_server(&["--config", config, "read", "+61412345678"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Contact Details:"));
    assert!(stdout.contains("Alice Smith"));
    assert!(stdout.contains("alice.smith@example.com"));

    // delete by phone number
    let output = run_contacts_server(&["--config", config, "delete", "+61412345678"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("deleted successfully!"));

    // a second read now fails with the not-found message
    let output = run_contacts_server(&["--config", config, "read", "+61412345678"]);
    assert!(!output.status.success(), "read after delete should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Contact with identifier '+61412345678' not found."),
        "Should print the not-found line: {}",
        stderr
    );
}

#[test]
fn test_cli_read_unknown_identifier() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path());

    let output = run_contacts_server(&[
        "--config",
        config_path.to_str().unwrap(),
        "read",
        "+64210000000",
    ]);

    assert!(!output.status.success(), "Unknown identifier should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_cli_seed_and_read_by_id() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path());
    let config = config_path.to_str().unwrap();

    let output = run_contacts_server(&["--config", config, "seed"]);
    assert!(
        output.status.success(),
        "seed should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 contacts seeded successfully!"));

    // read one of the seeded contacts by phone, then again by its id
    let output = run_contacts_server(&["--config", config, "read", "+64219876543"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bob Williams"));

    let id_line = stdout
        .lines()
        .find(|l| l.trim_start().starts_with("ID:"))
        .expect("read output should contain the id");
    let id = id_line.split_whitespace().last().unwrap();

    let output = run_contacts_server(&["--config", config, "read", id]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Bob Williams"));
}

#[test]
fn test_cli_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path());

    let output = run_contacts_server(&[
        "--config",
        config_path.to_str().unwrap(),
        "--print-config",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("server:"));
    assert!(stdout.contains("port: 8080"));
}
