/// End-to-end tests for the CLI
///
/// These run the built binary with `assert_cmd` against config files written
/// to temporary directories. None of them leave a server running: every case
/// exits during argument parsing or startup.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.yml");
    fs::write(&path, content).unwrap();
    path
}

fn config_with_port(port: u16) -> String {
    format!(
        r#"
iq:
  url: http://127.0.0.1:9
  user: admin
  password: admin123
webhook:
  port: {}
confluence:
  url: http://127.0.0.1:9
  user: bot
  password: secret
  space_key: DEV
"#,
        port
    )
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("iq-confluence-bridge")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--configfile"))
            .stdout(predicate::str::contains("--verbose"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("iq-confluence-bridge")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("iq-confluence-bridge")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: --configfile without a value
    #[test]
    fn test_exit_code_configfile_missing_value() {
        cargo_bin_cmd!("iq-confluence-bridge")
            .arg("--configfile")
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - config file does not exist
    #[test]
    fn test_exit_code_missing_config_file() {
        cargo_bin_cmd!("iq-confluence-bridge")
            .args(["--configfile", "/nonexistent/config.yml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    /// Exit code 3: Application error - default config.yml is absent
    #[test]
    fn test_exit_code_default_config_absent() {
        let temp_dir = TempDir::new().unwrap();
        cargo_bin_cmd!("iq-confluence-bridge")
            .current_dir(temp_dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("config.yml"));
    }

    /// Exit code 3: Application error - config file is not valid YAML
    #[test]
    fn test_exit_code_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(temp_dir.path(), "iq: [unclosed");
        cargo_bin_cmd!("iq-confluence-bridge")
            .arg("--configfile")
            .arg(&path)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    /// Exit code 3: Application error - required field left empty
    #[test]
    fn test_exit_code_invalid_config_value() {
        let temp_dir = TempDir::new().unwrap();
        let content = config_with_port(3001).replace("space_key: DEV", "space_key: \"\"");
        let path = write_config(temp_dir.path(), &content);
        cargo_bin_cmd!("iq-confluence-bridge")
            .arg("--configfile")
            .arg(&path)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("confluence.space_key"));
    }

    /// Exit code 3: Application error - webhook port already taken
    #[test]
    fn test_exit_code_port_in_use() {
        let occupied = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let port = occupied.local_addr().unwrap().port();

        let temp_dir = TempDir::new().unwrap();
        let path = write_config(temp_dir.path(), &config_with_port(port));
        cargo_bin_cmd!("iq-confluence-bridge")
            .arg("--configfile")
            .arg(&path)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to bind webhook listener"));

        drop(occupied);
    }
}
