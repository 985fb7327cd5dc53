//! CLI Integration Tests
//!
//! These tests run the `fluxview` binary against a throwaway database and
//! config file in a temporary directory.
//!
//! ```
//! cargo test --package fluxview-cli --test cli_integration
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const READINGS_CSV: &str = "timestamp,flux,temperature,pressure,humidity\n\
2022-01-12 09:00:00.000,1.0,20.0,1010.0,40.0\n\
2022-01-12 09:00:01.000,2.0,20.5,1010.5,41.0\n\
2022-01-12 09:00:02.000,3.0,21.0,1011.0,42.0\n\
2022-01-12 09:00:03.000,4.0,21.5,1011.5,43.0\n\
2022-01-14 12:00:00.000,5.0,22.0,1012.0,44.0\n\
2022-01-17 08:30:00.000,6.0,22.5,1012.5,45.0\n";

/// Isolated database, config, and log locations.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Sandbox with the sample readings already imported.
    fn with_readings() -> Self {
        let sandbox = Self::new();
        let csv = sandbox.write_file("readings.csv", READINGS_CSV);
        let output = sandbox.run(&["import", csv.to_str().unwrap()]);
        assert_success(&output);
        sandbox
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_fluxview"))
            .args(args)
            .env("FLUXVIEW_DB", self.path("readings.db"))
            .env("FLUXVIEW_CONFIG", self.path("config.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run fluxview binary")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

fn csv_rows(output: &Output) -> Vec<String> {
    stdout(output).lines().skip(1).map(str::to_string).collect()
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn test_help_command() {
    let output = Sandbox::new().run(&["--help"]);
    assert_success(&output);

    let help = stdout(&output);
    for command in ["archive", "dates", "day", "stats", "import", "export", "logs", "config"] {
        assert!(help.contains(command), "help should list {command}");
    }
}

#[test]
fn test_version_command() {
    let output = Sandbox::new().run(&["--version"]);
    assert_success(&output);
    assert!(stdout(&output).contains("fluxview"));
}

// =============================================================================
// Import and archive
// =============================================================================

#[test]
fn test_import_reports_counts() {
    let sandbox = Sandbox::new();
    let csv = sandbox.write_file("readings.csv", READINGS_CSV);

    let output = sandbox.run(&["import", csv.to_str().unwrap()]);
    assert_success(&output);
    let report = stdout(&output);
    assert!(report.contains("Total records: 6"), "{report}");
    assert!(report.contains("Imported: 6"), "{report}");
}

#[test]
fn test_archive_csv_is_decimated() {
    let sandbox = Sandbox::with_readings();

    let output = sandbox.run(&[
        "archive", "--from", "2022-01-12", "--points", "2", "--format", "csv",
    ]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "timestamp,flux\n2022-01-12 09:00:00.000,1\n2022-01-12 09:00:02.000,3\n"
    );
}

#[test]
fn test_archive_channel_and_range() {
    let sandbox = Sandbox::with_readings();

    let output = sandbox.run(&[
        "archive",
        "--from",
        "2022-01-12",
        "--to",
        "2022-01-17",
        "--channel",
        "humidity",
        "--format",
        "csv",
    ]);
    assert_success(&output);
    let rows = csv_rows(&output);
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[5], "2022-01-17 08:30:00.000,45");
}

#[test]
fn test_archive_json() {
    let sandbox = Sandbox::with_readings();

    let output = sandbox.run(&["archive", "--from", "2022-01-14", "--format", "json"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["channel"], "flux");
    assert_eq!(value["points"][0]["value"], 5.0);
}

#[test]
fn test_archive_empty_window() {
    let sandbox = Sandbox::with_readings();

    let output = sandbox.run(&["archive", "--from", "2022-01-13"]);
    assert_success(&output);
    assert!(stdout(&output).contains("No readings"));
}

#[test]
fn test_archive_inverted_range_fails() {
    let sandbox = Sandbox::with_readings();

    let output = sandbox.run(&["archive", "--from", "2022-01-17", "--to", "2022-01-12"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid date range"));
}

// =============================================================================
// Browsing
// =============================================================================

#[test]
fn test_dates_lists_days_with_data() {
    let sandbox = Sandbox::with_readings();

    let output = sandbox.run(&[
        "dates", "--from", "2022-01-01", "--to", "2022-01-31", "--format", "csv",
    ]);
    assert_success(&output);
    assert_eq!(csv_rows(&output), vec!["2022-01-12", "2022-01-14", "2022-01-17"]);
}

#[test]
fn test_day_navigation() {
    let sandbox = Sandbox::with_readings();

    let next = sandbox.run(&["day", "2022-01-12", "--next", "--format", "csv"]);
    assert_success(&next);
    assert_eq!(csv_rows(&next), vec!["2022-01-14 12:00:00.000,5,22,1012,44"]);

    let prev = sandbox.run(&["day", "2022-01-14", "--prev", "--format", "csv"]);
    assert_success(&prev);
    assert_eq!(csv_rows(&prev).len(), 4);
}

#[test]
fn test_day_navigation_past_the_end_is_not_an_error() {
    let sandbox = Sandbox::with_readings();

    let output = sandbox.run(&["day", "2022-01-17", "--next"]);
    assert_success(&output);
    assert!(stderr(&output).contains("No readings after 2022-01-17"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_stats() {
    let sandbox = Sandbox::with_readings();

    let output = sandbox.run(&[
        "stats", "--from", "2022-01-12", "--to", "2022-01-14", "--format", "json",
    ]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["total"], 6);
    assert_eq!(value["window"]["readings"], 5);
    assert_eq!(value["window"]["days"], 2);
}

// =============================================================================
// Export and logs
// =============================================================================

#[test]
fn test_export_to_file_and_reimport() {
    let sandbox = Sandbox::with_readings();
    let exported = sandbox.path("export.json");

    let output = sandbox.run(&[
        "export",
        "--from",
        "2022-01-12",
        "--to",
        "2022-01-14",
        "--format",
        "json",
        "--output",
        exported.to_str().unwrap(),
    ]);
    assert_success(&output);

    let readings: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&exported).unwrap()).unwrap();
    assert_eq!(readings.len(), 5);

    let fresh = Sandbox::new();
    let output = fresh.run(&["import", exported.to_str().unwrap()]);
    assert_success(&output);
    assert!(stdout(&output).contains("Imported: 5"));
}

#[test]
fn test_logs_for_day() {
    let sandbox = Sandbox::new();
    sandbox.write_file("logs/2022-01-12.log", "09:00 pump started\n\n09:05 valve open\n");
    let dir = sandbox.path("logs");
    let dir = dir.to_str().unwrap();

    let output = sandbox.run(&["logs", "2022-01-12", "--dir", dir]);
    assert_success(&output);
    let text = stdout(&output);
    assert!(text.contains("2 entries"), "{text}");
    assert!(text.contains("09:05 valve open"));

    let output = sandbox.run(&["logs", "2022-01-13", "--dir", dir]);
    assert_success(&output);
    assert!(stdout(&output).contains("No log entries"));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_set_changes_default_channel() {
    let sandbox = Sandbox::with_readings();

    assert_success(&sandbox.run(&["config", "set", "channel", "pressure"]));
    assert!(Path::new(&sandbox.path("config.toml")).exists());

    let output = sandbox.run(&["archive", "--from", "2022-01-14", "--format", "csv"]);
    assert_success(&output);
    assert_eq!(stdout(&output).lines().next(), Some("timestamp,pressure"));
}

#[test]
fn test_config_path_honors_env() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["config", "path"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output).trim(),
        sandbox.path("config.toml").display().to_string()
    );
}
