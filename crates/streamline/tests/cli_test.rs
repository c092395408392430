//! Integration tests for the `streamline` CLI binary.
//!
//! Every test runs against its own temporary directory: the data file,
//! config file and HOME/XDG directories all point inside it, so the
//! user's real data is never touched.
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn data_file(&self) -> PathBuf {
        self.dir.path().join("clients.json")
    }

    fn config_file(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Build a [`Command`] for the `streamline` binary with env isolation.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("streamline");
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"))
            .env("XDG_DATA_HOME", self.dir.path().join("xdg-data"))
            .env("STREAMLINE_DATA_FILE", self.data_file())
            .env("STREAMLINE_CONFIG", self.config_file())
            .env_remove("STREAMLINE_OUTPUT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    fn seeded() -> Self {
        let sandbox = Self::new();
        sandbox.cmd().arg("seed").assert().success();
        sandbox
    }

    /// Run with `--output json` and parse stdout.
    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd().args(["--output", "json"]).args(args).output().unwrap();
        assert!(
            output.status.success(),
            "command {args:?} failed:\n{}",
            combined_output(&output)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = Sandbox::new().cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    Sandbox::new().cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("IPTV")
            .and(predicate::str::contains("clients"))
            .and(predicate::str::contains("dashboard"))
            .and(predicate::str::contains("tools")),
    );
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("streamline"));
}

#[test]
fn test_completions_zsh() {
    Sandbox::new()
        .cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_subcommand() {
    let output = Sandbox::new().cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("foobar"));
}

#[test]
fn test_invalid_output_format() {
    let output = Sandbox::new()
        .cmd()
        .args(["--output", "invalid", "clients", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("possible values"));
}

#[test]
fn test_clients_subcommands_exist() {
    Sandbox::new()
        .cmd()
        .args(["clients", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("edit"))
                .and(predicate::str::contains("remove"))
                .and(predicate::str::contains("refresh")),
        );
}

// ── Seed ────────────────────────────────────────────────────────────

#[test]
fn test_empty_data_file_lists_nothing() {
    let sandbox = Sandbox::new();
    let clients = sandbox.json(&["clients", "list"]);
    assert_eq!(clients.as_array().unwrap().len(), 0);
}

#[test]
fn test_seed_writes_demo_clients() {
    let sandbox = Sandbox::seeded();
    let clients = sandbox.json(&["clients", "list"]);
    let names: Vec<&str> = clients
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["fullName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["John Smith", "Maria Garcia", "Robert Wilson"]);
    assert_eq!(clients[0]["status"], "Expiring Soon");
    assert_eq!(clients[0]["macAddress"], "00:1A:2B:3C:4D:5E");
}

#[test]
fn test_seed_refuses_to_overwrite() {
    let sandbox = Sandbox::seeded();
    sandbox
        .cmd()
        .arg("seed")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("--force"));
    sandbox.cmd().args(["seed", "--force"]).assert().success();
}

// ── Clients ─────────────────────────────────────────────────────────

#[test]
fn test_add_computes_expiry_with_month_rollover() {
    let sandbox = Sandbox::new();
    let client = sandbox.json(&[
        "clients",
        "add",
        "--name",
        "Ana Lopez",
        "--email",
        "ana@example.com",
        "--phone",
        "+34 611 111 111",
        "--package",
        "vip",
        "--start",
        "2024-01-31",
        "--duration",
        "1",
        "--price",
        "49.99",
    ]);
    assert_eq!(client["expiryDate"], "2024-03-02");
    assert_eq!(client["duration"], 1);
    assert_eq!(client["packageType"], "VIP");
    assert_eq!(client["iptvApp"], "Smart IPTV");
    assert_eq!(client["status"], "Expired");
    assert_eq!(client["price"], "49.99");

    let listed = sandbox.json(&["clients", "list"]);
    assert_eq!(listed[0]["id"], client["id"]);
}

#[test]
fn test_add_reports_validation_errors() {
    let sandbox = Sandbox::seeded();
    sandbox
        .cmd()
        .args([
            "clients",
            "add",
            "--name",
            "Dup",
            "--email",
            "MARIA@example.com",
            "--phone",
            "+1 555",
            "--app",
            "IBO Player",
        ])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("Email already exists")
                .and(predicate::str::contains("MAC required"))
                .and(predicate::str::contains("Key required")),
        );

    sandbox
        .cmd()
        .args([
            "clients", "add", "--name", "X", "--email", "not-an-email", "--phone", "1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid email format"));

    // Nothing was saved.
    assert_eq!(sandbox.json(&["clients", "list"]).as_array().unwrap().len(), 3);
}

#[test]
fn test_get_by_email_and_unknown() {
    let sandbox = Sandbox::seeded();
    let client = sandbox.json(&["clients", "get", "robert@example.com"]);
    assert_eq!(client["fullName"], "Robert Wilson");

    sandbox
        .cmd()
        .args(["clients", "get", "nobody@example.com"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("clients list"));
}

#[test]
fn test_edit_preserves_id_and_position() {
    let sandbox = Sandbox::seeded();
    let client = sandbox.json(&[
        "clients",
        "edit",
        "2",
        "--start",
        "2024-01-15",
        "--duration",
        "3",
    ]);
    assert_eq!(client["id"], "2");
    assert_eq!(client["expiryDate"], "2024-04-15");
    assert_eq!(client["fullName"], "Maria Garcia");
    // Seeded as Active; the new expiry lies in the past.
    assert_eq!(client["status"], "Expired");

    let listed = sandbox.json(&["clients", "list"]);
    assert_eq!(listed[1]["id"], "2");
}

#[test]
fn test_price_presets_come_from_config() {
    let sandbox = Sandbox::seeded();
    std::fs::write(
        sandbox.config_file(),
        "[business]\nprice_presets = [\"19.99\", \"59.99\"]\n",
    )
    .unwrap();

    let client = sandbox.json(&[
        "clients",
        "add",
        "--name",
        "Ana Lopez",
        "--email",
        "ana@example.com",
        "--phone",
        "+34 611 111 111",
        "--preset",
        "2",
    ]);
    assert_eq!(client["price"], "59.99");

    let edited = sandbox.json(&["clients", "edit", "2", "--preset", "1"]);
    assert_eq!(edited["price"], "19.99");

    sandbox
        .cmd()
        .args(["clients", "edit", "2", "--preset", "3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("preset"));

    sandbox
        .cmd()
        .args(["clients", "edit", "2", "--preset", "1", "--price", "5"])
        .assert()
        .code(2);
}

#[test]
fn test_edit_without_changes_is_usage_error() {
    let sandbox = Sandbox::seeded();
    sandbox.cmd().args(["clients", "edit", "2"]).assert().code(2);
}

#[test]
fn test_remove_requires_confirmation() {
    let sandbox = Sandbox::seeded();
    sandbox
        .cmd()
        .args(["clients", "remove", "3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));

    sandbox.cmd().args(["-y", "clients", "remove", "3"]).assert().success();
    sandbox.cmd().args(["clients", "get", "3"]).assert().code(4);
}

#[test]
fn test_list_filters_and_plain_output() {
    let sandbox = Sandbox::seeded();
    sandbox
        .cmd()
        .args(["--output", "plain", "clients", "list", "--status", "expired"])
        .assert()
        .success()
        .stdout("3\n");

    sandbox
        .cmd()
        .args(["-o", "plain", "clients", "list", "--search", "MARIA"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_refresh_on_current_data_changes_nothing() {
    let sandbox = Sandbox::seeded();
    sandbox
        .cmd()
        .args(["clients", "refresh"])
        .assert()
        .success()
        .stderr(predicate::str::contains("0 client status(es) updated"));
}

// ── Dashboard ───────────────────────────────────────────────────────

#[test]
fn test_dashboard_summary() {
    let sandbox = Sandbox::seeded();
    let summary = sandbox.json(&["dashboard"]);
    assert_eq!(summary["revenue"]["totalRevenue"], "89.98");
    assert_eq!(summary["revenue"]["activeCount"], 2);
    assert_eq!(summary["clientCount"], 3);
    assert_eq!(summary["packages"]["vip"], 1);
    assert_eq!(summary["weekly"].as_array().unwrap().len(), 7);
    assert_eq!(summary["hourly"].as_array().unwrap().len(), 8);
    assert_eq!(summary["expiring"][1]["days"], 7);
    assert_eq!(summary["expiring"][1]["count"], 1);
}

#[test]
fn test_dashboard_with_unbounded_window() {
    let sandbox = Sandbox::seeded();
    std::fs::write(
        sandbox.config_file(),
        "[business]\nexpiring_windows = [7, 4294967295]\n",
    )
    .unwrap();

    let summary = sandbox.json(&["dashboard"]);
    assert_eq!(summary["expiring"][0]["count"], 1);
    assert_eq!(summary["expiring"][1]["count"], 2);
}

#[test]
fn test_dashboard_table_views() {
    let sandbox = Sandbox::seeded();
    sandbox
        .cmd()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("€89.98")
                .and(predicate::str::contains("last 7 days")),
        );
    sandbox
        .cmd()
        .args(["dashboard", "--view", "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("22:00"));
}

// ── Tools ───────────────────────────────────────────────────────────

#[test]
fn test_tools_xtream() {
    Sandbox::new()
        .cmd()
        .args([
            "-o",
            "plain",
            "tools",
            "xtream",
            "http://line.example.tv:8080/get.php?username=alice&password=s3cret",
        ])
        .assert()
        .success()
        .stdout("http://line.example.tv:8080\nalice\ns3cret\n");
}

#[test]
fn test_tools_xtream_invalid_link() {
    Sandbox::new()
        .cmd()
        .args(["tools", "xtream", "not a link"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("M3U Link format"));
}

#[test]
fn test_tools_message_placeholder() {
    Sandbox::new()
        .cmd()
        .args(["tools", "message"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Hallo! Hier ist dein IPTV-Link:")
                .and(predicate::str::contains("[Link hier einfügen]")),
        );
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_and_show() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["-y", "config", "init"]).assert().success();
    assert!(sandbox.config_file().exists());

    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[business]")
                .and(predicate::str::contains("currency"))
                .and(predicate::str::contains("expiring_windows")),
        );
}

#[test]
fn test_config_output_default_applies() {
    let sandbox = Sandbox::seeded();
    std::fs::write(sandbox.config_file(), "[defaults]\noutput = \"plain\"\n").unwrap();
    sandbox
        .cmd()
        .args(["clients", "list", "--package", "lion"])
        .assert()
        .success()
        .stdout("3\n");
}
