//! Integration tests for the `genexis` CLI binary.
//!
//! Argument parsing, help output, shell completions and error handling run
//! without a router; end-to-end commands run against a wiremock router.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `genexis` binary with env isolation.
///
/// Clears all `GENEXIS_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn genexis_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("genexis");
    cmd.env("HOME", "/tmp/genexis-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/genexis-cli-test-nonexistent")
        .env_remove("GENEXIS_PROFILE")
        .env_remove("GENEXIS_HOST")
        .env_remove("GENEXIS_USERNAME")
        .env_remove("GENEXIS_PASSWORD")
        .env_remove("GENEXIS_OUTPUT")
        .env_remove("GENEXIS_INSECURE")
        .env_remove("GENEXIS_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Mock `rpc` answering with the given `result` member.
async fn mount_rpc(server: &MockServer, rpc: &str, result: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": result
        })))
        .mount(server)
        .await;
}

/// Router that accepts `admin` / `secret` and counts logouts.
async fn router() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "session.login",
            "params": { "username": "admin", "password": "secret" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "result": 0, "sessionid": "tok-1" }
        })))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "session.login" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "result": -1 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "session.destroy",
            "params": { "sessionid": "tok-1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": {} })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn against(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = genexis_cmd();
    cmd.args(["--host", &server.uri(), "--password", "secret"]);
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = genexis_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    genexis_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Genexis")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("reservations"))
            .and(predicate::str::contains("leases"))
            .and(predicate::str::contains("reboot")),
    );
}

#[test]
fn test_help_hides_password_value() {
    genexis_cmd()
        .env("GENEXIS_PASSWORD", "do-not-print")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("do-not-print").not());
}

#[test]
fn test_version_flag() {
    genexis_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("genexis"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    genexis_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    genexis_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = genexis_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_status_without_router() {
    genexis_cmd()
        .arg("status")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No router configured"));
}

#[test]
fn test_host_without_password() {
    genexis_cmd()
        .args(["--host", "192.0.2.1", "firmware"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No password"));
}

#[test]
fn test_unknown_profile() {
    genexis_cmd()
        .args(["--profile", "cabin", "status"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("cabin"));
}

#[test]
fn test_invalid_output_format() {
    let output = genexis_cmd()
        .args(["--output", "yaml", "status"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid value") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_reboot_requires_yes_without_terminal() {
    genexis_cmd()
        .args(["--host", "192.0.2.1", "--password", "pw", "reboot"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires confirmation"));
}

// ── End-to-end against a mock router ────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_firmware_json() {
    let server = router().await;
    mount_rpc(
        &server,
        "genui.info",
        json!({
            "deviceinfo": { "hardware_revision": "1.2", "product_name": "Platinum-4410" },
            "sysinfo": { "firmware_revision": "P4410-V4.1.0" }
        }),
    )
    .await;

    let output = against(&server)
        .args(["-o", "json", "firmware"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["model"], "Platinum-4410");
    assert_eq!(parsed["firmware_version"], "P4410-V4.1.0");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "session.login" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "result": -1 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "genui.info" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    genexis_cmd()
        .args(["--host", &server.uri(), "--password", "wrong", "firmware"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Authentication failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reservations_plain() {
    let server = router().await;
    mount_rpc(
        &server,
        "dhcp.static.get",
        json!({
            "lan": { "staticaddress": [
                { "macaddr": "AA:BB:CC:00:00:01", "ipaddr": "192.168.1.10", "enable": "yes" },
                { "macaddr": "aa:bb:cc:00:00:02", "ipaddr": "192.168.1.11", "enable": "no" }
            ]}
        }),
    )
    .await;

    against(&server)
        .args(["-o", "plain", "reservations"])
        .assert()
        .success()
        .stdout("aa:bb:cc:00:00:01 192.168.1.10\naa:bb:cc:00:00:02 192.168.1.11\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_leases_table() {
    let server = router().await;
    mount_rpc(
        &server,
        "clients.get",
        json!({
            "clients": [
                { "macaddr": "aa:bb:cc:00:00:01", "ipaddr": "192.168.1.20",
                  "hostname": "laptop", "expiry": "23h 59m" }
            ]
        }),
    )
    .await;

    against(&server).arg("leases").assert().success().stdout(
        predicate::str::contains("Hostname")
            .and(predicate::str::contains("laptop"))
            .and(predicate::str::contains("23h 59m")),
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reboot_with_yes() {
    let server = router().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "reload.set",
            "params": { "reboot": 0, "sessionid": "tok-1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "result": 0, "message": "ok" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    against(&server)
        .args(["--yes", "reboot"])
        .assert()
        .success()
        .stderr(predicate::str::contains("rebooting"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_passes_params() {
    let server = router().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "wireless.get",
            "params": { "sessionid": "tok-1", "band": "5GHz" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "wireless": { "interfaces": [] } }
        })))
        .mount(&server)
        .await;

    against(&server)
        .args(["-o", "json-compact", "query", "wireless.get", "--params", r#"{"band":"5GHz"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""interfaces":[]"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_protocol_error_still_logs_out() {
    let server = router().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "genui.info" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    against(&server)
        .arg("firmware")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Unexpected router response"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_and_defaults_from_config_file() {
    let server = router().await;
    mount_rpc(
        &server,
        "genui.info",
        json!({
            "deviceinfo": { "hardware_revision": "1.2", "product_name": "Platinum-4410" },
            "sysinfo": { "firmware_revision": "P4410-V4.1.0" }
        }),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("genexis");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "default_profile = \"home\"\n\n\
             [defaults]\noutput = \"plain\"\n\n\
             [profiles.home]\nhost = \"{}\"\npassword = \"secret\"\n",
            server.uri()
        ),
    )
    .unwrap();

    genexis_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .arg("firmware")
        .assert()
        .success()
        .stdout("P4410-V4.1.0\n");
}
