//! Integration tests for the `seek` CLI binary.
//!
//! Route commands run fully offline. API commands run against a local
//! wiremock server with the token kept in a temp file, so tests never
//! touch the user's real configuration or keyring.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `seek` binary with env isolation.
///
/// Clears all `SEEK_*` env vars and points config/data directories at
/// `home` so the user's real configuration is never read.
fn seek_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("seek");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SEEK_API_URL")
        .env_remove("SEEK_TOKEN_STORE")
        .env_remove("SEEK_TOKEN_FILE")
        .env_remove("SEEK_OUTPUT")
        .env_remove("SEEK_TIMEOUT")
        .env_remove("SEEK_EMAIL")
        .env_remove("SEEK_PASSWORD")
        .env_remove("SEEK_GOOGLE_TOKEN")
        .env_remove("SEEK_GOOGLE_CLIENT_ID");
    cmd
}

/// `seek` pointed at `server`, keeping the token in `<home>/token`.
fn api_cmd(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = seek_cmd(home);
    cmd.arg("--api-url")
        .arg(server.uri())
        .arg("--token-file")
        .arg(home.join("token"));
    cmd
}

/// Run a command off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_owned()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = seek_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("routes")
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("weeks"))
            .and(predicate::str::contains("assignments")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("seek"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    let output = seek_cmd(home.path())
        .args(["--output", "invalid", "routes", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_config_show_no_config() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seek-backend-0qms.onrender.com"));
}

#[test]
fn test_config_set_then_show() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .args(["config", "set", "token_store", "file"])
        .assert()
        .success();
    let output = seek_cmd(home.path())
        .args(["-o", "json-compact", "config", "show"])
        .output()
        .unwrap();
    let cfg: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(cfg["token_store"], "file");
}

// ── Routes (offline) ────────────────────────────────────────────────

#[test]
fn test_routes_list_in_declaration_order() {
    let home = tempfile::tempdir().unwrap();
    let output = seek_cmd(home.path())
        .args(["-o", "plain", "routes", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let paths: Vec<String> = stdout(&output).lines().map(str::to_owned).collect();
    assert_eq!(
        paths,
        [
            "/login",
            "/register",
            "/course",
            "/lecture",
            "/programming/:id",
            "/assignment/:id",
            "/generate-topic-mock",
            "/kia",
            "/mock-quiz",
        ]
    );
}

#[test]
fn test_root_resolves_to_login() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .args(["-o", "plain", "routes", "resolve", "/"])
        .assert()
        .success()
        .stdout(predicate::str::diff("login\n"));
}

#[test]
fn test_resolve_binds_params_and_props() {
    let home = tempfile::tempdir().unwrap();
    let output = seek_cmd(home.path())
        .args([
            "-o",
            "json",
            "routes",
            "resolve",
            "/lecture?week_id=2&lecture_id=7",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let res: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(res["name"], "Lecture");
    assert_eq!(res["props"], json!({ "week_id": "2", "lecture_id": "7" }));

    let output = seek_cmd(home.path())
        .args(["-o", "json", "routes", "resolve", "/assignment/42"])
        .output()
        .unwrap();
    let res: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(res["view"], "assignment");
    assert_eq!(res["params"]["path"]["id"], "42");
}

#[test]
fn test_unknown_url_resolves_to_not_found() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .args(["-o", "plain", "routes", "resolve", "/does/not/exist"])
        .assert()
        .success()
        .stdout(predicate::str::diff("not-found\n"));
}

#[test]
fn test_href_builds_urls() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .args(["routes", "href", "Assignment", "-p", "id=42"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/assignment/42\n"));
}

#[test]
fn test_href_errors() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .args(["routes", "href", "Nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Nope"));

    seek_cmd(home.path())
        .args(["routes", "href", "Assignment"])
        .assert()
        .code(2);
}

// ── API commands (wiremock) ─────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_authenticated_request() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-cli", "message": "Login successful"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weeks"))
        .and(header("Authorization", "Bearer jwt-cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weeks": [
                { "id": 1, "week_number": 1, "title": "Intro" },
                { "id": 2, "week_number": 2, "title": "Loops" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut login = api_cmd(home.path(), &server);
    login.args(["login", "--email", "a@b.c", "--password", "pw"]);
    let output = run(login).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        std::fs::read_to_string(home.path().join("token")).unwrap(),
        "jwt-cli"
    );

    let mut weeks = api_cmd(home.path(), &server);
    weeks.args(["-o", "plain", "weeks", "list"]);
    let output = run(weeks).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(stdout(&output), "1\n2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_token_sends_no_authorization_header() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lectures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lectures": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = api_cmd(home.path(), &server);
    cmd.args(["-o", "json-compact", "lectures", "list"]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(stdout(&output), "[]");

    let received: Vec<Request> = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exits_with_auth_code_and_keeps_token() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("token"), "expired").unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assignments"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "msg": "Token has expired" })),
        )
        .mount(&server)
        .await;

    let mut cmd = api_cmd(home.path(), &server);
    cmd.args(["assignments", "list"]);
    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Token has expired"));
    assert!(home.path().join("token").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_removes_token_file() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("token"), "jwt-out").unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logout"))
        .and(header("Authorization", "Bearer jwt-out"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Logged out successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = api_cmd(home.path(), &server);
    cmd.arg("logout");
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(!home.path().join("token").exists());

    let mut status = api_cmd(home.path(), &server);
    status.args(["-o", "plain", "status"]);
    assert_eq!(stdout(&run(status).await), "false");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_raw_request_reports_status() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weeks/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Week not found" })),
        )
        .mount(&server)
        .await;

    let mut cmd = api_cmd(home.path(), &server);
    cmd.args(["-o", "json-compact", "request", "get", "/weeks/99"]);
    let output = run(cmd).await;
    assert!(!output.status.success());
    assert_eq!(stdout(&output), r#"{"message":"Week not found"}"#);
}

#[test]
fn test_connection_failure_exit_code() {
    let home = tempfile::tempdir().unwrap();
    seek_cmd(home.path())
        .args(["--api-url", "http://127.0.0.1:9", "--token-file"])
        .arg(home.path().join("token"))
        .args(["--timeout", "5", "weeks", "list"])
        .assert()
        .code(7);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_kia_save_records_turn() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat_history"))
        .and(wiremock::matchers::body_json(json!({
            "user_id": 1, "query": "What is ML?", "response": "A field of AI."
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true, "message": "Chat history saved successfully", "user_id": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = api_cmd(home.path(), &server);
    cmd.args([
        "-o", "json", "kia", "save", "--user-id", "1", "--query", "What is ML?", "--response",
        "A field of AI.",
    ]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let saved: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(saved["user_id"], 1);
    assert_eq!(saved["message"], "Chat history saved successfully");
}
