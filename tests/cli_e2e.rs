//! End-to-end CLI tests for the screenshot binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, ResponseTemplate};

mod support;

use support::start_mock_server_or_skip;

/// Builds the binary command with an isolated config directory and no API key in the env.
fn screenshot_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("screenshot").unwrap();
    cmd.env_remove("SCREENSHOT_API_KEY")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn test_binary_help_displays_usage() {
    let config_home = TempDir::new().unwrap();
    screenshot_cmd(&config_home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Capture website screenshots"));
}

#[test]
fn test_binary_missing_url_returns_error() {
    let config_home = TempDir::new().unwrap();
    screenshot_cmd(&config_home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_without_api_key_fails() {
    let config_home = TempDir::new().unwrap();
    screenshot_cmd(&config_home)
        .arg("whoisxmlapi.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key provided"));
}

#[test]
fn test_binary_invalid_option_fails_before_request() {
    let config_home = TempDir::new().unwrap();
    screenshot_cmd(&config_home)
        .args([
            "--api-key",
            "at_test",
            "--base-url",
            "http://127.0.0.1:9/api/v1",
            "--quality",
            "10",
            "whoisxmlapi.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            r#"invalid argument: "quality" must be between 40 and 99"#,
        ));
}

#[test]
fn test_binary_rejects_unknown_config_key() {
    let config_home = TempDir::new().unwrap();
    let dir = config_home.path().join("screenshot-api");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "concurrency = 4\n").unwrap();

    screenshot_cmd(&config_home)
        .args(["--api-key", "at_test", "whoisxmlapi.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_writes_raw_body_to_stdout() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(query_param("apiKey", "at_from_env"))
        .and(query_param("url", "whoisxmlapi.com"))
        .and(query_param("type", "png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("PNGDATA"))
        .expect(1)
        .mount(&server)
        .await;

    let config_home = TempDir::new().unwrap();
    screenshot_cmd(&config_home)
        .env("SCREENSHOT_API_KEY", "at_from_env")
        .args(["--base-url", &server.uri(), "--type", "png", "-q", "whoisxmlapi.com"])
        .assert()
        .success()
        .stdout("PNGDATA");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_saves_to_output_using_config_key() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(query_param("apiKey", "at_from_file"))
        .and(query_param("imageOutputFormat", "image"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"JPEGDATA".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let config_home = TempDir::new().unwrap();
    let dir = config_home.path().join("screenshot-api");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!("api_key = \"at_from_file\"\nbase_url = \"{}\"\n", server.uri()),
    )
    .unwrap();

    let out_dir = TempDir::new().unwrap();
    let target = out_dir.path().join("shot.jpg");

    screenshot_cmd(&config_home)
        .arg("-o")
        .arg(&target)
        .arg("whoisxmlapi.com")
        .assert()
        .success();

    assert_eq!(std::fs::read(&target).unwrap(), b"JPEGDATA");
}
