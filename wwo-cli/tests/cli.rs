use std::path::Path;

use assert_cmd::{
    Command,
    assert::{Assert, OutputAssertExt},
};
use predicates::prelude::*;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, method, path, query_param},
};

const PARIS: &str = include_str!("../../wwo-core/tests/fixtures/paris.json");
const ENDPOINT: &str = "/premium/v1/weather.ashx";

/// `wwo` with no key in the environment and no user config file.
fn wwo(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wwo").unwrap();
    cmd.env_remove("WWO_API_KEY").env_remove("RUST_LOG").env("WWO_CONFIG", config);
    cmd
}

fn write_config(dir: &Path, server_uri: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    let contents = format!("api_key = \"TEST_KEY\"\nbase_url = \"{server_uri}{ENDPOINT}\"\n");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Runs the binary off the async workers so the mock server keeps serving.
async fn run_blocking(mut cmd: Command) -> Assert {
    let output = tokio::task::spawn_blocking(move || cmd.output()).await.unwrap().unwrap();
    output.assert()
}

#[test]
fn rejects_out_of_range_days() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("none.toml");

    for days in ["0", "8"] {
        wwo(&missing)
            .args(["--days", days])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("between 1 and 7"));
    }
}

#[test]
fn missing_api_key_explains_fix() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("none.toml");

    wwo(&missing)
        .args(["--plain", "--location", "Paris"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Please set your API key!"))
        .stdout(predicate::str::contains("Option 1"))
        .stdout(predicate::str::contains("Option 2"))
        .stdout(predicate::str::contains("Current Conditions").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn placeholder_key_in_config_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!("api_key = \"your_api_key_here\"\nbase_url = \"{}{ENDPOINT}\"\n", server.uri()),
    )
    .unwrap();

    run_blocking(wwo(&config)).await.code(3);
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn renders_dashboard_for_paris() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("q", "Paris"))
        .and(query_param("num_of_days", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PARIS, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server.uri());

    let mut cmd = wwo(&config);
    cmd.args(["--plain", "-l", "Paris"]);

    run_blocking(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("📍 Paris, France — Current Conditions"))
        .stdout(predicate::str::contains("Sat 24 Feb"))
        .stdout(predicate::str::contains("Wed 28 Feb"))
        .stdout(predicate::str::contains("Data provided by World Weather Online"));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_error_exits_with_its_own_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "error": [{ "msg": "Unable to find location" }] }
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server.uri());

    let mut cmd = wwo(&config);
    cmd.args(["--plain", "-l", "Atlantis", "-d", "2"]);

    run_blocking(cmd)
        .await
        .code(8)
        .stdout(predicate::str::contains("❌  API Error: Unable to find location"));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_exits_with_http_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server.uri());

    run_blocking(wwo(&config)).await.code(6).stdout(predicate::str::contains("HTTP Error: 500"));
}
