#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a config pointing the client at `base_url`.
fn write_config(dir: &std::path::Path, base_url: &str) {
    let content = format!("[tmdb]\nlanguage = \"ja-JP\"\nbase_url = \"{base_url}\"\n");
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_movie_popular_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.args(["movie", "popular", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"));
}

#[test]
fn test_movie_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.args(["movie", "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_tv_season_missing_season() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.args(["tv", "season", "--id", "1399"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--season"));
}

#[test]
fn test_missing_token_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.env_remove("TMDB_API_TOKEN")
        .arg("--dir")
        .arg(dir.path())
        .args(["tv", "popular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_TOKEN"));
}

#[test]
fn test_config_set_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut set = cargo_bin_cmd!("tmdbkit");
    set.env("NO_COLOR", "1")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "set", "--language", "fr-FR", "--region", "FR"])
        .assert()
        .success();

    // Assert
    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("fr-FR"));

    let mut show = cargo_bin_cmd!("tmdbkit");
    show.env("NO_COLOR", "1")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("region: FR"));
}

#[tokio::test]
async fn test_movie_popular_against_mock_server() {
    // Arrange
    let mock_server = MockServer::start().await;
    let json_body = include_str!("../../../fixtures/tmdb/movie_popular.json");

    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("language", "ja-JP"))
        .and(query_param("page", "2"))
        .and(header("Authorization", "Bearer cli-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server.uri());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.env("TMDB_API_TOKEN", "cli-token")
        .env("NO_COLOR", "1")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["movie", "popular", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fight Club"));
}

#[tokio::test]
async fn test_api_error_message_is_reported() {
    // Arrange
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"status_code":7,"status_message":"Invalid API key"}"#),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server.uri());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.env("TMDB_API_TOKEN", "bad-token")
        .env("NO_COLOR", "1")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path())
        .args(["tv", "details", "--id", "1399"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API key"));
}

#[tokio::test]
async fn test_movie_popular_with_otlp_endpoint_exits_normally() {
    // Arrange
    let mock_server = MockServer::start().await;
    let json_body = include_str!("../../../fixtures/tmdb/movie_popular.json");

    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/traces"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server.uri());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.env("TMDB_API_TOKEN", "cli-token")
        .env("NO_COLOR", "1")
        .env("OTEL_EXPORTER_OTLP_ENDPOINT", mock_server.uri())
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["movie", "popular"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fight Club"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_config_set_base_url() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut set = cargo_bin_cmd!("tmdbkit");
    set.arg("--dir")
        .arg(dir.path())
        .args(["config", "set", "--base-url", "http://localhost:8080/"])
        .assert()
        .success();

    // Assert
    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("base_url = \"http://localhost:8080/\""));
}

#[test]
fn test_config_set_rejects_invalid_base_url() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut set = cargo_bin_cmd!("tmdbkit");
    set.arg("--dir")
        .arg(dir.path())
        .args(["config", "set", "--base-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--base-url"));
    assert!(!dir.path().join("config.toml").exists());
}
