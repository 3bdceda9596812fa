use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use predicates::prelude::*;

const SEARCH_BODY: &str = r#"{
    "data": [
        {
            "id": "cat1",
            "title": "Happy Cat",
            "url": "https://giphy.com/gifs/cat1",
            "rating": "g",
            "import_datetime": "2024-01-01 00:00:00",
            "images": {
                "original": {"url": "https://media.giphy.com/cat1.gif", "width": "480", "height": "360", "size": "12345"},
                "fixed_height_small": {"url": "https://media.giphy.com/cat1_small.gif", "width": "133", "height": "100"},
                "fixed_height_small_still": {"url": "https://media.giphy.com/cat1_still.gif", "width": "133", "height": "100"}
            }
        }
    ],
    "pagination": {"total_count": 42, "count": 1, "offset": 0},
    "meta": {"status": 200, "msg": "OK"}
}"#;

fn giphy(url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("giphy"));
    for var in [
        "GIPHY_API_URL",
        "GIPHY_LIMIT",
        "GIPHY_RATING",
        "GIPHY_LANG",
        "GIPHY_TIMEOUT_SECS",
        "GIPHY_RETRY_ATTEMPTS",
        "GIPHY_RETRY_DELAY_MS",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("GIPHY_API_KEY", "integration-key")
        .env("GIPHY_RETRY_DELAY_MS", "1")
        .arg("--api-url")
        .arg(url);
    cmd
}

#[test]
fn test_end_to_end_search() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "happy cat".into()),
            Matcher::UrlEncoded("limit".into(), "3".into()),
            Matcher::UrlEncoded("rating".into(), "g".into()),
            Matcher::UrlEncoded("api_key".into(), "integration-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SEARCH_BODY)
        .create();

    giphy(&url)
        .args(["search", "happy cat", "--limit", "3", "--rating", "g"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""query": "happy cat""#))
        .stdout(predicate::str::contains(r#""total_results": 42"#))
        .stdout(predicate::str::contains("https://media.giphy.com/cat1.gif"));

    mock.assert();
}

#[test]
fn test_end_to_end_message() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "love funny cats".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(SEARCH_BODY)
        .create();

    giphy(&url)
        .args(["message", "I love funny cats and dogs"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "gif""#))
        .stdout(predicate::str::contains(r#""query_used": "love funny cats""#));

    mock.assert();
}

#[test]
fn test_search_without_results_exits_with_failure() {
    let mut server = Server::new();
    let url = server.url();

    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data": [], "meta": {"status": 200}}"#)
        .create();

    giphy(&url)
        .args(["search", "nothing matches"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No GIFs found"));
}

#[test]
fn test_health_reports_unhealthy_upstream() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(2)
        .create();

    giphy(&url)
        .args(["health", "--retries", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""adapter_healthy": false"#))
        .stdout(predicate::str::contains("HTTP 503"));

    mock.assert();
}

#[test]
fn test_missing_api_key_fails() {
    let mut cmd = Command::new(cargo::cargo_bin!("giphy"));
    cmd.env_remove("GIPHY_API_KEY")
        .args(["search", "cats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is required"));
}
