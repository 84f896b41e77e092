use std::fs;
use std::path::Path;

use anyhow::Result;
use assert_cmd::Command;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use serde_json::Value as JsonValue;
use serde_json::json;
use tempfile::TempDir;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

fn answerdesk_command(home: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("answerdesk")?;
    cmd.env("ANSWERDESK_HOME", home);
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

fn write_config(home: &Path, server: &MockServer) -> Result<()> {
    fs::write(
        home.join("config.toml"),
        format!(
            r#"
[history]
url = "{uri}/api/qa/history"

[tickets]
url = "{uri}/create-ticket"
"#,
            uri = server.uri()
        ),
    )?;
    Ok(())
}

async fn mount_empty_history(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/qa/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "history": [] })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn ticket_success_prints_ticket_id() -> Result<()> {
    let server = MockServer::start().await;
    mount_empty_history(&server).await;
    Mock::given(method("POST"))
        .and(path("/create-ticket"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ticketId": "T-42" })))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new()?;
    write_config(home.path(), &server)?;

    answerdesk_command(home.path())?
        .args([
            "--color",
            "never",
            "ticket",
            "--user-id",
            "user-1",
            "--query-id",
            "query-1",
            "--question",
            "What is X?",
            "--answer",
            "X is a thing.",
        ])
        .assert()
        .success()
        .stdout("Ticket created successfully: #T-42\n");

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn ticket_rejection_fails_with_reason_on_stderr() -> Result<()> {
    let server = MockServer::start().await;
    mount_empty_history(&server).await;
    Mock::given(method("POST"))
        .and(path("/create-ticket"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "error": "rate limited" })))
        .mount(&server)
        .await;
    let home = TempDir::new()?;
    write_config(home.path(), &server)?;

    answerdesk_command(home.path())?
        .args([
            "--color",
            "never",
            "ticket",
            "--user-id",
            "user-1",
            "--query-id",
            "query-1",
        ])
        .assert()
        .failure()
        .stderr(contains("Failed to create ticket: rate limited"));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn ticket_without_user_sends_nothing() -> Result<()> {
    let server = MockServer::start().await;
    let home = TempDir::new()?;
    write_config(home.path(), &server)?;

    answerdesk_command(home.path())?
        .args(["--color", "never", "ticket", "--query-id", "query-1"])
        .assert()
        .failure()
        .stderr(contains("Unable to create ticket: User information missing"));

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "unexpected requests: {received:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn history_json_honors_limit_flag() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/qa/history"))
        .and(query_param("limit", "2"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [
                { "question": "What is X?", "timestamp": "2024-01-01T00:00:00Z" },
                { "question": "And Y?", "createdAt": "2023-12-31T00:00:00Z" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new()?;
    write_config(home.path(), &server)?;

    let output = answerdesk_command(home.path())?
        .args(["history", "--limit", "2", "--json"])
        .output()?;

    assert!(output.status.success());
    let parsed: JsonValue = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        parsed,
        json!([
            { "question": "What is X?", "timestamp": "2024-01-01T00:00:00Z" },
            { "question": "And Y?", "timestamp": "2023-12-31T00:00:00Z" }
        ])
    );
    Ok(())
}

#[test]
fn show_respects_source_override() -> Result<()> {
    let home = TempDir::new()?;
    let input = home.path().join("answer.json");
    fs::write(
        &input,
        json!({
            "answer": "Restart the agent.",
            "queryId": "q-1",
            "sources": [{ "title": "Runbook" }]
        })
        .to_string(),
    )?;
    let input = input.to_str().expect("input path should be valid UTF-8");

    answerdesk_command(home.path())?
        .args(["show", input])
        .assert()
        .success()
        .stdout(contains("sources:\n  Runbook"));

    answerdesk_command(home.path())?
        .args(["-c", "display.show_sources=false", "show", input])
        .assert()
        .success()
        .stdout("Restart the agent.\n\n[Create Ticket]\n");

    Ok(())
}

#[test]
fn invalid_override_is_reported() -> Result<()> {
    let home = TempDir::new()?;

    answerdesk_command(home.path())?
        .args(["-c", "history.limit=0", "history"])
        .assert()
        .failure()
        .stderr(contains("history.limit"));

    Ok(())
}
