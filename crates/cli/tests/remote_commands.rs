//! End-to-end tests running the binary against a mock management API

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RULES_PATH: &str =
    "/subscriptions/sub-1/resourcegroups/rg1/providers/microsoft.insights/alertrules";
const SITE_PATH: &str =
    "/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.Web/sites/site1";

/// Command pointed at `server` with an empty config file
fn armctl(server: &MockServer, config: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("armctl").unwrap();
    cmd.env("ARMCTL_CONFIG", config.path())
        .env("ARMCTL_ENDPOINT", server.uri())
        .env("ARMCTL_SUBSCRIPTION_ID", "sub-1")
        .env("ARMCTL_ACCESS_TOKEN", "test-token")
        .env_remove("RUST_LOG");
    cmd
}

fn rule(name: &str) -> Value {
    json!({
        "id": format!("{}/{}", RULES_PATH, name),
        "name": name,
        "location": "West US",
        "properties": {
            "name": name,
            "description": format!("{} description", name),
            "isEnabled": true,
            "condition": {
                "odata.type": "Microsoft.Azure.Management.Insights.Models.ThresholdRuleCondition",
                "operator": "GreaterThan",
                "threshold": 80.0
            }
        }
    })
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_emits_summaries_in_service_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RULES_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "value": [rule("B"), rule("A")] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let config = NamedTempFile::new().unwrap();

    let output = armctl(&server, &config)
        .args(["-o", "json", "get-alert-rule", "--resource-group", "rg1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let records = stdout_json(&output);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "B");
    assert_eq!(records[1]["name"], "A");
    // Summary projection only
    assert!(records.iter().all(|r| r.get("condition").is_none()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_by_name_emits_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/r1", RULES_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rule("r1")))
        .expect(1)
        .mount(&server)
        .await;
    let config = NamedTempFile::new().unwrap();

    let output = armctl(&server, &config)
        .args([
            "-o",
            "json",
            "get-alert-rule",
            "--resource-group",
            "rg1",
            "--name",
            "r1",
            "--detailed-output",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let records = stdout_json(&output);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "r1");
    assert_eq!(records[0]["description"], "r1 description");
    assert_eq!(records[0]["condition"]["threshold"], 80.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_list_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RULES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .mount(&server)
        .await;
    let config = NamedTempFile::new().unwrap();

    let output = armctl(&server, &config)
        .args(["-o", "json", "get-alert-rule", "--resource-group", "rg1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_is_reported_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/missing", RULES_PATH)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let config = NamedTempFile::new().unwrap();

    armctl(&server, &config)
        .args(["get-alert-rule", "--resource-group", "rg1", "--name", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "resource not found: alert rule 'missing'",
        ))
        .stderr(predicate::str::contains("one or more errors occurred").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_resource_group_reports_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RULES_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": "ResourceGroupNotFound",
                "message": "Resource group 'rg1' could not be found."
            }
        })))
        .mount(&server)
        .await;
    let config = NamedTempFile::new().unwrap();

    armctl(&server, &config)
        .args(["get-alert-rule", "--resource-group", "rg1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "ResourceGroupNotFound: Resource group 'rg1' could not be found.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_website_force_sends_fixed_flags() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(SITE_PATH))
        .and(query_param("deleteAllSlots", "true"))
        .and(query_param("deleteMetrics", "true"))
        .and(query_param("deleteEmptyServerFarm", "false"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let config = NamedTempFile::new().unwrap();

    armctl(&server, &config)
        .args([
            "remove-website",
            "--resource-group",
            "rg1",
            "--name",
            "site1",
            "--force",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed website site1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_website_without_terminal_is_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let config = NamedTempFile::new().unwrap();

    // No terminal to answer the prompt, so the removal is declined
    armctl(&server, &config)
        .args(["remove-website", "--resource-group", "rg1", "--name", "site1"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("cancelled"))
        .stderr(predicate::str::contains("use --force to skip the prompt"));
}
