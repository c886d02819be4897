//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output};

use chrono::Utc;
use planwright::cassette::{Cassette, Exchange, Outcome};
use planwright::ports::{CompletionRequest, CompletionResponse};

const ENV_TO_CLEAR: &[&str] = &[
    "OPEN_AI_API_KEY",
    "OPEN_AI_AZURE_ENDPOINT",
    "OPEN_AI_API_VERSION",
    "OPEN_AI_DEPLOYMENT_NAME",
    "PLANWRIGHT_RECORD",
    "PLANWRIGHT_REPLAY",
    "RUST_LOG",
];

fn planwright(store: &Path, args: &[&str], extra_env: &[(&str, &Path)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_planwright");
    let mut cmd = Command::new(bin);
    cmd.args(args).current_dir(store).env("PLANWRIGHT_STORE", store);
    for name in ENV_TO_CLEAR {
        cmd.env_remove(name);
    }
    for (name, value) in extra_env {
        cmd.env(name, value);
    }
    cmd.output().expect("failed to run planwright binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

const LOGIN: &str = "Build a login page with JWT authentication and a database of users.";

#[test]
fn templates_lists_the_catalogue() {
    let dir = tempfile::tempdir().unwrap();
    let output = planwright(dir.path(), &["templates"], &[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("auth-system"));
    assert!(stdout(&output).contains("chat-interface"));
}

#[test]
fn analyze_json_is_rule_based_without_ai_settings() {
    let dir = tempfile::tempdir().unwrap();
    let output = planwright(dir.path(), &["analyze", LOGIN, "--ai", "--json"], &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json(&output);
    assert_eq!(value["method"], "rule-based");
    assert_eq!(value["complexity"], "moderate");
    assert_eq!(value["tasks"].as_array().unwrap().len(), 4);
    assert_eq!(value["tasks"][1]["dependencies"][0]["taskId"], "AUTH_BACKEND");
    assert!(stderr(&output).contains("falling back"));
}

#[test]
fn analyze_reads_requirements_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requirements.md");
    std::fs::write(&path, "Paint the fence. Then water the plants!").unwrap();

    let output =
        planwright(dir.path(), &["analyze", "--file", path.to_str().unwrap(), "--json"], &[]);

    assert!(output.status.success());
    let value = json(&output);
    let titles: Vec<&str> =
        value["tasks"].as_array().unwrap().iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Implement: Paint the fence...", "Implement: Then water the plants..."]);
}

#[test]
fn blank_requirements_fail() {
    let dir = tempfile::tempdir().unwrap();
    let output = planwright(dir.path(), &["analyze", "   "], &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("requirements is required"));
}

#[test]
fn plan_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path();

    let output = planwright(store, &["list"], &[]);
    assert!(stdout(&output).contains("No plans found"));

    let output = planwright(store, &["create", "--title", "Login", LOGIN], &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let plan_id = stdout(&output)
        .split_whitespace()
        .nth(2)
        .expect("plan id in output")
        .to_string();
    assert!(plan_id.starts_with("plan_"));

    let output = planwright(store, &["show", &plan_id, "--json"], &[]);
    let plan = json(&output);
    assert_eq!(plan["title"], "Login");
    assert_eq!(plan["metadata"]["totalTasks"], 4);
    assert_eq!(plan["metadata"]["estimatedEffort"], 16);
    let task_id = plan["tasks"][0]["id"].as_str().unwrap().to_string();

    let output =
        planwright(store, &["update-task", &plan_id, &task_id, "--status", "completed"], &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("1/4 complete (25%)"));

    let output = planwright(store, &["update-plan", &plan_id, "--status", "active"], &[]);
    assert!(output.status.success());

    let output = planwright(store, &["list"], &[]);
    let listing = stdout(&output);
    assert!(listing.contains(&plan_id));
    assert!(listing.contains("active"));
    assert!(listing.contains("1/4 (25%)"));

    let output = planwright(store, &["suggest", &plan_id, &task_id, "--path", "src/auth.rs"], &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not configured"));

    assert!(planwright(store, &["delete", &plan_id], &[]).status.success());
    let output = planwright(store, &["show", &plan_id], &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains(&format!("plan not found: {plan_id}")));
}

#[test]
fn replayed_cassette_drives_the_ai_path() {
    let dir = tempfile::tempdir().unwrap();
    let cassette_path = dir.path().join("analyze.cassette.yaml");
    let reply = r#"{"complexity":"complex","suggestions":["Ship behind a flag"],"tasks":[
        {"title":"Model sessions","description":"Persist sessions","priority":"high",
         "estimatedComplexity":8,"order":1,"tags":["auth"]}]}"#;
    Cassette {
        name: "analyze".into(),
        recorded_at: Utc::now(),
        exchanges: vec![Exchange {
            seq: 0,
            request: CompletionRequest { system: String::new(), prompt: String::new(), structured: true },
            outcome: Outcome::Reply(CompletionResponse {
                text: reply.into(),
                prompt_tokens: 0,
                completion_tokens: 0,
            }),
        }],
    }
    .save(&cassette_path)
    .unwrap();

    let output = planwright(
        dir.path(),
        &["analyze", LOGIN, "--ai", "--json"],
        &[("PLANWRIGHT_REPLAY", cassette_path.as_path())],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json(&output);
    assert_eq!(value["method"], "ai");
    assert_eq!(value["complexity"], "complex");
    assert_eq!(value["tasks"][0]["estimatedComplexity"], 8);
    assert_eq!(value["tasks"][0]["status"], "pending");
}

#[test]
fn unknown_subcommand_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = planwright(dir.path(), &["frobnicate"], &[]);
    assert!(!output.status.success());
}
