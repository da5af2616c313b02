#![allow(deprecated)]
use assert_cmd::Command;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "SUBREDDIT_NAME",
    "REDDIT_CLIENT_ID",
    "REDDIT_CLIENT_SECRET",
    "REDDIT_USERNAME",
    "REDDIT_PASSWORD",
    "REDDIT_AUTH_BASE",
    "REDDIT_API_BASE",
];

fn bot(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("acronym-bot").unwrap();
    cmd.current_dir(dir.path()).env("ACRONYM_BOT_ROOT", dir.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_acronyms(dir: &TempDir) {
    std::fs::write(
        dir.path().join("acronyms.json"),
        r#"{"OMG": "oh my god", "BRB": "be right back", "IDK": "I don't know"}"#,
    )
    .unwrap();
}

// ---------------------------------------------------------------------------
// acronym-bot explain
// ---------------------------------------------------------------------------

#[test]
fn explain_prints_reply() {
    let dir = TempDir::new().unwrap();
    write_acronyms(&dir);

    bot(&dir)
        .args(["explain", "what do OMG and BRB mean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched: OMG, BRB"))
        .stdout(predicate::str::contains("- **OMG** - oh my god"))
        .stdout(predicate::str::contains("- **BRB** - be right back"))
        .stdout(predicate::str::contains("^(I'm a bot that explains acronyms)"));
}

#[test]
fn explain_single_acronym_is_below_threshold() {
    let dir = TempDir::new().unwrap();
    write_acronyms(&dir);

    bot(&dir)
        .args(["explain", "OMG that was close"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched: OMG"))
        .stdout(predicate::str::contains("no reply would be posted"));
}

#[test]
fn explain_json_output() {
    let dir = TempDir::new().unwrap();
    write_acronyms(&dir);

    let output = bot(&dir)
        .args(["explain", "--json", "brb, idk"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["matches"], serde_json::json!(["BRB", "IDK"]));
    assert_eq!(value["would_reply"], true);
    assert!(value["reply"].as_str().unwrap().contains("**IDK**"));
}

#[test]
fn explain_without_dictionary_still_succeeds() {
    let dir = TempDir::new().unwrap();

    bot(&dir)
        .args(["explain", "OMG BRB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No known acronyms found."));
}

#[test]
fn explain_respects_configured_threshold() {
    let dir = TempDir::new().unwrap();
    write_acronyms(&dir);
    std::fs::write(dir.path().join("acronym-bot.yaml"), "min_acronyms: 3\n").unwrap();

    bot(&dir)
        .args(["explain", "OMG BRB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold of 3"));
}

// ---------------------------------------------------------------------------
// acronym-bot state
// ---------------------------------------------------------------------------

#[test]
fn state_on_fresh_root() {
    let dir = TempDir::new().unwrap();

    bot(&dir)
        .arg("state")
        .assert()
        .success()
        .stdout(predicate::str::contains("Replied:"))
        .stdout(predicate::str::contains("never"));
}

#[test]
fn state_reads_persisted_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("replied_comments.json"),
        r#"{"replied_ids": ["a", "b"], "last_run": "2024-05-01T12:00:00Z", "total_replies": 2}"#,
    )
    .unwrap();

    let output = bot(&dir).args(["state", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["replied"], 2);
    assert_eq!(value["total_replies"], 2);
    assert_eq!(value["replied_ids"], serde_json::json!(["a", "b"]));
}

// ---------------------------------------------------------------------------
// acronym-bot config
// ---------------------------------------------------------------------------

#[test]
fn config_validate_requires_subreddit() {
    let dir = TempDir::new().unwrap();

    bot(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] subreddit is not set"));
}

#[test]
fn config_validate_accepts_env_subreddit() {
    let dir = TempDir::new().unwrap();

    bot(&dir)
        .args(["config", "validate"])
        .env("SUBREDDIT_NAME", "TowerOfFantasy")
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_show_reports_defaults() {
    let dir = TempDir::new().unwrap();

    bot(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scan_limit:     100"))
        .stdout(predicate::str::contains("min_acronyms:   2"));
}

// ---------------------------------------------------------------------------
// acronym-bot run
// ---------------------------------------------------------------------------

#[test]
fn run_without_subreddit_fails() {
    let dir = TempDir::new().unwrap();

    bot(&dir)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing setting: subreddit"));
}

#[test]
fn run_without_credentials_fails() {
    let dir = TempDir::new().unwrap();

    bot(&dir)
        .env("SUBREDDIT_NAME", "TowerOfFantasy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing setting: REDDIT_CLIENT_ID"));
}

#[test]
fn run_options_before_subcommand_are_rejected() {
    let dir = TempDir::new().unwrap();

    bot(&dir)
        .args(["--limit", "5", "run"])
        .env("SUBREDDIT_NAME", "TowerOfFantasy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing setting").not());
}

#[test]
fn run_reads_settings_from_dotenv() {
    let dir = TempDir::new().unwrap();
    write_acronyms(&dir);
    let mut server = Server::new();
    let token = server
        .mock("POST", "/api/v1/access_token")
        .with_status(401)
        .with_body(r#"{"error": "invalid_grant"}"#)
        .expect(1)
        .create();

    let dotenv = format!(
        "SUBREDDIT_NAME=TowerOfFantasy\n\
         REDDIT_CLIENT_ID=cid\n\
         REDDIT_CLIENT_SECRET=secret\n\
         REDDIT_USERNAME=acronym_bot\n\
         REDDIT_PASSWORD=hunter2\n\
         REDDIT_AUTH_BASE={url}\n\
         REDDIT_API_BASE={url}\n",
        url = server.url()
    );
    std::fs::write(dir.path().join(".env"), dotenv).unwrap();

    bot(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing setting").not())
        .stderr(predicate::str::contains("failed to connect to reddit"));
    token.assert();
}

fn with_reddit(cmd: &mut Command, server: &ServerGuard) {
    cmd.env("SUBREDDIT_NAME", "TowerOfFantasy")
        .env("REDDIT_CLIENT_ID", "cid")
        .env("REDDIT_CLIENT_SECRET", "secret")
        .env("REDDIT_USERNAME", "acronym_bot")
        .env("REDDIT_PASSWORD", "hunter2")
        .env("REDDIT_AUTH_BASE", server.url())
        .env("REDDIT_API_BASE", server.url());
}

fn mock_session(server: &mut ServerGuard) -> Vec<mockito::Mock> {
    let token = server
        .mock("POST", "/api/v1/access_token")
        .with_status(200)
        .with_body(r#"{"access_token": "tok"}"#)
        .create();
    let me = server
        .mock("GET", "/api/v1/me")
        .with_status(200)
        .with_body(r#"{"name": "acronym_bot"}"#)
        .create();
    vec![token, me]
}

#[test]
fn run_replies_once_across_invocations() {
    let dir = TempDir::new().unwrap();
    write_acronyms(&dir);
    let mut server = Server::new();
    let _session = mock_session(&mut server);

    let listing = serde_json::json!({"kind": "Listing", "data": {"after": null, "children": [
        {"kind": "t1", "data": {"id": "c1", "body": "idk what OMG and BRB mean", "author": "alice"}},
        {"kind": "t1", "data": {"id": "c2", "body": "OMG", "author": "bob"}},
        {"kind": "t1", "data": {"id": "c3", "body": "OMG BRB", "author": "acronym_bot"}},
    ]}});
    let _comments = server
        .mock("GET", "/r/TowerOfFantasy/comments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing.to_string())
        .create();
    let reply = server
        .mock("POST", "/api/comment")
        .match_body(Matcher::UrlEncoded("thing_id".into(), "t1_c1".into()))
        .with_status(200)
        .with_body(r#"{"json": {"errors": []}}"#)
        .expect(1)
        .create();

    let mut first = bot(&dir);
    with_reddit(&mut first, &server);
    first
        .assert()
        .success()
        .stdout(predicate::str::contains("Examined:"))
        .stdout(predicate::str::contains("Replied:"));

    let state = std::fs::read_to_string(dir.path().join("replied_comments.json")).unwrap();
    assert!(state.contains("\"c1\""));

    let mut second = bot(&dir);
    with_reddit(&mut second, &server);
    let output = second.args(["run", "--json"]).output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["examined"], 3);
    assert_eq!(report["replies_sent"], 0);

    reply.assert();
}

#[test]
fn run_fails_when_listing_unavailable() {
    let dir = TempDir::new().unwrap();
    write_acronyms(&dir);
    let mut server = Server::new();
    let _session = mock_session(&mut server);
    let _comments = server
        .mock("GET", "/r/TowerOfFantasy/comments")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("down")
        .create();

    let mut cmd = bot(&dir);
    with_reddit(&mut cmd, &server);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("scan of r/TowerOfFantasy failed"));
}
