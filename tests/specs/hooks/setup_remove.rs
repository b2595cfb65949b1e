// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `setup-hooks` / `remove-hooks` specs against an isolated
//! `$HOME/.claude/settings.json`.

use crate::prelude::*;

fn settings_path(project: &Project) -> std::path::PathBuf {
    project.path().join(".claude").join("settings.json")
}

#[test]
fn setup_hooks_creates_settings_file_with_all_events() {
    let project = Project::empty();

    project
        .claude_matrix()
        .args(&["setup-hooks"])
        .passes()
        .stdout_has("Registered 10 hook(s)");

    let settings = std::fs::read_to_string(settings_path(&project)).expect("settings.json written");
    let parsed: serde_json::Value = serde_json::from_str(&settings).expect("valid json");
    let hooks = parsed["hooks"].as_object().expect("hooks object");
    for event in [
        "session-start",
        "prompt-submit",
        "pre-tool-use",
        "post-tool-use",
        "stop",
        "idle",
        "user-input-requested",
        "permission-requested",
        "error-notification",
        "session-end",
    ] {
        assert!(hooks.contains_key(event), "missing hook entry for {event:?}");
    }
}

#[test]
fn setup_hooks_is_idempotent() {
    let project = Project::empty();
    project.claude_matrix().args(&["setup-hooks"]).passes();

    project
        .claude_matrix()
        .args(&["setup-hooks"])
        .passes()
        .stdout_has("already registered");
}

#[test]
fn setup_hooks_preserves_unrelated_settings_keys() {
    let project = Project::empty();
    std::fs::create_dir_all(project.path().join(".claude")).expect("mkdir");
    std::fs::write(
        settings_path(&project),
        r#"{"unrelatedSetting": "keep-me"}"#,
    )
    .expect("seed settings");

    project.claude_matrix().args(&["setup-hooks"]).passes();

    let settings = std::fs::read_to_string(settings_path(&project)).expect("settings.json readable");
    let parsed: serde_json::Value = serde_json::from_str(&settings).expect("valid json");
    assert_eq!(parsed["unrelatedSetting"], "keep-me");
    assert!(parsed["hooks"].is_object());
}

#[test]
fn remove_hooks_clears_what_setup_hooks_registered() {
    let project = Project::empty();
    project.claude_matrix().args(&["setup-hooks"]).passes();

    project
        .claude_matrix()
        .args(&["remove-hooks"])
        .passes()
        .stdout_has("Unregistered 10 hook(s)");

    let settings = std::fs::read_to_string(settings_path(&project)).expect("settings.json readable");
    let parsed: serde_json::Value = serde_json::from_str(&settings).expect("valid json");
    let hooks = parsed["hooks"].as_object().expect("hooks object");
    for event in ["session-start", "stop", "session-end"] {
        let matchers = hooks[event].as_array().expect("matcher array");
        assert!(matchers.is_empty(), "expected {event:?} cleared, got {matchers:?}");
    }
}

#[test]
fn remove_hooks_with_nothing_registered_reports_zero() {
    let project = Project::empty();

    project
        .claude_matrix()
        .args(&["remove-hooks"])
        .passes()
        .stdout_has("No registered hooks found");
}
