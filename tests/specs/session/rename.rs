// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rename` specs: the command acts on whichever session owns the pane it
//! runs from (resolved via `TMUX_PANE`), so these run against a real
//! headless tmux session.

use crate::prelude::*;

fn require_tmux() -> bool {
    if tmux_available() {
        true
    } else {
        eprintln!("skipping: tmux not available in this environment");
        false
    }
}

fn seed_session(project: &Project, name: &str) {
    project.session_file(
        name,
        &format!(
            r#"{{"name":"{name}","repo_url":"https://example.invalid/org/repo","repo_urls":[],"is_workspace":false,"clone_path":"/tmp/{name}","created_at":1000000000}}"#
        ),
    );
}

#[test]
fn rename_with_argument_sets_title_and_tmux_variable() {
    if !require_tmux() {
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("rename-arg", project.path());
    seed_session(&project, session.name());

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["rename", "Fixing", "the", "flaky", "test"])
        .stdin("")
        .passes()
        .stdout_has("Renamed")
        .stdout_has("Fixing the flaky test");

    assert_eq!(
        session.get_var("@claude-matrix-title").as_deref(),
        Some("Fixing the flaky test")
    );

    let metadata = std::fs::read_to_string(
        project
            .path()
            .join(".claude-matrix/sessions")
            .join(format!("{}.json", session.name())),
    )
    .expect("session metadata readable");
    let parsed: serde_json::Value = serde_json::from_str(&metadata).expect("valid json");
    assert_eq!(parsed["title"], "Fixing the flaky test");
}

#[test]
fn rename_reads_title_from_stdin_when_no_args_given() {
    if !require_tmux() {
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("rename-stdin", project.path());
    seed_session(&project, session.name());

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["rename"])
        .stdin("Investigating OOM\n")
        .passes()
        .stdout_has("Investigating OOM");

    assert_eq!(
        session.get_var("@claude-matrix-title").as_deref(),
        Some("Investigating OOM")
    );
}

#[test]
fn rename_preserves_session_identity_fields() {
    if !require_tmux() {
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("rename-identity", project.path());
    seed_session(&project, session.name());

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["rename", "New Title"])
        .stdin("")
        .passes();

    let metadata = std::fs::read_to_string(
        project
            .path()
            .join(".claude-matrix/sessions")
            .join(format!("{}.json", session.name())),
    )
    .expect("session metadata readable");
    let parsed: serde_json::Value = serde_json::from_str(&metadata).expect("valid json");
    assert_eq!(parsed["name"], session.name());
    assert_eq!(parsed["clone_path"], format!("/tmp/{}", session.name()));
    assert_eq!(parsed["created_at"], 1_000_000_000);
}

#[test]
fn rename_without_matching_session_file_fails() {
    if !require_tmux() {
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("rename-missing", project.path());

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["rename", "Anything"])
        .stdin("")
        .fails();
}
