// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `diagnose` specs: a read-only snapshot of config, hook registration,
//! state-file inventory, live sessions, and environment.

use crate::prelude::*;

#[test]
fn reports_config_scoped_to_the_isolated_home() {
    let project = Project::empty();

    project
        .claude_matrix()
        .args(&["diagnose"])
        .passes()
        .stdout_has("Config:")
        .stdout_has(&project.path().display().to_string())
        .stdout_has("remote_token       unset");
}

#[test]
fn reports_no_sessions_when_no_multiplexer_server_is_running() {
    let project = Project::empty();

    project
        .claude_matrix()
        .args(&["diagnose"])
        .passes()
        .stdout_has("Multiplexer sessions:")
        .stdout_has("(none)");
}

#[test]
fn reports_state_directory_as_not_yet_created_when_empty() {
    let project = Project::empty();

    project
        .claude_matrix()
        .args(&["diagnose"])
        .passes()
        .stdout_has("State files (")
        .stdout_has("(directory does not exist yet)");
}

#[test]
fn reports_hooks_not_registered_before_setup_hooks_runs() {
    let project = Project::empty();

    project
        .claude_matrix()
        .args(&["diagnose"])
        .passes()
        .stdout_has("not registered");
}

#[test]
fn reports_hooks_registered_after_setup_hooks_runs() {
    let project = Project::empty();
    project.claude_matrix().args(&["setup-hooks"]).passes();

    project
        .claude_matrix()
        .args(&["diagnose"])
        .passes()
        .stdout_has("session-start          registered");
}

#[test]
fn redacts_the_remote_token_in_environment_section() {
    let project = Project::empty();

    project
        .claude_matrix()
        .env("TMUX_CLAUDE_MATRIX_TOKEN", "super-secret-value")
        .args(&["diagnose"])
        .passes()
        .stdout_has("TMUX_CLAUDE_MATRIX_TOKEN=<redacted>")
        .stdout_lacks("super-secret-value");
}

#[test]
fn lists_state_files_present_in_the_state_directory() {
    let project = Project::empty();
    project.state_file(
        "some-session",
        r#"{"agents":{"lead":{"state":"running","updated_at":1000000000}}}"#,
    );

    project
        .claude_matrix()
        .args(&["diagnose"])
        .passes()
        .stdout_has("some-session.json");
}

#[test]
fn lists_a_live_multiplexer_session() {
    if !tmux_available() {
        eprintln!("skipping: tmux not available in this environment");
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("diagnose-live", project.path());

    project
        .claude_matrix()
        .args(&["diagnose"])
        .passes()
        .stdout_has(session.name());
}
