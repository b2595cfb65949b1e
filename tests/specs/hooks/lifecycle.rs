// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hook-ingestor lifecycle specs: one JSON event on stdin resolves the
//! owning multiplexer session via `TMUX_PANE`, updates per-agent state, and
//! renames the session's window to the recomputed aggregate indicator.
//!
//! These run against a real (headless) tmux server — no pty or interactive
//! terminal is needed since the ingestor never attaches.

use crate::prelude::*;

fn require_tmux() -> bool {
    if tmux_available() {
        true
    } else {
        eprintln!("skipping: tmux not available in this environment");
        false
    }
}

#[test]
fn single_agent_running_event_sets_window_title() {
    if !require_tmux() {
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("lifecycle-running", project.path());

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["hook-handler", "--from=session-start"])
        .stdin(r#"{"session_id":"lead"}"#)
        .passes();

    assert!(
        session.window_name().starts_with("🟢"),
        "window name: {}",
        session.window_name()
    );

    let state = project
        .read_state_file(session.name())
        .expect("state file written");
    let parsed: serde_json::Value = serde_json::from_str(&state).expect("valid json");
    assert_eq!(parsed["agents"]["lead"]["state"], "running");
}

#[test]
fn session_end_removes_one_of_many_agents_and_aggregate_stays_running() {
    if !require_tmux() {
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("lifecycle-multi", project.path());

    let now = 2_000_000_000u64;
    project.state_file(
        session.name(),
        &format!(
            r#"{{"agents":{{"lead":{{"state":"running","updated_at":{now}}},"mate":{{"state":"idle","updated_at":{now}}}}}}}"#
        ),
    );

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["hook-handler", "--from=session-end"])
        .stdin(r#"{"session_id":"mate","hook_event_name":"session-end"}"#)
        .passes();

    let state = project
        .read_state_file(session.name())
        .expect("state file retained for the remaining agent");
    let parsed: serde_json::Value = serde_json::from_str(&state).expect("valid json");
    let agents = parsed["agents"].as_object().expect("agents object");
    assert!(agents.contains_key("lead"));
    assert!(!agents.contains_key("mate"));

    assert!(
        session.window_name().starts_with("🟢"),
        "aggregate should still be Running (lead survives): window name {}",
        session.window_name()
    );
}

#[test]
fn session_end_of_the_last_agent_removes_the_state_file() {
    if !require_tmux() {
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("lifecycle-last", project.path());

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["hook-handler", "--from=session-start"])
        .stdin(r#"{"session_id":"solo"}"#)
        .passes();
    assert!(project.read_state_file(session.name()).is_some());

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["hook-handler", "--from=session-end"])
        .stdin(r#"{"session_id":"solo","hook_event_name":"session-end"}"#)
        .passes();

    assert!(
        project.read_state_file(session.name()).is_none(),
        "state file should be deleted once its only agent ends"
    );
    assert!(
        session.window_name().starts_with("⚫"),
        "aggregate should be Stopped with an empty agent map: window name {}",
        session.window_name()
    );
}

#[test]
fn waiting_for_input_event_uses_the_question_mark_indicator() {
    if !require_tmux() {
        return;
    }
    let project = Project::empty();
    let session = TmuxSession::start("lifecycle-waiting", project.path());

    project
        .claude_matrix()
        .env("TMUX_PANE", session.pane_id())
        .args(&["hook-handler", "--from=permission-requested"])
        .stdin(r#"{"session_id":"lead"}"#)
        .passes();

    assert!(
        session.window_name().starts_with("❓"),
        "window name: {}",
        session.window_name()
    );
}
