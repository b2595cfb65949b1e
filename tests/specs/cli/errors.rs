// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI error handling specs.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["frobnicate"]).fails();
}

#[test]
fn hook_handler_without_from_flag_fails() {
    cli()
        .args(&["hook-handler"])
        .stdin("{}")
        .fails()
        .stderr_has("--from");
}

#[test]
fn hook_handler_with_unrecognized_event_fails() {
    let project = Project::empty();
    project
        .claude_matrix()
        .args(&["hook-handler", "--from=not-a-real-event"])
        .stdin("{}")
        .fails()
        .stderr_has("unrecognized hook event");
}

#[test]
fn hook_handler_without_pane_env_fails() {
    let project = Project::empty();
    project
        .claude_matrix()
        .args(&["hook-handler", "--from=stop"])
        .stdin("{}")
        .fails()
        .stderr_has("TMUX_PANE");
}

#[test]
fn rename_with_blank_title_fails() {
    let project = Project::empty();
    project
        .claude_matrix()
        .args(&["rename", "   "])
        .stdin("")
        .fails();
}
