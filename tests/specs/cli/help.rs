// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_sections() {
    cli()
        .passes()
        .stdout_has("Usage:")
        .stdout_has("Sessions:")
        .stdout_has("Repositories:")
        .stdout_has("System:");
}

#[test]
fn help_flag_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn top_level_help_lists_documented_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("create")
        .stdout_has("list")
        .stdout_has("list-repos")
        .stdout_has("rename")
        .stdout_has("refresh")
        .stdout_has("diagnose")
        .stdout_has("setup-hooks")
        .stdout_has("remove-hooks")
        .stdout_has("version")
        .stdout_lacks("hook-handler");
}

#[test]
fn list_repos_help_documents_force_refresh() {
    cli()
        .args(&["list-repos", "--help"])
        .passes()
        .stdout_has("--force-refresh");
}
