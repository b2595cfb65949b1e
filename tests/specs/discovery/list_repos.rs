// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `list-repos` specs, exercising the local-file discovery source end to end
//! through the real binary (no remote token configured, so only `local` and
//! `workspace` sources are consulted — deterministic, no network).

use crate::prelude::*;

#[test]
fn with_no_sources_configured_prints_empty_message() {
    let project = Project::empty();
    project
        .claude_matrix()
        .args(&["list-repos"])
        .passes()
        .stdout_has("No repositories discovered.");
}

#[test]
fn lists_a_single_local_repo() {
    let project = Project::empty();
    project.repos_file("https://example.invalid/org/repo:Example\n");

    project
        .claude_matrix()
        .args(&["list-repos"])
        .passes()
        .stdout_has("org/repo");
}

#[test]
fn ignores_comments_and_blank_lines_in_the_local_file() {
    let project = Project::empty();
    project.repos_file(
        "\
# a comment
https://example.invalid/org/repo:Example

  # indented comment
",
    );

    project
        .claude_matrix()
        .args(&["list-repos"])
        .passes()
        .stdout_has("org/repo")
        .stdout_lacks("# a comment");
}

#[test]
fn dedups_the_same_url_listed_twice() {
    let project = Project::empty();
    project.repos_file(
        "\
https://example.invalid/org/repo:Example
https://example.invalid/org/repo:Example again
",
    );

    let stdout = project
        .claude_matrix()
        .args(&["list-repos"])
        .passes()
        .stdout();
    assert_eq!(
        stdout.matches("org/repo").count(),
        1,
        "expected one deduped data line, got:\n{stdout}"
    );
}

#[test]
fn lists_a_workspace_alongside_single_repos() {
    let project = Project::empty();
    project.repos_file("https://example.invalid/org/solo:Solo repo\n");
    project.workspaces_file(
        "\
workspaces:
  my-workspace:
    repos:
      - https://example.invalid/org/a
      - https://example.invalid/org/b
",
    );

    project
        .claude_matrix()
        .args(&["list-repos"])
        .passes()
        .stdout_has("org/solo")
        .stdout_has("my-workspace");
}

#[test]
fn force_refresh_flag_is_accepted_with_only_local_sources() {
    // force_refresh only affects the remote source's TTL cache; with no
    // token configured there is no remote source, so this is a no-op that
    // must still succeed rather than erroring on the unused flag.
    let project = Project::empty();
    project.repos_file("https://example.invalid/org/repo:Example\n");

    project
        .claude_matrix()
        .args(&["list-repos", "--force-refresh"])
        .passes()
        .stdout_has("org/repo");
}
