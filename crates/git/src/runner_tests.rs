// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn command_failed_error_includes_label_and_stderr() {
    let err = GitError::CommandFailed("clone --mirror".to_string(), "fatal: repo not found".to_string());
    let message = err.to_string();
    assert!(message.contains("clone --mirror"));
    assert!(message.contains("fatal: repo not found"));
}

#[tokio::test]
async fn clone_plain_against_missing_git_binary_reports_spawn_error() {
    // Exercised against a PATH with no git binary; the real system runner is
    // only meaningfully tested in integration specs where git is guaranteed
    // present, so here we assert the shape of the spawn-failure path via a
    // runner pointed at a nonexistent destination that git itself will reject
    // before ever reaching the network.
    let runner = SystemGitRunner::new();
    let dest = std::path::Path::new("/nonexistent/parent/does/not/exist/dest");
    let result = runner
        .clone_plain("https://example.invalid/org/repo.git", dest)
        .await;
    assert!(result.is_err());
}
