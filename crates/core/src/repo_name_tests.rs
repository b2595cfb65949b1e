// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[test]
fn https_url_yields_org_repo() {
    assert_eq!(
        extract_repo_name("https://example.invalid/org/repo"),
        "org/repo"
    );
}

#[test]
fn strips_dot_git_suffix() {
    assert_eq!(
        extract_repo_name("https://example.invalid/org/repo.git"),
        "org/repo"
    );
}

#[test]
fn ssh_form_yields_org_repo() {
    assert_eq!(extract_repo_name("git@host:org/repo.git"), "org/repo");
}

#[test]
fn single_segment_path() {
    assert_eq!(extract_repo_name("repo"), "repo");
}

#[test]
fn strips_trailing_slash() {
    assert_eq!(
        extract_repo_name("https://example.invalid/org/repo/"),
        "org/repo"
    );
}

proptest! {
    #[test]
    fn idempotent_under_repeated_calls(url in "[a-zA-Z0-9/:@._-]{1,80}") {
        let once = extract_repo_name(&url);
        let twice = extract_repo_name(&once);
        prop_assert_eq!(once, twice);
    }
}
