// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable repo name derivation, shared by the discovery local-file
//! source and the git mirror cache so both agree on what a URL "is called".

/// Derive a human display name from a URL: `org/repo` for recognizable
/// two-segment paths, the single trailing segment otherwise.
///
/// Idempotent under repeated application: `extract_repo_name` of an already
/// `org/repo`-shaped string returns the same string.
pub fn extract_repo_name(url: &str) -> String {
    let trimmed = url.trim_end_matches('/').trim_end_matches(".git");
    let tail: Vec<&str> = trimmed.rsplit(['/', ':']).take(2).collect();
    match tail.len() {
        2 => format!("{}/{}", tail[1], tail[0]),
        1 => tail[0].to_string(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
#[path = "repo_name_tests.rs"]
mod tests;
