// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Abstraction over the `git` subprocess so the mirror cache is testable
//! without a real git binary.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Default timeout for a single `git` invocation. Mirror clones and fetches
/// can legitimately take a while on a cold cache or a large repository.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to launch git: {0}")]
    Spawn(String),

    #[error("git {0} failed: {1}")]
    CommandFailed(String, String),

    #[error("git {0} timed out after {1}s")]
    TimedOut(String, u64),
}

#[async_trait]
pub trait GitRunner: Send + Sync {
    async fn clone_mirror(&self, url: &str, dest: &Path) -> Result<(), GitError>;
    async fn fetch_all_prune(&self, mirror_path: &Path) -> Result<(), GitError>;
    async fn clone_with_reference(
        &self,
        url: &str,
        reference: &Path,
        dest: &Path,
    ) -> Result<(), GitError>;
    async fn clone_plain(&self, url: &str, dest: &Path) -> Result<(), GitError>;
}

#[derive(Clone, Default)]
pub struct SystemGitRunner;

impl SystemGitRunner {
    pub fn new() -> Self {
        Self
    }
}

async fn run(args: &[&str], label: &str) -> Result<(), GitError> {
    let output = match tokio::time::timeout(GIT_TIMEOUT, Command::new("git").args(args).output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(GitError::Spawn(e.to_string())),
        Err(_elapsed) => {
            return Err(GitError::TimedOut(label.to_string(), GIT_TIMEOUT.as_secs()))
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(GitError::CommandFailed(label.to_string(), stderr));
    }
    Ok(())
}

#[async_trait]
impl GitRunner for SystemGitRunner {
    async fn clone_mirror(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let dest_str = dest.to_string_lossy().to_string();
        run(
            &["clone", "--mirror", url, &dest_str],
            "clone --mirror",
        )
        .await
    }

    async fn fetch_all_prune(&self, mirror_path: &Path) -> Result<(), GitError> {
        let path_str = mirror_path.to_string_lossy().to_string();
        run(
            &["-C", &path_str, "fetch", "--all", "--prune"],
            "fetch --all --prune",
        )
        .await
    }

    async fn clone_with_reference(
        &self,
        url: &str,
        reference: &Path,
        dest: &Path,
    ) -> Result<(), GitError> {
        let ref_str = reference.to_string_lossy().to_string();
        let dest_str = dest.to_string_lossy().to_string();
        run(
            &["clone", "--reference", &ref_str, url, &dest_str],
            "clone --reference",
        )
        .await
    }

    async fn clone_plain(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let dest_str = dest.to_string_lossy().to_string();
        run(&["clone", url, &dest_str], "clone").await
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
