// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content-addressed bare-mirror store, used as a `--reference` source for
//! fast clones.

use crate::runner::{GitError, GitRunner};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

pub struct MirrorCache<R: GitRunner> {
    runner: R,
    mirror_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorStatus {
    Created,
    Updated,
}

impl<R: GitRunner> MirrorCache<R> {
    pub fn new(runner: R, mirror_dir: PathBuf) -> Self {
        Self { runner, mirror_dir }
    }

    /// Filesystem-safe derivation of a mirror's directory name: lowercase,
    /// strip protocol and `.git`, replace path separators and anything
    /// outside `[a-z0-9._-]` with `-`.
    pub fn derived_name(url: &str) -> String {
        let lower = url.to_lowercase();
        let without_proto = lower
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&lower);
        let without_suffix = without_proto.strip_suffix(".git").unwrap_or(without_proto);
        without_suffix
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect()
    }

    fn mirror_path(&self, url: &str) -> PathBuf {
        self.mirror_dir.join(Self::derived_name(url))
    }

    pub fn mirror_exists(&self, url: &str) -> bool {
        self.mirror_path(url).is_dir()
    }

    pub async fn create_mirror(&self, url: &str) -> Result<(), GitError> {
        let dest = self.mirror_path(url);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| GitError::CommandFailed("mkdir".to_string(), e.to_string()))?;
        }
        self.runner.clone_mirror(url, &dest).await
    }

    pub async fn update_mirror(&self, url: &str) -> Result<(), GitError> {
        let dest = self.mirror_path(url);
        self.runner.fetch_all_prune(&dest).await
    }

    /// Creates the mirror if absent, else updates it. Returns whether
    /// creation (rather than update) occurred.
    pub async fn ensure_mirror(&self, url: &str) -> Result<MirrorStatus, GitError> {
        if self.mirror_exists(url) {
            self.update_mirror(url).await?;
            Ok(MirrorStatus::Updated)
        } else {
            self.create_mirror(url).await?;
            Ok(MirrorStatus::Created)
        }
    }

    /// Ensures the mirror, then clones from it with `--reference`. Falls
    /// back to a direct clone if the mirror step fails — the mirror is an
    /// optimization, not a correctness requirement.
    pub async fn clone_with_cache(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let mirror_path = self.mirror_path(url);
        match self.ensure_mirror(url).await {
            Ok(_) => self.runner.clone_with_reference(url, &mirror_path, dest).await,
            Err(e) => {
                tracing::warn!(url, error = %e, "mirror ensure failed, falling back to direct clone");
                self.runner.clone_plain(url, dest).await
            }
        }
    }

    /// Runs `ensure_mirror` sequentially over a deduplicated URL set,
    /// checking for cancellation between each. Progress is reported via
    /// `on_progress(index, total, url, outcome)`.
    pub async fn bulk_prefill(
        &self,
        urls: Vec<String>,
        ctx: &CancellationToken,
        mut on_progress: impl FnMut(usize, usize, &str, &BulkPrefillOutcome),
    ) -> BulkPrefillReport {
        let mut seen = HashSet::new();
        let deduped: Vec<String> = urls.into_iter().filter(|u| seen.insert(u.clone())).collect();
        let total = deduped.len();

        let mut report = BulkPrefillReport::default();
        for (index, url) in deduped.iter().enumerate() {
            if ctx.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let outcome = match self.ensure_mirror(url).await {
                Ok(MirrorStatus::Created) => {
                    report.created += 1;
                    BulkPrefillOutcome::Created
                }
                Ok(MirrorStatus::Updated) => {
                    report.updated += 1;
                    BulkPrefillOutcome::Updated
                }
                Err(e) => {
                    report.failed += 1;
                    BulkPrefillOutcome::Failed(e.to_string())
                }
            };

            on_progress(index + 1, total, url, &outcome);
        }

        report
    }
}

#[derive(Debug, Clone)]
pub enum BulkPrefillOutcome {
    Created,
    Updated,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct BulkPrefillReport {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub cancelled: bool,
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod tests;
