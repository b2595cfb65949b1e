// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregates multiple [`Source`]s into one deduplicated repo listing.

use crate::{Source, SourceError};
use cm_core::Repository;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

/// Calls each configured source in order, concatenates results, and drops
/// duplicate URLs (keeping the first occurrence). A source that fails with a
/// non-cancellation error is skipped and logged; the whole call fails only if
/// every source fails, or if the context is cancelled.
pub struct Discoverer {
    sources: Vec<Box<dyn Source>>,
}

impl Discoverer {
    pub fn new(sources: Vec<Box<dyn Source>>) -> Self {
        Self { sources }
    }

    pub async fn list(&self, ctx: &CancellationToken) -> Result<Vec<Repository>, SourceError> {
        if ctx.is_cancelled() {
            return Err(SourceError::Cancelled);
        }

        let mut merged = Vec::new();
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut failures = Vec::new();

        for source in &self.sources {
            if ctx.is_cancelled() {
                return Err(SourceError::Cancelled);
            }

            match source.list(ctx).await {
                Ok(repos) => {
                    for repo in repos {
                        let key = repo.identifier();
                        if repo.is_workspace || seen_urls.insert(key) {
                            merged.push(repo);
                        }
                    }
                }
                Err(SourceError::Cancelled) => return Err(SourceError::Cancelled),
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "discovery source failed");
                    failures.push(e);
                }
            }
        }

        if merged.is_empty() && !failures.is_empty() && failures.len() == self.sources.len() {
            return Err(SourceError::Failed {
                source_name: "discoverer".to_string(),
                message: failures
                    .into_iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            });
        }

        Ok(merged)
    }
}

#[cfg(test)]
#[path = "discoverer_tests.rs"]
mod tests;
