// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk TTL cache for a single remote source's repo listing.

use cm_core::Repository;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid cache json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRepos {
    pub timestamp: u64,
    pub repos: Vec<Repository>,
}

/// Reads and writes `<cache_dir>/<source-name>-repos.json`.
pub struct DiscoveryCache {
    path: PathBuf,
}

impl DiscoveryCache {
    pub fn new(cache_dir: &Path, source_name: &str) -> Self {
        Self {
            path: cache_dir.join(format!("{source_name}-repos.json")),
        }
    }

    pub async fn read(&self) -> Result<Option<CachedRepos>, CacheError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write(&self, entry: &CachedRepos) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(entry)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    pub fn is_fresh(entry: &CachedRepos, now: u64, ttl_secs: u64) -> bool {
        now.saturating_sub(entry.timestamp) < ttl_secs
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
