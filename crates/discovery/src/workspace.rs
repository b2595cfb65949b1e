// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! YAML workspace-file source: named groups of repos cloned together.

use crate::{Source, SourceError};
use async_trait::async_trait;
use cm_core::{Repository, RepositorySource};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
struct WorkspacesFile {
    #[serde(default)]
    workspaces: BTreeMap<String, WorkspaceEntry>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceEntry {
    #[serde(default)]
    repos: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

pub struct WorkspaceSource {
    path: PathBuf,
}

impl WorkspaceSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Source for WorkspaceSource {
    fn name(&self) -> &str {
        "workspace"
    }

    async fn list(&self, ctx: &CancellationToken) -> Result<Vec<Repository>, SourceError> {
        if ctx.is_cancelled() {
            return Err(SourceError::Cancelled);
        }
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SourceError::Failed {
                    source_name: self.name().to_string(),
                    message: e.to_string(),
                })
            }
        };

        let parsed: WorkspacesFile = serde_yml::from_str(&text).map_err(|e| SourceError::Failed {
            source_name: self.name().to_string(),
            message: e.to_string(),
        })?;

        Ok(parsed
            .workspaces
            .into_iter()
            .filter(|(_, entry)| !entry.repos.is_empty())
            .map(|(name, entry)| {
                let count = entry.repos.len();
                Repository {
                    source: RepositorySource::Workspace,
                    url: String::new(),
                    description: entry
                        .description
                        .unwrap_or_else(|| format!("{count} repos")),
                    name,
                    is_workspace: true,
                    workspace_urls: entry.repos,
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
