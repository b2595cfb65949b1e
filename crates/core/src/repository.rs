// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The repository record produced by every discovery [`Source`](crate) and
//! consumed by the selection UI and creation flow.

use serde::{Deserialize, Serialize};

/// Where a [`Repository`] was discovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositorySource {
    Local,
    Remote,
    Workspace,
}

impl RepositorySource {
    pub fn as_str(self) -> &'static str {
        match self {
            RepositorySource::Local => "local",
            RepositorySource::Remote => "remote",
            RepositorySource::Workspace => "workspace",
        }
    }
}

/// A single selectable entry in the creation-flow picker: either a standalone
/// repo (`is_workspace = false`) or a named collection of repos cloned
/// together (`is_workspace = true`, `workspace_urls` non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub source: RepositorySource,
    pub url: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_workspace: bool,
    #[serde(default)]
    pub workspace_urls: Vec<String>,
}

impl Repository {
    /// The string used to re-locate this entry after a fuzzy-finder round
    /// trip: the URL for ordinary repos, `workspace:<name>` for workspaces.
    pub fn identifier(&self) -> String {
        if self.is_workspace {
            format!("workspace:{}", self.name)
        } else {
            self.url.clone()
        }
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
