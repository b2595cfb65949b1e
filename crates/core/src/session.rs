// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent session metadata.
//!
//! One [`Session`] is stored per file in the session directory, filename
//! `<name>.json`. `title` is a current-schema cosmetic override written by
//! `rename`; legacy records that predate it are read the same way an absent
//! `title` would be — it never participates in identity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// tmux-safe identifier, matches `[a-z0-9_-]{1,50}`. Equals the filename
    /// stem and the clone-path basename.
    pub name: String,
    /// Populated for single-repo sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    /// Populated for workspace sessions. Non-empty iff `is_workspace`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repo_urls: Vec<String>,
    #[serde(default)]
    pub is_workspace: bool,
    pub clone_path: String,
    pub created_at: u64,
    /// Cosmetic display-name override, set by `rename`. Never used to
    /// reconstruct identity, filenames, or clone paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Session {
    pub fn single_repo(name: String, repo_url: String, clone_path: String, created_at: u64) -> Self {
        Self {
            name,
            repo_url: Some(repo_url),
            repo_urls: Vec::new(),
            is_workspace: false,
            clone_path,
            created_at,
            title: None,
        }
    }

    pub fn workspace(
        name: String,
        repo_urls: Vec<String>,
        clone_path: String,
        created_at: u64,
    ) -> Self {
        Self {
            name,
            repo_url: None,
            repo_urls,
            is_workspace: true,
            clone_path,
            created_at,
            title: None,
        }
    }

    /// The fuzzy-finder/tmux-facing selection identifier for this session's
    /// origin repository, mirroring [`crate::Repository::identifier`].
    pub fn repo_identifier(&self) -> String {
        if self.is_workspace {
            format!("workspace:{}", self.name)
        } else {
            self.repo_url.clone().unwrap_or_default()
        }
    }

    /// The display name shown in the SESSION column: the cosmetic `title` if
    /// set, else the canonical `name`.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
