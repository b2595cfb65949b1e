// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented local repo file source.

use crate::{Source, SourceError};
use async_trait::async_trait;
use cm_core::{extract_repo_name, Repository, RepositorySource};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Source for LocalSource {
    fn name(&self) -> &str {
        "local"
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
        Ok(parse_local_file(&text))
    }
}

/// Parse each non-empty, non-comment line as `<url>` or `<url>:<description>`.
fn parse_local_file(text: &str) -> Vec<Repository> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let (url, description) = split_url_and_description(line);
            Repository {
                source: RepositorySource::Local,
                name: extract_repo_name(&url),
                url,
                description,
                is_workspace: false,
                workspace_urls: Vec::new(),
            }
        })
        .collect()
}

/// Split a line into `(url, description)`, distinguishing:
/// - an SSH path form (`git@host:owner/repo[:description]`): the first two
///   colon-separated fields make up the URL.
/// - an HTTPS/HTTP form: the description separator is the first colon after
///   the `://` marker.
/// - a bare path: no description is possible.
fn split_url_and_description(line: &str) -> (String, String) {
    if let Some(proto_end) = line.find("://") {
        let rest = &line[proto_end + 3..];
        if let Some(colon) = rest.find(':') {
            let split_at = proto_end + 3 + colon;
            return (
                line[..split_at].to_string(),
                line[split_at + 1..].to_string(),
            );
        }
        return (line.to_string(), String::new());
    }

    if line.starts_with("git@") || (line.contains('@') && line.contains(':')) {
        let parts: Vec<&str> = line.splitn(3, ':').collect();
        return match parts.as_slice() {
            [host, path, description] => {
                (format!("{host}:{path}"), description.to_string())
            }
            [host, path] => (format!("{host}:{path}"), String::new()),
            _ => (line.to_string(), String::new()),
        };
    }

    (line.to_string(), String::new())
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
