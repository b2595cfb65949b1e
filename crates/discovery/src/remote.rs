// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote-API repo source: paginated fetch, TTL cache, stale fallback.

use crate::cache::{CachedRepos, DiscoveryCache};
use crate::{Source, SourceError};
use async_trait::async_trait;
use cm_core::{Repository, RepositorySource};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("authentication failed")]
    Auth,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("cancelled")]
    Cancelled,
}

/// One page of remote repositories.
pub struct Page {
    pub repos: Vec<Repository>,
}

/// Abstracts the paginated remote endpoint so the source is testable without
/// a live network call.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        ctx: &CancellationToken,
    ) -> Result<Page, FetchError>;
}

/// `reqwest`-backed fetcher for a token-authenticated paginated listing.
pub struct HttpRemoteFetcher {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl HttpRemoteFetcher {
    pub fn new(api_base: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            token,
        }
    }
}

#[derive(serde::Deserialize)]
struct ApiRepo {
    full_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    clone_url: Option<String>,
    #[serde(default)]
    ssh_url: Option<String>,
}

#[async_trait]
impl RemoteFetcher for HttpRemoteFetcher {
    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        ctx: &CancellationToken,
    ) -> Result<Page, FetchError> {
        if ctx.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let response = self
            .client
            .get(format!("{}/user/repos", self.api_base))
            .bearer_auth(&self.token)
            .query(&[("page", page.to_string()), ("per_page", page_size.to_string())])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        match response.status().as_u16() {
            200 => {}
            401 | 403 => return Err(FetchError::Auth),
            other => return Err(FetchError::Status(other)),
        }

        let body: Vec<ApiRepo> = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        let repos = body
            .into_iter()
            .map(|r| Repository {
                source: RepositorySource::Remote,
                url: r
                    .clone_url
                    .or(r.ssh_url)
                    .unwrap_or_else(|| r.full_name.clone()),
                description: r.description.unwrap_or_default(),
                name: r.full_name,
                is_workspace: false,
                workspace_urls: Vec::new(),
            })
            .collect();

        Ok(Page { repos })
    }
}

pub struct RemoteSource<F: RemoteFetcher> {
    source_name: String,
    fetcher: F,
    cache_dir: PathBuf,
    page_size: u32,
    ttl_secs: u64,
    orgs: Vec<String>,
    force_refresh: AtomicBool,
    now_secs: Box<dyn Fn() -> u64 + Send + Sync>,
}

impl<F: RemoteFetcher> RemoteSource<F> {
    pub fn new(
        source_name: impl Into<String>,
        fetcher: F,
        cache_dir: PathBuf,
        page_size: u32,
        ttl_secs: u64,
        orgs: Vec<String>,
        now_secs: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            fetcher,
            cache_dir,
            page_size,
            ttl_secs,
            orgs: orgs.into_iter().map(|o| o.to_lowercase()).collect(),
            force_refresh: AtomicBool::new(false),
            now_secs: Box::new(now_secs),
        }
    }

    pub fn set_force_refresh(&self, force: bool) {
        self.force_refresh.store(force, Ordering::SeqCst);
    }

    fn org_filter(&self, repos: Vec<Repository>) -> Vec<Repository> {
        if self.orgs.is_empty() {
            return repos;
        }
        repos
            .into_iter()
            .filter(|r| match r.name.split_once('/') {
                Some((org, _)) => self.orgs.contains(&org.to_lowercase()),
                None => false,
            })
            .collect()
    }

    async fn fetch_all(&self, ctx: &CancellationToken) -> Result<Vec<Repository>, FetchError> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let result = self.fetcher.fetch_page(page, self.page_size, ctx).await?;
            let count = result.repos.len();
            all.extend(result.repos);
            if count < self.page_size as usize {
                break;
            }
            page += 1;
        }
        Ok(all)
    }
}

#[async_trait]
impl<F: RemoteFetcher> Source for RemoteSource<F> {
    fn name(&self) -> &str {
        &self.source_name
    }

    async fn list(&self, ctx: &CancellationToken) -> Result<Vec<Repository>, SourceError> {
        let cache = DiscoveryCache::new(&self.cache_dir, &self.source_name);
        let force_refresh = self.force_refresh.load(Ordering::SeqCst);

        if !force_refresh {
            if let Ok(Some(entry)) = cache.read().await {
                let now = (self.now_secs)();
                if DiscoveryCache::is_fresh(&entry, now, self.ttl_secs) {
                    return Ok(self.org_filter(entry.repos));
                }
            }
        }

        match self.fetch_all(ctx).await {
            Ok(repos) => {
                let entry = CachedRepos {
                    timestamp: (self.now_secs)(),
                    repos: repos.clone(),
                };
                if let Err(e) = cache.write(&entry).await {
                    tracing::warn!(source = %self.source_name, error = %e, "failed to write discovery cache");
                }
                Ok(self.org_filter(repos))
            }
            Err(FetchError::Cancelled) => Err(SourceError::Cancelled),
            Err(fetch_err) => match cache.read().await {
                Ok(Some(entry)) => {
                    tracing::warn!(
                        source = %self.source_name,
                        error = %fetch_err,
                        "remote fetch failed, falling back to stale cache"
                    );
                    Ok(self.org_filter(entry.repos))
                }
                _ => Err(SourceError::Failed {
                    source_name: self.source_name.clone(),
                    message: fetch_err.to_string(),
                }),
            },
        }
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
