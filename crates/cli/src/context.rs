// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires [`Config`] to the concrete store/adapter instances used by every
//! command handler. Constructed once at startup and threaded through
//! dispatch as an explicit parameter rather than held in globals.

use std::path::PathBuf;

use cm_adapters::{FzfAdapter, TmuxAdapter};
use cm_core::{Clock, Config, SystemClock};
use cm_discovery::{Discoverer, HttpRemoteFetcher, LocalSource, RemoteSource, Source, WorkspaceSource};
use cm_git::{MirrorCache, SystemGitRunner};
use cm_state::AgentStateStore;
use cm_store::SessionStore;
use tokio_util::sync::CancellationToken;

/// Everything a command handler needs: resolved config, the persistence
/// layers, and the external-process adapters, plus a cancellation token tied
/// to the process's Ctrl-C / SIGTERM handling.
pub struct AppContext {
    pub config: Config,
    pub session_store: SessionStore,
    pub state_store: AgentStateStore,
    pub mirror_cache: MirrorCache<SystemGitRunner>,
    pub session_adapter: TmuxAdapter,
    pub fuzzy: FzfAdapter,
    pub clock: SystemClock,
    pub ctx: CancellationToken,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let mirror_cache = MirrorCache::new(SystemGitRunner::new(), config.mirror_dir.clone());
        Self {
            session_store: SessionStore::new(config.session_dir.clone()),
            state_store: AgentStateStore::new(config.state_dir.clone()),
            mirror_cache,
            session_adapter: TmuxAdapter::new(),
            fuzzy: FzfAdapter,
            clock: SystemClock,
            ctx: CancellationToken::new(),
            config,
        }
    }

    pub fn now(&self) -> u64 {
        self.clock.now_secs()
    }

    /// Local-file, workspace-file, and (when a token is configured)
    /// remote-API sources, in that order — the order discovery preserves
    /// when deduplicating by identifier. `force_refresh` bypasses the
    /// remote source's TTL cache without deleting it from disk.
    pub fn discoverer(&self, force_refresh: bool) -> Discoverer {
        let mut sources: Vec<Box<dyn Source>> = vec![
            Box::new(LocalSource::new(self.local_repos_path())),
            Box::new(WorkspaceSource::new(self.workspaces_path())),
        ];
        if let Some(token) = self.config.remote_token.clone() {
            let fetcher = HttpRemoteFetcher::new(self.config.remote_api_base.clone(), token);
            let remote = RemoteSource::new(
                "remote",
                fetcher,
                self.config.cache_dir.clone(),
                self.config.remote_page_size,
                self.config.cache_ttl_secs,
                self.config.remote_orgs.clone(),
                || SystemClock.now_secs(),
            );
            remote.set_force_refresh(force_refresh);
            sources.push(Box::new(remote));
        }
        Discoverer::new(sources)
    }

    fn local_repos_path(&self) -> PathBuf {
        self.config.home.join(".claude-matrix").join("repos.txt")
    }

    fn workspaces_path(&self) -> PathBuf {
        self.config
            .home
            .join(".claude-matrix")
            .join("workspaces.yaml")
    }

    /// Path to the remote source's discovery cache file, used by `refresh`
    /// to force a re-fetch by deleting it outright.
    pub fn remote_cache_path(&self) -> PathBuf {
        self.config.cache_dir.join("remote-repos.json")
    }
}
