// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config schema and precedence resolution: CLI flags > environment
//! variables > config file > compiled defaults.
//!
//! The config file and environment are merged here; CLI-flag overrides are
//! applied on top by the binary crate, which is the only layer that knows
//! about `clap::ArgMatches`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Resolved configuration, threaded through the command dispatch as an
/// explicit parameter rather than read from globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home: PathBuf,
    pub clone_root: PathBuf,
    pub session_dir: PathBuf,
    pub state_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub mirror_dir: PathBuf,
    pub stale_threshold_secs: u64,
    pub cache_ttl_secs: u64,
    pub remote_page_size: u32,
    pub remote_orgs: Vec<String>,
    pub remote_api_base: String,
    pub remote_token: Option<String>,
    pub assistant_cmd: Option<String>,
    pub debug: bool,
}

/// Deserializable shape of the on-disk config file. Every field is optional:
/// an absent key simply leaves the default (or environment override) as-is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
struct FileConfig {
    clone_root: Option<String>,
    session_dir: Option<String>,
    state_dir: Option<String>,
    cache_dir: Option<String>,
    mirror_dir: Option<String>,
    stale_threshold_secs: Option<u64>,
    cache_ttl_secs: Option<u64>,
    remote_page_size: Option<u32>,
    remote_orgs: Option<Vec<String>>,
    remote_api_base: Option<String>,
    assistant_cmd: Option<String>,
}

const ENV_PREFIX: &str = "TMUX_CLAUDE_MATRIX_";

impl Config {
    /// Compiled defaults, rooted at `home`.
    pub fn defaults(home: PathBuf) -> Self {
        let base = home.join(".claude-matrix");
        Self {
            clone_root: home.join("claude-matrix-repos"),
            session_dir: base.join("sessions"),
            state_dir: base.join("state"),
            cache_dir: base.join("cache"),
            mirror_dir: base.join("cache").join("mirrors"),
            stale_threshold_secs: 600,
            cache_ttl_secs: 3600,
            remote_page_size: 100,
            remote_orgs: Vec::new(),
            remote_api_base: "https://api.github.com".to_string(),
            remote_token: None,
            assistant_cmd: Some("claude".to_string()),
            debug: false,
            home,
        }
    }

    /// The two config-file candidate paths, first-existing-wins: the
    /// `config.toml` under `state_dir`'s parent (i.e. `~/.claude-matrix/`),
    /// then `$HOME/.config/claude-matrix/config.toml`.
    pub fn candidate_paths(home: &Path) -> [PathBuf; 2] {
        [
            home.join(".claude-matrix").join("config.toml"),
            home.join(".config")
                .join("claude-matrix")
                .join("config.toml"),
        ]
    }

    /// Resolve defaults → file → environment. CLI-flag overrides (the
    /// highest-precedence layer) are applied by the caller afterward.
    pub fn resolve(home: PathBuf, env: &dyn Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::defaults(home.clone());

        for path in Self::candidate_paths(&home) {
            if let Ok(text) = std::fs::read_to_string(&path) {
                if let Ok(file_cfg) = toml::from_str::<FileConfig>(&text) {
                    cfg.apply_file(file_cfg);
                }
                break;
            }
        }

        cfg.apply_env(env);
        cfg
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(v) = file.clone_root {
            self.clone_root = PathBuf::from(v);
        }
        if let Some(v) = file.session_dir {
            self.session_dir = PathBuf::from(v);
        }
        if let Some(v) = file.state_dir {
            self.state_dir = PathBuf::from(v);
        }
        if let Some(v) = file.cache_dir {
            self.cache_dir = PathBuf::from(v);
        }
        if let Some(v) = file.mirror_dir {
            self.mirror_dir = PathBuf::from(v);
        }
        if let Some(v) = file.stale_threshold_secs {
            self.stale_threshold_secs = v;
        }
        if let Some(v) = file.cache_ttl_secs {
            self.cache_ttl_secs = v;
        }
        if let Some(v) = file.remote_page_size {
            self.remote_page_size = v;
        }
        if let Some(v) = file.remote_orgs {
            self.remote_orgs = v;
        }
        if let Some(v) = file.remote_api_base {
            self.remote_api_base = v;
        }
        if let Some(v) = file.assistant_cmd {
            self.assistant_cmd = Some(v);
        }
    }

    /// Apply `TMUX_CLAUDE_MATRIX_*` overrides. Empty strings are treated as
    /// unset. Invalid numeric values fall back to the prior layer's value
    /// rather than failing startup.
    fn apply_env(&mut self, env: &dyn Fn(&str) -> Option<String>) {
        let get = |key: &str| env(&format!("{ENV_PREFIX}{key}")).filter(|v| !v.is_empty());

        if let Some(v) = get("CLONE_ROOT") {
            self.clone_root = PathBuf::from(v);
        }
        if let Some(v) = get("SESSION_DIR") {
            self.session_dir = PathBuf::from(v);
        }
        if let Some(v) = get("STATE_DIR") {
            self.state_dir = PathBuf::from(v);
        }
        if let Some(v) = get("CACHE_DIR") {
            self.cache_dir = PathBuf::from(v);
        }
        if let Some(v) = get("MIRROR_DIR") {
            self.mirror_dir = PathBuf::from(v);
        }
        if let Some(v) = get("STALE_THRESHOLD_SECS") {
            if let Ok(n) = v.parse() {
                self.stale_threshold_secs = n;
            }
        }
        if let Some(v) = get("CACHE_TTL_SECS") {
            if let Ok(n) = v.parse() {
                self.cache_ttl_secs = n;
            }
        }
        if let Some(v) = get("REMOTE_PAGE_SIZE") {
            if let Ok(n) = v.parse() {
                self.remote_page_size = n;
            }
        }
        if let Some(v) = get("REMOTE_ORGS") {
            self.remote_orgs = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(v) = get("REMOTE_API_BASE") {
            self.remote_api_base = v;
        }
        if let Some(v) = get("ASSISTANT_CMD") {
            self.assistant_cmd = Some(v);
        }
        if let Some(v) = get("DEBUG") {
            self.debug = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(v) = get("TOKEN") {
            self.remote_token = Some(v);
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
