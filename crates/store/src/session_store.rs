// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One JSON file per [`Session`], keyed by name, in a configured directory.

use cm_core::{sanitize_name, Session};
use std::path::PathBuf;
use thiserror::Error;

const EXTENSION: &str = "json";
const MAX_NAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session json in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not generate a unique session name from {base:?} after {attempts} attempts")]
    NameExhausted { base: String, attempts: u32 },
}

pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}"))
    }

    pub async fn save(&self, session: &Session) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(&session.name);
        let bytes = serde_json::to_vec_pretty(session).map_err(|e| StoreError::Json {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let tmp_path = path.with_extension(format!("{EXTENSION}.tmp"));
        tokio::fs::write(&tmp_path, &bytes).await?;
        tokio::fs::rename(&tmp_path, &path).await?;
        Ok(())
    }

    pub async fn load(&self, name: &str) -> Result<Session, StoreError> {
        let path = self.path_for(name);
        let bytes = tokio::fs::read(&path).await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Json {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub async fn list(&self) -> Result<Vec<Session>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut sessions = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match tokio::fs::read(&path).await {
                Ok(bytes) => match serde_json::from_slice::<Session>(&bytes) {
                    Ok(session) => sessions.push(session),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping unreadable session file");
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable session file");
                }
            }
        }
        Ok(sessions)
    }

    pub async fn delete(&self, name: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, name: &str) -> bool {
        tokio::fs::metadata(self.path_for(name)).await.is_ok()
    }

    /// Sanitizes `base`, then appends `-1`, `-2`, … on collision up to
    /// [`MAX_NAME_ATTEMPTS`].
    pub async fn generate_unique_name(&self, base: &str) -> Result<String, StoreError> {
        let sanitized = sanitize_name(base);
        let candidate_base = if sanitized.is_empty() {
            "session".to_string()
        } else {
            sanitized
        };

        if !self.exists(&candidate_base).await {
            return Ok(candidate_base);
        }

        for suffix in 1..=MAX_NAME_ATTEMPTS {
            let candidate = truncate_with_suffix(&candidate_base, suffix);
            if !self.exists(&candidate).await {
                return Ok(candidate);
            }
        }

        Err(StoreError::NameExhausted {
            base: candidate_base,
            attempts: MAX_NAME_ATTEMPTS,
        })
    }
}

fn truncate_with_suffix(base: &str, suffix: u32) -> String {
    let suffix_str = format!("-{suffix}");
    let max_base_len = 50usize.saturating_sub(suffix_str.len());
    let truncated: String = base.chars().take(max_base_len).collect();
    format!("{truncated}{suffix_str}")
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
