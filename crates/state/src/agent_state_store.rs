// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory-locked, atomically-written per-session agent state files.

use cm_core::{AgentState, StateFile};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid state json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lock acquisition failed: {0}")]
    Lock(String),

    #[error("background task panicked")]
    TaskPanicked,
}

pub struct AgentStateStore {
    dir: PathBuf,
}

impl AgentStateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn state_path(&self, session: &str) -> PathBuf {
        self.dir.join(format!("{session}.json"))
    }

    fn lock_path(&self, session: &str) -> PathBuf {
        self.dir.join(format!("{session}.lock"))
    }

    /// Set `agents[agent_id] = {state, now}` under an exclusive lock,
    /// tolerating a legacy single-state file on read.
    pub async fn update_agent(
        &self,
        session: String,
        agent_id: String,
        state: AgentState,
        now: u64,
    ) -> Result<(), StateStoreError> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || {
            let store = AgentStateStore::new(dir);
            let state_path = store.state_path(&session);
            let lock_path = store.lock_path(&session);
            let _guard = acquire_lock(&lock_path)?;

            std::fs::create_dir_all(&store.dir)?;
            let mut file = read_state_file(&state_path)?;
            file.agents.insert(
                agent_id,
                cm_core::AgentStateEntry {
                    state,
                    updated_at: now,
                },
            );
            write_state_file_atomic(&state_path, &file)
        })
        .await
        .map_err(|_| StateStoreError::TaskPanicked)?
    }

    /// Remove `agent_id` under an exclusive lock. Deletes the whole file if
    /// the agents map becomes empty.
    pub async fn remove_agent(
        &self,
        session: String,
        agent_id: String,
    ) -> Result<(), StateStoreError> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || {
            let store = AgentStateStore::new(dir);
            let state_path = store.state_path(&session);
            let lock_path = store.lock_path(&session);
            let _guard = acquire_lock(&lock_path)?;

            let mut file = read_state_file(&state_path)?;
            file.agents.remove(&agent_id);
            if file.agents.is_empty() {
                remove_if_exists(&state_path)?;
            } else {
                write_state_file_atomic(&state_path, &file)?;
            }
            Ok(())
        })
        .await
        .map_err(|_| StateStoreError::TaskPanicked)?
    }

    /// Deletes the whole state file, used when the owning session is deleted.
    pub async fn remove_all(&self, session: String) -> Result<(), StateStoreError> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || {
            let store = AgentStateStore::new(dir);
            remove_if_exists(&store.state_path(&session))
        })
        .await
        .map_err(|_| StateStoreError::TaskPanicked)?
    }

    pub async fn read_state_file(&self, session: String) -> Result<StateFile, StateStoreError> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || {
            let store = AgentStateStore::new(dir);
            read_state_file(&store.state_path(&session))
        })
        .await
        .map_err(|_| StateStoreError::TaskPanicked)?
    }
}

fn acquire_lock(lock_path: &Path) -> Result<File, StateStoreError> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .open(lock_path)?;
    file.lock_exclusive()
        .map_err(|e| StateStoreError::Lock(e.to_string()))?;
    Ok(file)
}

fn read_state_file(path: &Path) -> Result<StateFile, StateStoreError> {
    match File::open(path) {
        Ok(mut f) => {
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            Ok(StateFile::from_json(&buf)?)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StateFile::default()),
        Err(e) => Err(e.into()),
    }
}

fn write_state_file_atomic(path: &Path, file: &StateFile) -> Result<(), StateStoreError> {
    let bytes = serde_json::to_vec_pretty(file)?;
    let tmp_path = path.with_extension("json.tmp");
    {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(&bytes)?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<(), StateStoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "agent_state_store_tests.rs"]
mod tests;
