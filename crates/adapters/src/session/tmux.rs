// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tmux session adapter

use super::{LiveSession, SessionAdapter, SessionError};
use crate::subprocess::{run_with_timeout, TMUX_TIMEOUT};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

async fn run(cmd: Command, description: &str) -> Result<std::process::Output, SessionError> {
    run_with_timeout(cmd, TMUX_TIMEOUT, description)
        .await
        .map_err(SessionError::CommandFailed)
}

/// Tmux-based session adapter
#[derive(Clone, Default)]
pub struct TmuxAdapter;

impl TmuxAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionAdapter for TmuxAdapter {
    async fn spawn(
        &self,
        name: &str,
        cwd: &Path,
        cmd: &str,
        env: &[(String, String)],
    ) -> Result<String, SessionError> {
        // Precondition: cwd must exist
        if !cwd.exists() {
            return Err(SessionError::SpawnFailed(format!(
                "working directory does not exist: {}",
                cwd.display()
            )));
        }

        let session_id = name.to_string();

        // Check if session already exists and clean it up
        let mut has_session = Command::new("tmux");
        has_session.args(["has-session", "-t", &session_id]);
        let existing = run_with_timeout(has_session, TMUX_TIMEOUT, "tmux has-session").await;

        if existing.map(|o| o.status.success()).unwrap_or(false) {
            tracing::warn!(session_id, "session already exists, killing first");
            let mut kill = Command::new("tmux");
            kill.args(["kill-session", "-t", &session_id]);
            let _ = run_with_timeout(kill, TMUX_TIMEOUT, "tmux kill-session").await;
        }

        // Build tmux command
        let mut tmux_cmd = Command::new("tmux");
        tmux_cmd
            .arg("new-session")
            .arg("-d")
            .arg("-s")
            .arg(&session_id)
            .arg("-c")
            .arg(cwd);

        // Add environment variables
        for (key, value) in env {
            tmux_cmd.arg("-e").arg(format!("{}={}", key, value));
        }

        tmux_cmd.arg(cmd);

        let output = run_with_timeout(tmux_cmd, TMUX_TIMEOUT, "tmux new-session")
            .await
            .map_err(SessionError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                session_id,
                stderr = %stderr,
                "tmux spawn failed"
            );
            return Err(SessionError::SpawnFailed(stderr.to_string()));
        }

        // Log stderr even on success - may contain useful warnings
        if !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                session_id,
                stderr = %stderr,
                "tmux spawn stderr (non-fatal)"
            );
        }

        Ok(session_id)
    }

    async fn send(&self, id: &str, input: &str) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.arg("send-keys").arg("-t").arg(id).arg(input);
        let output = run(cmd, "tmux send-keys").await?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn send_literal(&self, id: &str, text: &str) -> Result<(), SessionError> {
        // -l = literal mode (no key name interpretation)
        // -- = end of options (handles text starting with -)
        let mut cmd = Command::new("tmux");
        cmd.args(["send-keys", "-t", id, "-l", "--", text]);
        let output = run(cmd, "tmux send-keys -l").await?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn send_enter(&self, id: &str) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["send-keys", "-t", id, "Enter"]);
        let output = run(cmd, "tmux send-keys Enter").await?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn kill(&self, id: &str) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.arg("kill-session").arg("-t").arg(id);
        let output = run(cmd, "tmux kill-session").await?;

        if !output.status.success() {
            // Session might already be dead, which is fine
        }

        Ok(())
    }

    async fn is_alive(&self, id: &str) -> Result<bool, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.arg("has-session").arg("-t").arg(id);
        let output = run(cmd, "tmux has-session").await?;

        Ok(output.status.success())
    }

    async fn capture_output(&self, id: &str, lines: u32) -> Result<String, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.arg("capture-pane")
            .arg("-t")
            .arg(id)
            .arg("-p")
            .arg("-S")
            .arg(format!("-{}", lines));
        let output = run(cmd, "tmux capture-pane").await?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn is_process_running(&self, id: &str, pattern: &str) -> Result<bool, SessionError> {
        // Get the pane PID
        let mut list_panes = Command::new("tmux");
        list_panes.args(["list-panes", "-t", id, "-F", "#{pane_pid}"]);
        let output = run(list_panes, "tmux list-panes").await?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }

        let pane_pid = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if pane_pid.is_empty() {
            return Ok(false);
        }

        // Run both checks concurrently: the pane process itself and its children.
        // - ps: checks if the pane process matches (tmux may exec the command directly)
        // - pgrep: checks child processes (when run via a shell)
        let mut ps_cmd = Command::new("ps");
        ps_cmd.args(["-p", &pane_pid, "-o", "command="]);
        let mut pgrep_cmd = Command::new("pgrep");
        pgrep_cmd.args(["-P", &pane_pid, "-f", pattern]);
        let (ps_output, pgrep_output) = tokio::try_join!(
            async { run_with_timeout(ps_cmd, TMUX_TIMEOUT, "ps").await.map_err(SessionError::CommandFailed) },
            async { run_with_timeout(pgrep_cmd, TMUX_TIMEOUT, "pgrep").await.map_err(SessionError::CommandFailed) },
        )?;

        // Check if the pane process itself matches the pattern
        if ps_output.status.success() {
            let cmd_line = String::from_utf8_lossy(&ps_output.stdout);
            if cmd_line.contains(pattern) {
                return Ok(true);
            }
        }

        // Check if any child process matches
        Ok(pgrep_output.status.success())
    }

    async fn get_exit_code(&self, id: &str) -> Result<Option<i32>, SessionError> {
        // Query the pane's dead status (exit code when process has exited)
        let mut cmd = Command::new("tmux");
        cmd.args(["display-message", "-t", id, "-p", "#{pane_dead_status}"]);
        let output = run(cmd, "tmux display-message").await?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }

        let status_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if status_str.is_empty() {
            // Process is still running
            return Ok(None);
        }

        // Parse exit code
        match status_str.parse::<i32>() {
            Ok(code) => Ok(Some(code)),
            Err(_) => Ok(None),
        }
    }

    async fn list_sessions(&self) -> Result<Vec<LiveSession>, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["list-sessions", "-F", "#{session_name}"]);
        let output = run(cmd, "tmux list-sessions").await?;

        if !output.status.success() {
            // No server running means no sessions, not an error.
            return Ok(Vec::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| LiveSession {
                name: line.to_string(),
            })
            .collect())
    }

    async fn session_for_pane(&self, pane_id: &str) -> Result<Option<String>, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["display-message", "-t", pane_id, "-p", "#{session_name}"]);
        let output = run(cmd, "tmux display-message").await?;

        if !output.status.success() {
            return Ok(None);
        }

        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if name.is_empty() {
            Ok(None)
        } else {
            Ok(Some(name))
        }
    }

    async fn rename_window(&self, id: &str, title: &str) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["rename-window", "-t", id, title]);
        let output = run(cmd, "tmux rename-window").await?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn set_session_var(&self, id: &str, key: &str, value: &str) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["set-option", "-t", id, key, value]);
        let output = run(cmd, "tmux set-option").await?;

        if !output.status.success() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn get_session_var(&self, id: &str, key: &str) -> Result<Option<String>, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["show-option", "-t", id, "-v", key]);
        let output = run(cmd, "tmux show-option").await?;

        if !output.status.success() {
            return Ok(None);
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    async fn display_popup(&self, text: &str) -> Result<(), SessionError> {
        // Waits on the user to dismiss it (`; read`); not subject to
        // TMUX_TIMEOUT like the rest of this adapter's calls.
        let popup = Command::new("tmux")
            .args(["display-popup", "-E", &format!("echo {text}; read")])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if popup.status.success() {
            return Ok(());
        }

        // Older tmux without display-popup: fall back to a throwaway window.
        tracing::warn!("tmux display-popup unsupported, falling back to new-window");
        let window = Command::new("tmux")
            .args(["new-window", format!("echo {text}; read").as_str()])
            .output()
            .await
            .map_err(|e| SessionError::CommandFailed(e.to_string()))?;

        if !window.status.success() {
            let stderr = String::from_utf8_lossy(&window.stderr);
            return Err(SessionError::CommandFailed(stderr.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tmux_tests.rs"]
mod tests;
