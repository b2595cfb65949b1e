// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hands the controlling terminal to a live multiplexer session.
//!
//! Attaching isn't part of [`cm_adapters::SessionAdapter`] — every other
//! operation on that trait is a scripted, non-interactive subprocess call,
//! while attaching needs to inherit this process's stdio and block until the
//! user detaches. That's a different shape of call, so it's a small
//! standalone shell-out here rather than a trait method.

use anyhow::Context;
use tokio::process::Command;

/// Runs `tmux attach-session -t <name>` with inherited stdio, returning once
/// the user detaches (or the session ends). Failure here is always a
/// warning, never fatal — the session still exists even if attaching fails.
pub async fn attach(session_name: &str) -> anyhow::Result<()> {
    let status = Command::new("tmux")
        .args(["attach-session", "-t", session_name])
        .status()
        .await
        .context("launching tmux attach-session")?;

    if !status.success() {
        anyhow::bail!("tmux attach-session exited with status {status}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "attach_tests.rs"]
mod tests;
