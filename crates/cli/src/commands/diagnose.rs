// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix diagnose` — a read-only snapshot of config, hook
//! registration, state-file inventory, live sessions, and environment.

use anyhow::Context;
use cm_adapters::SessionAdapter;

use crate::context::AppContext;
use crate::hook_config;

const RELEVANT_ENV_VARS: &[&str] = &[
    "HOME",
    "TMUX_PANE",
    "TMUX_CLAUDE_MATRIX_DEBUG",
    "TMUX_CLAUDE_MATRIX_STALE_THRESHOLD_SECS",
    "TMUX_CLAUDE_MATRIX_TOKEN",
];

pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    println!("Config:");
    println!("  home               {}", ctx.config.home.display());
    println!("  clone_root         {}", ctx.config.clone_root.display());
    println!("  session_dir        {}", ctx.config.session_dir.display());
    println!("  state_dir          {}", ctx.config.state_dir.display());
    println!("  cache_dir          {}", ctx.config.cache_dir.display());
    println!("  mirror_dir         {}", ctx.config.mirror_dir.display());
    println!("  stale_threshold_s  {}", ctx.config.stale_threshold_secs);
    println!("  cache_ttl_s        {}", ctx.config.cache_ttl_secs);
    println!("  remote_api_base    {}", ctx.config.remote_api_base);
    println!(
        "  remote_token       {}",
        if ctx.config.remote_token.is_some() { "set" } else { "unset" }
    );
    println!(
        "  assistant_cmd      {}",
        ctx.config.assistant_cmd.as_deref().unwrap_or("(none)")
    );
    println!();

    let binary_path = std::env::current_exe()
        .context("resolving current executable path")?
        .to_string_lossy()
        .into_owned();
    println!("Hooks ({binary_path}):");
    for (event, installed) in hook_config::status(&ctx.config.home, &binary_path).await? {
        println!("  {event:<22} {}", if installed { "registered" } else { "not registered" });
    }
    println!();

    println!("State files ({}):", ctx.config.state_dir.display());
    match tokio::fs::read_dir(&ctx.config.state_dir).await {
        Ok(mut entries) => {
            let mut found = false;
            while let Some(entry) = entries.next_entry().await? {
                if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
                    println!("  {}", entry.path().display());
                    found = true;
                }
            }
            if !found {
                println!("  (none)");
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => println!("  (directory does not exist yet)"),
        Err(e) => return Err(e).context("reading state directory"),
    }
    println!();

    println!("Multiplexer sessions:");
    match ctx.session_adapter.list_sessions().await {
        Ok(sessions) if sessions.is_empty() => println!("  (none)"),
        Ok(sessions) => {
            for session in sessions {
                println!("  {}", session.name);
            }
        }
        Err(e) => println!("  failed to list sessions: {e}"),
    }
    println!();

    println!("Environment:");
    for var in RELEVANT_ENV_VARS {
        match std::env::var(var) {
            Ok(_) if *var == "TMUX_CLAUDE_MATRIX_TOKEN" => println!("  {var}=<redacted>"),
            Ok(v) => println!("  {var}={v}"),
            Err(_) => println!("  {var}=(unset)"),
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "diagnose_tests.rs"]
mod tests;
