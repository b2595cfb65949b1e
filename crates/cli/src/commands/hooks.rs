// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix setup-hooks` / `remove-hooks` — register or unregister this
//! binary as the assistant's hook command for every lifecycle event.

use anyhow::Context;

use crate::context::AppContext;
use crate::hook_config;

fn current_binary_path() -> anyhow::Result<String> {
    let path = std::env::current_exe().context("resolving current executable path")?;
    Ok(path.to_string_lossy().into_owned())
}

pub async fn setup(ctx: &AppContext) -> anyhow::Result<()> {
    let binary_path = current_binary_path()?;
    let added = hook_config::install(&ctx.config.home, &binary_path).await?;
    if added == 0 {
        println!("Hooks already registered for {binary_path}.");
    } else {
        println!("Registered {added} hook(s) for {binary_path}.");
    }
    Ok(())
}

pub async fn remove(ctx: &AppContext) -> anyhow::Result<()> {
    let binary_path = current_binary_path()?;
    let removed = hook_config::uninstall(&ctx.config.home, &binary_path).await?;
    if removed == 0 {
        println!("No registered hooks found for {binary_path}.");
    } else {
        println!("Unregistered {removed} hook(s) for {binary_path}.");
    }
    Ok(())
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
