// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix refresh` — deletes the remote discovery cache and
//! re-populates it, rather than merely bypassing it in memory.

use anyhow::Context;

use crate::context::AppContext;

pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let cache_path = ctx.remote_cache_path();
    match tokio::fs::remove_file(&cache_path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).context("removing remote discovery cache"),
    }

    let repos = ctx
        .discoverer(true)
        .list(&ctx.ctx)
        .await
        .context("refreshing repositories")?;

    println!("Refreshed: {} repositories discovered.", repos.len());
    Ok(())
}

#[cfg(test)]
#[path = "refresh_tests.rs"]
mod tests;
