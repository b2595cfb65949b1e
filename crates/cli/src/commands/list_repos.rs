// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix list-repos` — non-interactive dump of the discovery table.

use anyhow::Context;

use crate::context::AppContext;
use crate::table;

pub async fn handle(ctx: &AppContext, force_refresh: bool) -> anyhow::Result<()> {
    let repos = ctx
        .discoverer(force_refresh)
        .list(&ctx.ctx)
        .await
        .context("discovering repositories")?;

    let (header, data) = table::render_repo_table(&repos);
    if data.is_empty() {
        println!("No repositories discovered.");
        return Ok(());
    }
    println!("{header}");
    for line in data {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_repos_tests.rs"]
mod tests;
