// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix create` — pick a repository via the fuzzy-finder, clone
//! (or reuse) it, spawn a multiplexer session, and attach.

use std::path::Path;

use anyhow::{bail, Context};
use cm_adapters::fuzzy::{FuzzyFinder, FuzzyPrompt};
use cm_adapters::SessionAdapter;
use cm_core::{extract_repo_name, Repository, Session};

use crate::attach;
use crate::context::AppContext;
use crate::table;

const TITLE_VAR: &str = "@claude-matrix-title";

pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let repos = ctx
        .discoverer(false)
        .list(&ctx.ctx)
        .await
        .context("discovering repositories")?;
    if repos.is_empty() {
        bail!("no repositories discovered; add one to repos.txt or workspaces.yaml first");
    }

    let (header, data) = table::render_repo_table(&repos);
    let prompt = FuzzyPrompt {
        prompt: "create>".to_string(),
        lines: std::iter::once(header).chain(data).collect(),
        header_line: "enter: create   esc: cancel".to_string(),
        expect_keys: Vec::new(),
        height: None,
    };
    let result = ctx
        .fuzzy
        .pick(prompt)
        .await
        .context("launching fuzzy-finder")?;
    let Some(selection) = result.selection else {
        println!("Cancelled.");
        return Ok(());
    };
    let Some(identifier) = table::extract_identifier(&selection) else {
        bail!("fuzzy-finder returned a line with no selection marker: {selection:?}");
    };
    let repo = repos
        .iter()
        .find(|r| r.identifier() == identifier)
        .with_context(|| format!("selected repository {identifier:?} vanished from the listing"))?;

    let session = if repo.is_workspace {
        create_workspace_session(ctx, repo).await?
    } else {
        create_single_repo_session(ctx, repo).await?
    };

    ctx.session_adapter
        .spawn(
            &session.name,
            Path::new(&session.clone_path),
            &assistant_command(ctx),
            &[],
        )
        .await
        .context("spawning multiplexer session")?;

    if let Err(e) = ctx.session_store.save(&session).await {
        tracing::warn!(session = %session.name, error = %e, "failed to save session metadata");
    }

    if let Err(e) = ctx
        .session_adapter
        .set_session_var(&session.name, TITLE_VAR, &session.name)
        .await
    {
        tracing::warn!(session = %session.name, error = %e, "failed to set session title variable");
    }

    if let Err(e) = attach::attach(&session.name).await {
        tracing::warn!(session = %session.name, error = %e, "failed to attach to the new session");
    }
    Ok(())
}

fn assistant_command(ctx: &AppContext) -> String {
    ctx.config
        .assistant_cmd
        .clone()
        .unwrap_or_else(|| "bash".to_string())
}

async fn create_single_repo_session(ctx: &AppContext, repo: &Repository) -> anyhow::Result<Session> {
    let session_name = ctx
        .session_store
        .generate_unique_name(&extract_repo_name(&repo.url))
        .await
        .context("generating a unique session name")?;
    let clone_path = ctx.config.clone_root.join(&session_name);

    if !clone_path.exists() {
        ctx.mirror_cache
            .clone_with_cache(&repo.url, &clone_path)
            .await
            .with_context(|| format!("cloning {}", repo.url))?;
    }

    Ok(Session::single_repo(
        session_name,
        repo.url.clone(),
        clone_path.to_string_lossy().into_owned(),
        ctx.now(),
    ))
}

async fn create_workspace_session(ctx: &AppContext, repo: &Repository) -> anyhow::Result<Session> {
    let session_name = ctx
        .session_store
        .generate_unique_name(&repo.name)
        .await
        .context("generating a unique session name")?;
    let clone_path = ctx.config.clone_root.join(&session_name);
    tokio::fs::create_dir_all(&clone_path)
        .await
        .context("creating workspace directory")?;

    for url in &repo.workspace_urls {
        let child_name = workspace_child_dir_name(url);
        let child_path = clone_path.join(&child_name);
        if child_path.exists() {
            continue;
        }
        ctx.mirror_cache
            .clone_with_cache(url, &child_path)
            .await
            .with_context(|| format!("cloning {url}"))?;
    }

    Ok(Session::workspace(
        session_name,
        repo.workspace_urls.clone(),
        clone_path.to_string_lossy().into_owned(),
        ctx.now(),
    ))
}

/// The child clone directory name for one workspace member: its
/// `extract_repo_name`, with path separators flattened to `-`.
pub(crate) fn workspace_child_dir_name(url: &str) -> String {
    extract_repo_name(url).replace('/', "-")
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
