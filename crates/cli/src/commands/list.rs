// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix list` — the session picker. Loops until the user switches
//! to a session or cancels.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use cm_adapters::fuzzy::{FuzzyFinder, FuzzyPrompt};
use cm_adapters::SessionAdapter;
use cm_core::agent_state::compute_state;
use cm_core::{Repository, RepositorySource, Session};

use crate::attach;
use crate::context::AppContext;
use crate::table::{self, SessionRow};

const KEY_DELETE: &str = "ctrl-d";
const KEY_RENAME: &str = "ctrl-r";
const KEY_TOGGLE_FILTER: &str = "ctrl-f";
const KEY_TOOLS: &str = "ctrl-t";

enum Action {
    Switch,
    Delete,
    Rename,
    ToggleFilter,
    Tools,
}

fn action_for_key(key: &str) -> Action {
    match key {
        KEY_DELETE => Action::Delete,
        KEY_RENAME => Action::Rename,
        KEY_TOGGLE_FILTER => Action::ToggleFilter,
        KEY_TOOLS => Action::Tools,
        _ => Action::Switch,
    }
}

pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let mut hide_dead = false;

    loop {
        let repo_by_identifier = repo_source_index(ctx).await;
        let sessions = ctx.session_store.list().await.context("listing sessions")?;
        let live = ctx
            .session_adapter
            .list_sessions()
            .await
            .context("listing multiplexer sessions")?;
        let live_names: std::collections::HashSet<&str> =
            live.iter().map(|s| s.name.as_str()).collect();

        let mut rows = build_rows(ctx, &sessions, &live_names, &repo_by_identifier).await;
        if hide_dead {
            let visible: Vec<SessionRow> = rows.into_iter().filter(|r| r.mux_alive).collect();
            if visible.is_empty() {
                println!("Filter would hide every session; disabling it.");
                hide_dead = false;
            } else {
                rows = reindex(visible);
            }
        }

        if rows.is_empty() {
            println!("No sessions yet. Run `create` to start one.");
            return Ok(());
        }

        let (header, data) = table::render_session_table(&rows);
        let prompt = FuzzyPrompt {
            prompt: "sessions>".to_string(),
            lines: std::iter::once(header).chain(data).collect(),
            header_line: "enter: switch  ctrl-d: delete  ctrl-r: rename  ctrl-f: filter  ctrl-t: tools"
                .to_string(),
            expect_keys: vec![
                KEY_DELETE.to_string(),
                KEY_RENAME.to_string(),
                KEY_TOGGLE_FILTER.to_string(),
                KEY_TOOLS.to_string(),
            ],
            height: None,
        };
        let result = ctx.fuzzy.pick(prompt).await.context("launching fuzzy-finder")?;
        let Some(selection) = result.selection else {
            return Ok(());
        };
        let Some(session_name) = table::extract_identifier(&selection) else {
            println!("Ignoring unrecognized selection line.");
            continue;
        };
        let session_name = session_name.to_string();

        match action_for_key(&result.key) {
            Action::Switch => {
                switch_to(ctx, &session_name).await?;
                return Ok(());
            }
            Action::Delete => delete_session(ctx, &session_name).await?,
            Action::Rename => rename_session(ctx, &session_name).await?,
            Action::ToggleFilter => hide_dead = !hide_dead,
            Action::Tools => prefill_session(ctx, &session_name).await,
        }
    }
}

async fn repo_source_index(ctx: &AppContext) -> HashMap<String, RepositorySource> {
    match ctx.discoverer(false).list(&ctx.ctx).await {
        Ok(repos) => repos
            .into_iter()
            .map(|r: Repository| (r.identifier(), r.source))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to refresh repo sources for the session table");
            HashMap::new()
        }
    }
}

async fn build_rows(
    ctx: &AppContext,
    sessions: &[Session],
    live_names: &std::collections::HashSet<&str>,
    repo_by_identifier: &HashMap<String, RepositorySource>,
) -> Vec<SessionRow> {
    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut rows = Vec::with_capacity(ordered.len());
    for (index, session) in ordered.into_iter().enumerate() {
        let aggregate = match ctx.state_store.read_state_file(session.name.clone()).await {
            Ok(file) => compute_state(&file, ctx.now(), ctx.config.stale_threshold_secs),
            Err(e) => {
                tracing::warn!(session = %session.name, error = %e, "failed to read agent state");
                compute_state(&cm_core::StateFile::default(), ctx.now(), ctx.config.stale_threshold_secs)
            }
        };
        rows.push(SessionRow {
            index: index + 1,
            name: session.name.clone(),
            display_title: session.display_title().to_string(),
            mux_alive: live_names.contains(session.name.as_str()),
            source: repo_by_identifier.get(&session.repo_identifier()).copied(),
            repo_display: session.repo_identifier(),
            aggregate,
        });
    }
    rows
}

fn reindex(rows: Vec<SessionRow>) -> Vec<SessionRow> {
    rows.into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            row.index = i + 1;
            row
        })
        .collect()
}

async fn switch_to(ctx: &AppContext, session_name: &str) -> anyhow::Result<()> {
    let alive = ctx
        .session_adapter
        .is_alive(session_name)
        .await
        .unwrap_or(false);

    if !alive {
        let session = ctx
            .session_store
            .load(session_name)
            .await
            .with_context(|| format!("loading session {session_name:?}"))?;
        recreate(ctx, &session).await?;
    }

    if let Err(e) = attach::attach(session_name).await {
        tracing::warn!(session = session_name, error = %e, "failed to attach");
    }
    Ok(())
}

async fn recreate(ctx: &AppContext, session: &Session) -> anyhow::Result<()> {
    let clone_path = Path::new(&session.clone_path);
    if !clone_path.exists() {
        tokio::fs::create_dir_all(clone_path)
            .await
            .context("recreating clone directory")?;
        if session.is_workspace {
            for url in &session.repo_urls {
                let child = clone_path.join(super::create::workspace_child_dir_name(url));
                if !child.exists() {
                    ctx.mirror_cache
                        .clone_with_cache(url, &child)
                        .await
                        .with_context(|| format!("cloning {url}"))?;
                }
            }
        } else if let Some(url) = &session.repo_url {
            ctx.mirror_cache
                .clone_with_cache(url, clone_path)
                .await
                .with_context(|| format!("cloning {url}"))?;
        }
    }

    let assistant_cmd = ctx.config.assistant_cmd.clone().unwrap_or_else(|| "bash".to_string());
    ctx.session_adapter
        .spawn(&session.name, clone_path, &assistant_cmd, &[])
        .await
        .context("recreating multiplexer session")?;
    Ok(())
}

async fn delete_session(ctx: &AppContext, session_name: &str) -> anyhow::Result<()> {
    println!("Delete {session_name}? [y/N]");
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("reading delete confirmation from stdin")?;
    if !matches!(answer.trim(), "y" | "Y" | "yes" | "YES") {
        println!("Not deleted.");
        return Ok(());
    }

    if ctx.session_adapter.is_alive(session_name).await.unwrap_or(false) {
        if let Err(e) = ctx.session_adapter.kill(session_name).await {
            tracing::warn!(session = session_name, error = %e, "failed to kill live session");
        }
    }
    ctx.session_store
        .delete(session_name)
        .await
        .context("removing session metadata")?;
    if let Err(e) = ctx.state_store.remove_all(session_name.to_string()).await {
        tracing::warn!(session = session_name, error = %e, "failed to remove agent state");
    }
    println!("Deleted {session_name}.");
    Ok(())
}

async fn rename_session(ctx: &AppContext, session_name: &str) -> anyhow::Result<()> {
    println!("New title for {session_name}:");
    let mut title = String::new();
    std::io::stdin()
        .read_line(&mut title)
        .context("reading title from stdin")?;
    let title = title.trim().to_string();
    if title.is_empty() {
        println!("Empty title, not renaming.");
        return Ok(());
    }

    let mut session = ctx.session_store.load(session_name).await.context("loading session")?;
    session.title = Some(title.clone());
    ctx.session_store.save(&session).await.context("saving renamed session")?;
    if let Err(e) = ctx
        .session_adapter
        .set_session_var(session_name, "@claude-matrix-title", &title)
        .await
    {
        tracing::warn!(session = session_name, error = %e, "failed to set title variable");
    }
    Ok(())
}

async fn prefill_session(ctx: &AppContext, session_name: &str) {
    let Ok(session) = ctx.session_store.load(session_name).await else {
        println!("Could not load session {session_name:?} for pre-fill.");
        return;
    };
    let urls = if session.is_workspace {
        session.repo_urls.clone()
    } else {
        session.repo_url.clone().into_iter().collect()
    };

    let report = ctx
        .mirror_cache
        .bulk_prefill(urls, &ctx.ctx, |done, total, url, outcome| {
            println!("[{done}/{total}] {url}: {outcome:?}");
        })
        .await;
    println!(
        "Pre-fill complete: {} created, {} updated, {} failed{}.",
        report.created,
        report.updated,
        report.failed,
        if report.cancelled { " (cancelled)" } else { "" }
    );
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
