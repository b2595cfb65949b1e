// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix rename` — set the cosmetic title shown in the session
//! picker, without touching the session's identity (name, clone path).
//!
//! There's no session-name argument: like the hook ingestor, rename acts on
//! whichever session owns the pane it's run from, resolved via `TMUX_PANE`.

use std::io::Read;

use anyhow::{anyhow, bail, Context};
use cm_adapters::SessionAdapter;

use crate::context::AppContext;

const TITLE_VAR: &str = "@claude-matrix-title";
const PANE_ENV_VAR: &str = "TMUX_PANE";

pub async fn handle(ctx: &AppContext, title_args: &[String]) -> anyhow::Result<()> {
    let title = if title_args.is_empty() {
        read_title_from_stdin()?
    } else {
        title_args.join(" ")
    };
    let title = title.trim().to_string();
    if title.is_empty() {
        bail!("title must not be empty");
    }

    let pane_id = std::env::var(PANE_ENV_VAR)
        .map_err(|_| anyhow!("{PANE_ENV_VAR} is not set; rename must run inside a session"))?;
    let name = ctx
        .session_adapter
        .session_for_pane(&pane_id)
        .await
        .context("resolving multiplexer session for pane")?
        .ok_or_else(|| anyhow!("no multiplexer session owns pane {pane_id:?}"))?;

    let mut session = ctx
        .session_store
        .load(&name)
        .await
        .with_context(|| format!("loading session {name:?}"))?;
    session.title = Some(title.clone());
    ctx.session_store
        .save(&session)
        .await
        .context("saving renamed session")?;

    if let Err(e) = ctx
        .session_adapter
        .set_session_var(&name, TITLE_VAR, &title)
        .await
    {
        tracing::warn!(session = %name, error = %e, "failed to set multiplexer title variable");
    }

    println!("Renamed {name} to {title:?}.");
    Ok(())
}

fn read_title_from_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading title from stdin")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "rename_tests.rs"]
mod tests;
