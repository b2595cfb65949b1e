// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix hook-handler --from=<event>` — hidden subcommand invoked by
//! the assistant at each lifecycle event. Reads one JSON event from stdin,
//! resolves the owning multiplexer session from the pane environment
//! variable, writes (or clears) the reporting agent's state, and renames the
//! session's window to the recomputed aggregate indicator.

use std::io::Read;

use anyhow::{anyhow, bail, Context};
use cm_adapters::SessionAdapter;
use cm_core::agent_state::{compute_state, AgentState, LEGACY_AGENT_ID};
use serde::Deserialize;

use crate::context::AppContext;

const PANE_ENV_VAR: &str = "TMUX_PANE";

#[derive(Debug, Deserialize)]
struct HookEvent {
    #[serde(default)]
    session_id: Option<String>,
}

/// `None` means "remove the agent" (session-end); any other value is the
/// state to record for every other lifecycle event.
fn map_event_to_state(event: &str) -> anyhow::Result<Option<AgentState>> {
    match event {
        "session-start" | "prompt-submit" | "pre-tool-use" => Ok(Some(AgentState::Running)),
        "post-tool-use" | "stop" | "idle" => Ok(Some(AgentState::Idle)),
        "user-input-requested" | "permission-requested" => Ok(Some(AgentState::WaitingForInput)),
        "error-notification" => Ok(Some(AgentState::Error)),
        "session-end" => Ok(None),
        other => bail!("unrecognized hook event {other:?}"),
    }
}

/// Reads the event body from standard input, per the external interface
/// contract (`hook-handler --from=<event>` consumes one JSON event on stdin).
pub fn read_event_body() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading hook event from stdin")?;
    Ok(buf)
}

pub async fn handle(ctx: &AppContext, from: &str, event_json: &str) -> anyhow::Result<()> {
    let transition = map_event_to_state(from)?;
    let event: HookEvent = serde_json::from_str(event_json).context("parsing hook event JSON")?;

    let pane_id = std::env::var(PANE_ENV_VAR).map_err(|_| {
        tracing::debug!(event = from, "hook event received with no {PANE_ENV_VAR} set");
        anyhow!("{PANE_ENV_VAR} is not set; cannot resolve the multiplexer session for this hook event")
    })?;

    let session_name = ctx
        .session_adapter
        .session_for_pane(&pane_id)
        .await
        .context("resolving multiplexer session for pane")?
        .ok_or_else(|| anyhow!("no multiplexer session owns pane {pane_id:?}"))?;

    let agent_id = event.session_id.unwrap_or_else(|| LEGACY_AGENT_ID.to_string());
    let now = ctx.now();

    tracing::debug!(session = %session_name, agent = %agent_id, event = from, "processing hook event");

    match transition {
        Some(state) => {
            ctx.state_store
                .update_agent(session_name.clone(), agent_id, state, now)
                .await
                .context("recording agent state")?;
        }
        None => {
            ctx.state_store
                .remove_agent(session_name.clone(), agent_id)
                .await
                .context("removing agent state")?;
        }
    }

    let file = ctx
        .state_store
        .read_state_file(session_name.clone())
        .await
        .context("reading aggregate state")?;
    let aggregate = compute_state(&file, now, ctx.config.stale_threshold_secs);
    let title = format!("{} {}", aggregate.state.emoji(), aggregate.state.label());
    if let Err(e) = ctx.session_adapter.rename_window(&session_name, &title).await {
        tracing::warn!(session = %session_name, error = %e, "failed to rename window after hook event");
    }

    Ok(())
}

#[cfg(test)]
#[path = "hook_handler_tests.rs"]
mod tests;
