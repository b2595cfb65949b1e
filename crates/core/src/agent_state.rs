// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-agent state and the priority-aggregated view of a multiplexer
//! session's agents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

crate::define_id! {
    /// The assistant's own session identifier, used as the key into a
    /// [`StateFile`]'s agent map.
    pub struct AgentId;
}

/// Sentinel key used when reading a legacy single-state file that has no
/// agent id of its own.
pub const LEGACY_AGENT_ID: &str = "legacy";

/// Lifecycle state of a single agent, as reported by hook events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Running,
    WaitingForInput,
    Idle,
    Error,
    Stopped,
    Unknown,
}

impl AgentState {
    /// Aggregate priority, highest first: `running > waiting_for_input >
    /// idle > error > stopped > unknown`.
    fn priority(self) -> u8 {
        match self {
            AgentState::Running => 5,
            AgentState::WaitingForInput => 4,
            AgentState::Idle => 3,
            AgentState::Error => 2,
            AgentState::Stopped => 1,
            AgentState::Unknown => 0,
        }
    }

    /// Single display-width-2 emoji indicator for window-name prefixes and
    /// table cells.
    pub fn emoji(self) -> &'static str {
        match self {
            AgentState::Running => "🟢",
            AgentState::WaitingForInput => "❓",
            AgentState::Idle => "💬",
            AgentState::Error => "⚠️",
            AgentState::Stopped => "⚫",
            AgentState::Unknown => "❔",
        }
    }

    /// Short label paired with [`Self::emoji`] in the CLAUDE column.
    pub fn label(self) -> &'static str {
        match self {
            AgentState::Running => "Active",
            AgentState::WaitingForInput => "Waiting",
            AgentState::Idle => "Idle",
            AgentState::Error => "Error",
            AgentState::Stopped => "Stopped",
            AgentState::Unknown => "Unknown",
        }
    }
}

/// A single agent's last-reported state, keyed by [`AgentId`] in a
/// [`StateFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStateEntry {
    pub state: AgentState,
    pub updated_at: u64,
}

/// The full per-multiplexer-session state file.
///
/// Deserialization tolerates the legacy single-state shape
/// (`{state, updated_at}` with no `agents` map) by folding it into a single
/// entry under [`LEGACY_AGENT_ID`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub agents: BTreeMap<String, AgentStateEntry>,
}

impl StateFile {
    /// Parse a state file body, accepting either the current `{agents: {...}}`
    /// schema or the legacy single-entry `{state, updated_at}` schema.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        if let Ok(current) = serde_json::from_slice::<StateFile>(bytes) {
            return Ok(current);
        }
        #[derive(Deserialize)]
        struct Legacy {
            state: AgentState,
            updated_at: u64,
        }
        let legacy: Legacy = serde_json::from_slice(bytes)?;
        let mut agents = BTreeMap::new();
        agents.insert(
            LEGACY_AGENT_ID.to_string(),
            AgentStateEntry {
                state: legacy.state,
                updated_at: legacy.updated_at,
            },
        );
        Ok(Self { agents })
    }
}

/// The result of aggregating a [`StateFile`] over a staleness threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleAggregate {
    pub state: AgentState,
    pub updated_at: u64,
}

/// Aggregate a state file's agents into a single display state.
///
/// 1. Entries whose age (`now - updated_at`) exceeds `stale_threshold_secs`
///    are excluded.
/// 2. If no entries survive: `Unknown` if any were stale (agents known but
///    silent), else `Stopped` if the map was empty to begin with.
/// 3. Otherwise: the highest-priority surviving state, paired with the
///    maximum `updated_at` among entries sharing that priority class.
pub fn compute_state(file: &StateFile, now: u64, stale_threshold_secs: u64) -> StaleAggregate {
    if file.agents.is_empty() {
        return StaleAggregate {
            state: AgentState::Stopped,
            updated_at: 0,
        };
    }

    let mut any_stale = false;
    let mut fresh: Vec<&AgentStateEntry> = Vec::with_capacity(file.agents.len());
    for entry in file.agents.values() {
        let age = now.saturating_sub(entry.updated_at);
        if age > stale_threshold_secs {
            any_stale = true;
        } else {
            fresh.push(entry);
        }
    }

    if fresh.is_empty() {
        let state = if any_stale {
            AgentState::Unknown
        } else {
            AgentState::Stopped
        };
        return StaleAggregate {
            state,
            updated_at: 0,
        };
    }

    let best_priority = fresh.iter().map(|e| e.state.priority()).max().unwrap_or(0);
    let best_updated_at = fresh
        .iter()
        .filter(|e| e.state.priority() == best_priority)
        .map(|e| e.updated_at)
        .max()
        .unwrap_or(0);
    let best_state = fresh
        .iter()
        .find(|e| e.state.priority() == best_priority)
        .map(|e| e.state)
        .unwrap_or(AgentState::Unknown);

    StaleAggregate {
        state: best_state,
        updated_at: best_updated_at,
    }
}

#[cfg(test)]
#[path = "agent_state_tests.rs"]
mod tests;
