// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-modify-write access to the assistant's own hook-registration file
//! (`~/.claude/settings.json`), used by `setup-hooks`/`remove-hooks` and
//! read (never written) by `diagnose`.
//!
//! The file is a JSON object with arbitrary top-level keys; only the
//! `hooks` key is touched here, so unrelated settings survive round-trips.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde_json::{json, Value};

/// Lifecycle event names the ingestor maps to an [`cm_core::AgentState`]
/// transition, in the order the assistant documents them.
pub const HOOK_EVENTS: &[&str] = &[
    "session-start",
    "prompt-submit",
    "pre-tool-use",
    "post-tool-use",
    "stop",
    "idle",
    "user-input-requested",
    "permission-requested",
    "error-notification",
    "session-end",
];

pub fn settings_path(home: &Path) -> PathBuf {
    home.join(".claude").join("settings.json")
}

fn hook_command(binary_path: &str, event: &str) -> String {
    format!("{binary_path} hook-handler --from={event}")
}

async fn read_settings(path: &Path) -> anyhow::Result<Value> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(json!({})),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

async fn write_settings(path: &Path, value: &Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.context("creating settings directory")?;
    }
    let bytes = serde_json::to_vec_pretty(value).context("serializing settings")?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &bytes).await.context("writing settings tmp file")?;
    tokio::fs::rename(&tmp_path, path).await.context("installing settings file")?;
    Ok(())
}

/// True if `command` already appears under `event`'s matcher list.
fn event_has_command(settings: &Value, event: &str, command: &str) -> bool {
    settings["hooks"][event]
        .as_array()
        .map(|matchers| {
            matchers.iter().any(|matcher| {
                matcher["hooks"]
                    .as_array()
                    .map(|hooks| hooks.iter().any(|h| h["command"].as_str() == Some(command)))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

/// Register `binary_path` for every lifecycle event not already registered.
/// Returns the number of events newly registered.
pub async fn install(home: &Path, binary_path: &str) -> anyhow::Result<usize> {
    let path = settings_path(home);
    let settings = read_settings(&path).await?;
    let mut settings = if settings.is_object() { settings } else { json!({}) };

    let mut added = 0;
    for event in HOOK_EVENTS {
        let command = hook_command(binary_path, event);
        if event_has_command(&settings, event, &command) {
            continue;
        }
        insert_hook_entry(&mut settings, event, &command)?;
        added += 1;
    }

    if added > 0 {
        write_settings(&path, &settings).await?;
    }
    Ok(added)
}

/// Appends one hook-command entry for `event` under `settings["hooks"]`,
/// creating the `hooks` object and the event's matcher array as needed.
fn insert_hook_entry(settings: &mut Value, event: &str, command: &str) -> anyhow::Result<()> {
    let Value::Object(root) = settings else {
        bail!("settings root is not a JSON object");
    };
    let hooks_value = root.entry("hooks").or_insert_with(|| json!({}));
    let Value::Object(hooks) = hooks_value else {
        bail!("`hooks` key in settings is not a JSON object");
    };
    let entries_value = hooks.entry(event.to_string()).or_insert_with(|| json!([]));
    let Value::Array(entries) = entries_value else {
        bail!("hook entry for {event:?} is not a JSON array");
    };
    entries.push(json!({
        "matcher": "",
        "hooks": [{"type": "command", "command": command}],
    }));
    Ok(())
}

/// Remove every hook entry whose command was registered by this binary.
/// Returns the number of events unregistered.
pub async fn uninstall(home: &Path, binary_path: &str) -> anyhow::Result<usize> {
    let path = settings_path(home);
    let mut settings = read_settings(&path).await?;
    let Some(hooks) = settings.get_mut("hooks").and_then(Value::as_object_mut) else {
        return Ok(0);
    };

    let mut removed = 0;
    for event in HOOK_EVENTS {
        let command = hook_command(binary_path, event);
        let Some(matchers) = hooks.get_mut(*event).and_then(Value::as_array_mut) else {
            continue;
        };
        let before = matchers.len();
        matchers.retain(|matcher| {
            let keeps_any = matcher["hooks"]
                .as_array()
                .map(|h| h.iter().any(|entry| entry["command"].as_str() != Some(command.as_str())))
                .unwrap_or(true);
            keeps_any
        });
        if matchers.len() != before {
            removed += 1;
        }
    }

    if removed > 0 {
        write_settings(&path, &settings).await?;
    }
    Ok(removed)
}

/// For each lifecycle event, whether `binary_path` is currently registered.
pub async fn status(home: &Path, binary_path: &str) -> anyhow::Result<Vec<(&'static str, bool)>> {
    let path = settings_path(home);
    let settings = read_settings(&path).await?;
    Ok(HOOK_EVENTS
        .iter()
        .map(|event| {
            let command = hook_command(binary_path, event);
            (*event, event_has_command(&settings, event, &command))
        })
        .collect())
}

#[cfg(test)]
#[path = "hook_config_tests.rs"]
mod tests;
