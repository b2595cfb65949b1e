// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real `fzf` driver: spawns the binary, feeds it lines on stdin, and
//! parses its `--expect` output.

use super::{parse_output, FuzzyError, FuzzyFinder, FuzzyPrompt, FuzzyResult, FZF_ENV_VARS_TO_FILTER};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Fuzzy-finder adapter backed by the `fzf` binary.
#[derive(Clone, Default)]
pub struct FzfAdapter;

impl FzfAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FuzzyFinder for FzfAdapter {
    async fn pick(&self, prompt: FuzzyPrompt) -> Result<FuzzyResult, FuzzyError> {
        let mut cmd = Command::new("fzf");
        cmd.arg("--prompt")
            .arg(format!("{} ", prompt.prompt))
            .arg("--header")
            .arg(&prompt.header_line)
            .arg("--header-lines=0")
            .arg("--ansi")
            .arg("--layout=reverse");

        if let Some(height) = prompt.height {
            cmd.arg("--height").arg(format!("{height}"));
        }

        if !prompt.expect_keys.is_empty() {
            cmd.arg("--expect").arg(prompt.expect_keys.join(","));
        }

        // Strip globally-configured fzf options so the keybindings this
        // tool relies on (--expect) cannot be overridden by the caller's
        // shell environment.
        for var in FZF_ENV_VARS_TO_FILTER {
            cmd.env_remove(var);
        }

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let mut child = cmd
            .spawn()
            .map_err(|e| FuzzyError::Spawn(e.to_string()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| FuzzyError::Spawn("fzf stdin unavailable".to_string()))?;

        let input = prompt.lines.join("\n");
        stdin
            .write_all(input.as_bytes())
            .await
            .map_err(|e| FuzzyError::Spawn(e.to_string()))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| FuzzyError::Spawn(e.to_string()))?;

        // fzf exits 1 when nothing matches the query and 130 when the user
        // cancelled (Esc/Ctrl-C); both are ordinary "nothing picked"
        // outcomes, not failures.
        match output.status.code() {
            Some(0) | Some(1) | Some(130) => {}
            Some(code) => {
                return Err(FuzzyError::UnexpectedExit(format!(
                    "fzf exited with status {code}"
                )))
            }
            None => return Err(FuzzyError::UnexpectedExit("fzf killed by signal".to_string())),
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_output(&stdout, &prompt.expect_keys))
    }
}

#[cfg(test)]
#[path = "fzf_tests.rs"]
mod tests;
