// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fuzzy-finder (`fzf`) driver: invocation, environment filtering, and
//! `key\nselection\n` output parsing.

mod fzf;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeFuzzyFinder;

pub use fzf::FzfAdapter;

use async_trait::async_trait;
use thiserror::Error;

/// Environment variables that configure `fzf` system-wide. These are
/// stripped from the child process environment so a user's global
/// keybindings cannot shadow the ones this tool passes explicitly.
pub const FZF_ENV_VARS_TO_FILTER: &[&str] = &["FZF_DEFAULT_OPTS", "FZF_DEFAULT_COMMAND"];

#[derive(Debug, Error)]
pub enum FuzzyError {
    #[error("failed to launch fuzzy-finder: {0}")]
    Spawn(String),

    #[error("fuzzy-finder exited with an unexpected status: {0}")]
    UnexpectedExit(String),
}

/// One invocation's configuration: the prompt, the lines to pick from, the
/// frozen header line, and the keys (besides Enter) the caller wants
/// reported back.
pub struct FuzzyPrompt {
    pub prompt: String,
    pub lines: Vec<String>,
    pub header_line: String,
    pub expect_keys: Vec<String>,
    pub height: Option<u16>,
}

/// The parsed `key\nselection\n` response: `key` is empty when the user
/// pressed plain Enter rather than one of `expect_keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyResult {
    pub key: String,
    pub selection: Option<String>,
}

impl FuzzyResult {
    pub fn is_cancelled(&self) -> bool {
        self.selection.is_none()
    }
}

#[async_trait]
pub trait FuzzyFinder: Send + Sync {
    async fn pick(&self, prompt: FuzzyPrompt) -> Result<FuzzyResult, FuzzyError>;
}

/// Parses raw fzf stdout into a [`FuzzyResult`].
///
/// fzf with `--expect` writes the matched key (or an empty line if Enter
/// was pressed) followed by the selected line, each newline-terminated. An
/// empty stdout (nothing selected, Esc/Ctrl-C) maps to a cancelled result.
pub fn parse_output(stdout: &str, expect_keys: &[String]) -> FuzzyResult {
    let mut lines = stdout.lines();
    let first = lines.next();

    match first {
        None => FuzzyResult {
            key: String::new(),
            selection: None,
        },
        Some(first_line) if expect_keys.iter().any(|k| k == first_line) => FuzzyResult {
            key: first_line.to_string(),
            selection: lines.next().map(str::to_string),
        },
        Some(first_line) => FuzzyResult {
            key: String::new(),
            selection: Some(first_line.to_string()),
        },
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
