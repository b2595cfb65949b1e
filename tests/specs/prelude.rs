// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for black-box testing of the `claude-matrix`
//! binary: spawn it as a subprocess against an isolated `$HOME`, assert on
//! its stdout/stderr/exit code.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to the `claude-matrix` binary, checking llvm-cov's
/// target directory first so coverage runs pick up the instrumented build.
fn binary_path() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir
        .join("target/llvm-cov-target/debug")
        .join("claude-matrix");
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug/claude-matrix");
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join("claude-matrix");
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn claude_matrix_cmd() -> Command {
    Command::new(binary_path())
}

/// Start building a `claude-matrix` invocation.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// Fluent builder for one `claude-matrix` invocation.
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    env_removals: Vec<String>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: Vec::new(),
            // Never let the ambient shell's pane/auth context leak into a
            // test that doesn't explicitly opt in.
            env_removals: vec![
                "TMUX_PANE".to_string(),
                "TMUX_CLAUDE_MATRIX_TOKEN".to_string(),
            ],
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.envs
            .push((key.to_string(), value.as_ref().to_string()));
        self
    }

    pub fn stdin(self, text: impl Into<String>) -> RunWithStdin {
        RunWithStdin {
            builder: self,
            stdin: text.into(),
        }
    }

    fn command(self) -> Command {
        let mut cmd = claude_matrix_cmd();
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        for key in &self.env_removals {
            cmd.env_remove(key);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("claude-matrix should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        RunAssert { output }
    }

    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("claude-matrix should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        RunAssert { output }
    }
}

/// A builder with stdin content queued, used by commands that read from it
/// (`rename`, `hook-handler`).
pub struct RunWithStdin {
    builder: CliBuilder,
    stdin: String,
}

impl RunWithStdin {
    fn run(self) -> Output {
        use std::io::Write;
        use std::process::Stdio;

        let mut cmd = self.builder.command();
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        let mut child = cmd.spawn().expect("claude-matrix should spawn");
        child
            .stdin
            .take()
            .expect("piped stdin")
            .write_all(self.stdin.as_bytes())
            .expect("writing stdin");
        child.wait_with_output().expect("claude-matrix should run")
    }

    pub fn passes(self) -> RunAssert {
        let output = self.run();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        RunAssert { output }
    }

    pub fn fails(self) -> RunAssert {
        let output = self.run();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        RunAssert { output }
    }
}

/// Result of a run, for chaining assertions.
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain {expected:?}\nstdout: {stdout}",
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain {unexpected:?}\nstdout: {stdout}",
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain {expected:?}\nstderr: {stderr}",
        );
        self
    }
}

// =============================================================================
// Project (isolated $HOME)
// =============================================================================

/// A temporary `$HOME` for one test, with helpers to seed discovery sources
/// and state/session files directly.
pub struct Project {
    home: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            home: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.home.path()
    }

    fn config_dir(&self) -> PathBuf {
        self.path().join(".claude-matrix")
    }

    /// Seed the line-oriented local repo file read by the `local` source.
    pub fn repos_file(&self, content: &str) -> &Self {
        self.write(self.config_dir().join("repos.txt"), content);
        self
    }

    /// Seed the YAML workspaces file read by the `workspace` source.
    pub fn workspaces_file(&self, content: &str) -> &Self {
        self.write(self.config_dir().join("workspaces.yaml"), content);
        self
    }

    /// Write a session metadata JSON file directly, bypassing `create`.
    pub fn session_file(&self, name: &str, content: &str) -> &Self {
        self.write(self.config_dir().join("sessions").join(format!("{name}.json")), content);
        self
    }

    /// Write an agent state JSON file directly, bypassing the hook ingestor.
    pub fn state_file(&self, session: &str, content: &str) -> &Self {
        self.write(self.config_dir().join("state").join(format!("{session}.json")), content);
        self
    }

    /// Read back an agent state JSON file written by the hook ingestor.
    pub fn read_state_file(&self, session: &str) -> Option<String> {
        std::fs::read_to_string(self.config_dir().join("state").join(format!("{session}.json"))).ok()
    }

    fn write(&self, path: PathBuf, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(path, content).expect("write seed file");
    }

    /// Build a `claude-matrix` invocation scoped to this project's `$HOME`.
    pub fn claude_matrix(&self) -> CliBuilder {
        cli().env("HOME", self.path().to_string_lossy())
    }
}

// =============================================================================
// tmux (real, non-interactive)
// =============================================================================

/// True if a `tmux` binary usable for non-interactive session management is
/// on `PATH`. Scenarios that exercise the hook ingestor or `rename` need a
/// real multiplexer session (they resolve `TMUX_PANE` via `tmux
/// display-message`), but never attach a terminal, so a headless tmux server
/// is sufficient and no pty emulation is required.
pub fn tmux_available() -> bool {
    Command::new("tmux")
        .arg("-V")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A detached tmux session created for one test, killed on drop.
pub struct TmuxSession {
    name: String,
}

impl TmuxSession {
    /// Start a detached session named `name` running an idle shell in `cwd`.
    pub fn start(name: &str, cwd: &Path) -> Self {
        let status = Command::new("tmux")
            .args(["new-session", "-d", "-s", name, "-c"])
            .arg(cwd)
            .status()
            .expect("tmux new-session should run");
        assert!(status.success(), "tmux new-session failed for {name:?}");
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pane identifier of this session's sole pane, suitable for
    /// `TMUX_PANE` — the same variable the assistant's hook payload and the
    /// `rename` command resolve against.
    pub fn pane_id(&self) -> String {
        let output = Command::new("tmux")
            .args(["list-panes", "-t", &self.name, "-F", "#{pane_id}"])
            .output()
            .expect("tmux list-panes should run");
        assert!(output.status.success(), "tmux list-panes failed for {}", self.name);
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .expect("at least one pane")
            .to_string()
    }

    pub fn window_name(&self) -> String {
        let output = Command::new("tmux")
            .args(["list-windows", "-t", &self.name, "-F", "#{window_name}"])
            .output()
            .expect("tmux list-windows should run");
        assert!(output.status.success(), "tmux list-windows failed for {}", self.name);
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .expect("at least one window")
            .to_string()
    }

    pub fn get_var(&self, key: &str) -> Option<String> {
        let output = Command::new("tmux")
            .args(["show-option", "-t", &self.name, "-v", key])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

impl Drop for TmuxSession {
    fn drop(&mut self) {
        let _ = Command::new("tmux")
            .args(["kill-session", "-t", &self.name])
            .output();
    }
}
