// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `claude-matrix version` — prints `<binary-name> <version>`.

/// Build-time-injected version, falling back to `"dev"` for non-release
/// builds (matches the binary name used by `setup-hooks`/`diagnose`).
pub fn version_string() -> String {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("dev");
    format!("{} {}", env!("CARGO_PKG_NAME"), version)
}

pub fn handle() {
    println!("{}", version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
