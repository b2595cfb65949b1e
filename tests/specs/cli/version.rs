// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `version` subcommand specs.

use crate::prelude::*;

#[test]
fn version_prints_binary_name() {
    cli().args(&["version"]).passes().stdout_has("claude-matrix");
}
