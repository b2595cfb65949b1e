// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;
use tempfile::tempdir;

use super::*;
use cm_core::Config;

fn test_context(home: std::path::PathBuf) -> AppContext {
    let config = Config::defaults(home);
    AppContext::new(config)
}

#[tokio::test]
#[serial]
async fn handle_rejects_blank_title_before_resolving_a_session() {
    // Blank-title validation happens before TMUX_PANE is consulted, so this
    // must fail even with no pane environment set up at all.
    std::env::remove_var(PANE_ENV_VAR);
    let home = tempdir().expect("tempdir");
    let ctx = test_context(home.path().to_path_buf());

    let result = handle(&ctx, &["   ".to_string()]).await;
    assert!(result.is_err());
}

#[tokio::test]
#[serial]
async fn handle_fails_without_pane_env_var() {
    let previous = std::env::var(PANE_ENV_VAR).ok();
    std::env::remove_var(PANE_ENV_VAR);

    let home = tempdir().expect("tempdir");
    let ctx = test_context(home.path().to_path_buf());

    let result = handle(&ctx, &["new".to_string(), "title".to_string()]).await;
    assert!(result.is_err());

    if let Some(value) = previous {
        std::env::set_var(PANE_ENV_VAR, value);
    }
}

// Full success-path coverage (pane resolved to a live multiplexer session,
// title persisted, multiplexer variable set) needs a real TmuxAdapter and is
// exercised end-to-end rather than as a cli-crate unit test.
