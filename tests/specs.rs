//! Behavioral specifications for claude-matrix.
//!
//! These tests are black-box: they invoke the compiled `claude-matrix`
//! binary and verify stdout, stderr, exit codes, and on-disk state.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/help.rs"]
mod cli_help;
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/version.rs"]
mod cli_version;

// discovery/
#[path = "specs/discovery/list_repos.rs"]
mod discovery_list_repos;

// hooks/
#[path = "specs/hooks/setup_remove.rs"]
mod hooks_setup_remove;
#[path = "specs/hooks/lifecycle.rs"]
mod hooks_lifecycle;

// session/
#[path = "specs/session/rename.rs"]
mod session_rename;

// diagnose
#[path = "specs/diagnose.rs"]
mod diagnose;
