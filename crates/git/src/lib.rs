// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cm-git: content-addressed git mirror cache used to speed up fresh clones.

mod mirror;
mod runner;

pub use mirror::{BulkPrefillOutcome, BulkPrefillReport, MirrorCache, MirrorStatus};
pub use runner::{GitError, GitRunner, SystemGitRunner};
