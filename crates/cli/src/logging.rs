// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A `{debug, warn}` sink pair realized with `tracing-subscriber`.
//!
//! Default mode: debug-level events are discarded, warnings go to stderr.
//! Debug mode (`--debug` / `-d`): debug-level events additionally print to
//! stdout. There is no JSON/structured sink and no forced timestamp beyond
//! whatever the default `fmt` layer gives for free.

use tracing::Level;
use tracing_subscriber::filter::{filter_fn, LevelFilter};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;

/// Install the global subscriber. Idempotent-safe to call once per process;
/// calling it twice would panic on the second `set_global_default`, which is
/// the correct failure mode for a programming error, not a runtime one.
pub fn init(debug: bool) {
    // Only WARN/ERROR ever reach stderr, regardless of mode.
    let warn_layer = layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(LevelFilter::WARN);

    // DEBUG (progress) goes to stdout, but only in debug mode, and never
    // duplicates the WARN/ERROR events already sent to stderr above.
    let debug_layer = debug.then(|| {
        layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_filter(filter_fn(is_progress_level))
    });

    tracing_subscriber::registry()
        .with(warn_layer)
        .with(debug_layer)
        .init();
}

/// Progress events go to the debug sink; everything else (warnings, errors)
/// stays on the warn sink so debug mode doesn't duplicate them.
fn is_progress_level(meta: &tracing::Metadata<'_>) -> bool {
    *meta.level() == Level::DEBUG
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
