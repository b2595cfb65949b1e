// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Testable time source.
//!
//! Every component that stamps `updated_at`/`created_at` takes a `&dyn Clock`
//! instead of calling `SystemTime::now()` directly, so staleness and
//! aggregation logic can be driven deterministically in tests.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of "now", expressed as Unix seconds.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> u64;
}

/// Real wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A clock that returns a fixed, externally advanceable value. Used by tests
/// that need to control staleness windows precisely.
#[derive(Clone)]
pub struct FakeClock {
    now: Arc<Mutex<u64>>,
}

impl FakeClock {
    pub fn new(now_secs: u64) -> Self {
        Self {
            now: Arc::new(Mutex::new(now_secs)),
        }
    }

    pub fn advance(&self, secs: u64) {
        *self.now.lock() += secs;
    }

    pub fn set(&self, now_secs: u64) {
        *self.now.lock() = now_secs;
    }
}

impl Clock for FakeClock {
    fn now_secs(&self) -> u64 {
        *self.now.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
