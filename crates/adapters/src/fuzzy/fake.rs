// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake fuzzy-finder for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FuzzyError, FuzzyFinder, FuzzyPrompt, FuzzyResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

struct FakeFuzzyState {
    prompts: Vec<FuzzyPrompt>,
    responses: VecDeque<Result<FuzzyResult, FuzzyError>>,
}

/// Fake fuzzy-finder adapter for testing. Scripted responses are consumed
/// in FIFO order; calling `pick` with no response queued panics, since a
/// test that drives an un-scripted prompt has a bug in its setup.
#[derive(Clone)]
pub struct FakeFuzzyFinder {
    inner: Arc<Mutex<FakeFuzzyState>>,
}

impl Default for FakeFuzzyFinder {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeFuzzyState {
                prompts: Vec::new(),
                responses: VecDeque::new(),
            })),
        }
    }
}

impl FakeFuzzyFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be returned by the next `pick` call.
    pub fn push_response(&self, result: FuzzyResult) {
        self.inner.lock().responses.push_back(Ok(result));
    }

    /// Queue an error to be returned by the next `pick` call.
    pub fn push_error(&self, err: FuzzyError) {
        self.inner.lock().responses.push_back(Err(err));
    }

    /// Every prompt this adapter has been asked to show, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.inner
            .lock()
            .prompts
            .iter()
            .map(|p| p.prompt.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().prompts.len()
    }
}

#[async_trait]
impl FuzzyFinder for FakeFuzzyFinder {
    async fn pick(&self, prompt: FuzzyPrompt) -> Result<FuzzyResult, FuzzyError> {
        let mut inner = self.inner.lock();
        inner.prompts.push(prompt);
        inner
            .responses
            .pop_front()
            .expect("FakeFuzzyFinder::pick called with no scripted response queued")
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
