// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cm-discovery: repository discovery sources and the aggregator that merges
//! them.

mod cache;
mod discoverer;
mod local;
mod remote;
mod workspace;

pub use cache::DiscoveryCache;
pub use discoverer::Discoverer;
pub use local::LocalSource;
pub use remote::{HttpRemoteFetcher, RemoteFetcher, RemoteSource};
pub use workspace::WorkspaceSource;

use async_trait::async_trait;
use cm_core::Repository;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name}: {message}")]
    Failed {
        source_name: String,
        message: String,
    },
    #[error("cancelled")]
    Cancelled,
}

impl SourceError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, SourceError::Cancelled)
    }
}

/// A single repository provider. Implementations must be cancellable via the
/// given token and must not block past the next cancellation check.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;

    async fn list(&self, ctx: &CancellationToken) -> Result<Vec<Repository>, SourceError>;
}
