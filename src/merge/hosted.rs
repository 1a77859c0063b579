//! Hosted merge strategy - delegate the squash to the platform API

use crate::error::Result;
use crate::merge::MergeStrategy;
use crate::platform::HostingService;
use crate::types::{MergeOutcome, RepoId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Squash merge via the hosting platform's merge endpoint
///
/// Conflict and no-op normalization happens inside the
/// [`HostingService::merge`] implementation, so this strategy is a thin
/// delegation.
pub struct HostedMergeStrategy {
    platform: Arc<dyn HostingService>,
}

impl HostedMergeStrategy {
    /// Create a strategy backed by the given platform service
    pub fn new(platform: Arc<dyn HostingService>) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl MergeStrategy for HostedMergeStrategy {
    async fn perform_squash_merge(
        &self,
        repo: &RepoId,
        source: &str,
        target: &str,
        message: &str,
    ) -> Result<MergeOutcome> {
        debug!(%repo, source, target, "squash merging via hosting API");
        self.platform.merge(repo, target, source, message).await
    }
}
