//! Squash-merge strategies
//!
//! Two interchangeable implementations behind one trait, selected by
//! configuration: delegate to the hosting platform's merge endpoint, or
//! clone locally and drive the `git` CLI.

mod hosted;
mod local;

pub use hosted::HostedMergeStrategy;
pub use local::LocalCloneStrategy;

use crate::error::Result;
use crate::types::{MergeOutcome, RepoId};
use async_trait::async_trait;

/// A way to squash-merge one branch into another
///
/// Implementors normalize their failure modes: a conflict surfaces as
/// [`crate::error::Error::MergeConflict`] and a no-op merge as
/// [`crate::error::Error::NothingToMerge`], regardless of how the
/// underlying tool reports them.
#[async_trait]
pub trait MergeStrategy: Send + Sync {
    /// Squash all commits of `source` into a single new commit on `target`,
    /// recording `message` (or a message derived by the strategy itself).
    async fn perform_squash_merge(
        &self,
        repo: &RepoId,
        source: &str,
        target: &str,
        message: &str,
    ) -> Result<MergeOutcome>;
}
