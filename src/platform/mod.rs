//! Hosting-platform services
//!
//! Provides a unified interface over the hosting API operations the batch
//! pipeline needs. The service is shared across repositories, so every
//! operation takes the repository identifier explicitly.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{BranchComparison, BranchRef, MergeOutcome, ReleaseInfo, RepoId};
use async_trait::async_trait;

/// Hosting API operations consumed by the per-repository pipeline
///
/// All errors that carry merge semantics are normalized by implementors:
/// a conflict response becomes [`crate::error::Error::MergeConflict`] and a
/// no-op merge becomes [`crate::error::Error::NothingToMerge`], so callers
/// can distinguish "needs manual resolution" from other failures.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Look up a branch; `Ok(None)` when the branch does not exist
    async fn get_branch(&self, repo: &RepoId, branch: &str) -> Result<Option<BranchRef>>;

    /// Compare `base...head`: how far `head` is ahead of `base`, with the
    /// ordered list of commits that would be squashed
    async fn compare(&self, repo: &RepoId, base: &str, head: &str) -> Result<BranchComparison>;

    /// Merge `head` into `base` via the platform merge endpoint, recording
    /// `message` on the merge commit
    async fn merge(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
        message: &str,
    ) -> Result<MergeOutcome>;

    /// Create a branch ref pointing at `sha`
    async fn create_branch_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<()>;

    /// Delete a branch ref
    async fn delete_branch_ref(&self, repo: &RepoId, branch: &str) -> Result<()>;

    /// Create a non-draft, non-prerelease release pointing at `target`
    async fn create_release(
        &self,
        repo: &RepoId,
        tag_name: &str,
        target: &str,
        body: &str,
    ) -> Result<ReleaseInfo>;
}
