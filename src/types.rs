//! Core types for merge-sweep

use crate::error::Error;
use crate::version::{BumpHint, classify_message};
use serde::{Deserialize, Serialize};

/// A repository identifier of the form `owner/name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoId {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Parse an `owner/name` identifier.
    ///
    /// The split must yield exactly two non-empty segments; anything else is
    /// an [`Error::InvalidRepositoryFormat`].
    pub fn parse(spec: &str) -> Result<Self, Error> {
        let spec = spec.trim();
        let mut parts = spec.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::InvalidRepositoryFormat(spec.to_string())),
        }
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A single commit returned by the branch comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full commit SHA (hex)
    pub sha: String,
    /// Full commit message (first line is the subject)
    pub message: String,
}

impl CommitInfo {
    /// First line of the commit message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Abbreviated SHA (first 8 characters)
    pub fn short_sha(&self) -> &str {
        let end = self.sha.len().min(8);
        &self.sha[..end]
    }
}

/// A branch reference on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Branch name
    pub name: String,
    /// Commit SHA the branch points at
    pub sha: String,
}

/// Result of comparing a target branch against a source branch
#[derive(Debug, Clone, Default)]
pub struct BranchComparison {
    /// Number of commits the source is ahead of the target
    pub ahead_by: u64,
    /// Commits that would be squashed, in comparison order
    pub commits: Vec<CommitInfo>,
}

/// Result of a squash merge performed by a [`crate::merge::MergeStrategy`]
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// SHA of the new squash commit on the target branch
    pub sha: String,
    /// Commit message actually recorded (may differ from the composed one
    /// when the local strategy picked up a `release.ver` convention file)
    pub message: String,
}

/// A release created after a successful merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Tag name, e.g. `release-20260829T101500Z`
    pub tag_name: String,
    /// Web URL for the release
    pub html_url: String,
}

/// Outcome of processing a single repository
///
/// Exactly one case is active per repository; the batch aggregator buckets
/// outcomes by case while preserving input order within each bucket.
#[derive(Debug, Clone)]
pub enum RepositoryOutcome {
    /// The squash merge landed
    Success {
        /// Repository identifier as configured
        repo: String,
        /// Source branch that was merged
        source_branch: String,
        /// Target branch that received the squash commit
        target_branch: String,
        /// Number of commits that were squashed
        commits_count: u64,
        /// SHA of the squash commit
        merge_sha: String,
        /// Commit message recorded on the target branch
        commit_message: String,
        /// Whether source-branch deletion was requested.
        ///
        /// This reflects the delete flag, not actual deletion: protected
        /// branch names (`main`, `master`) always refuse deletion with a
        /// warning, and the field stays `true` when the flag was set.
        source_branch_deleted: bool,
        /// Release created for this merge, if requested
        release: Option<ReleaseInfo>,
    },

    /// The repository was deliberately left untouched
    Skipped {
        /// Repository identifier as configured
        repo: String,
        /// Reason for skipping (missing branch, no changes, ...)
        reason: String,
    },

    /// Processing failed; the rest of the batch continues
    Failed {
        /// Repository identifier as configured
        repo: String,
        /// Error message
        error: String,
    },
}

impl RepositoryOutcome {
    /// Repository identifier this outcome belongs to
    pub fn repo(&self) -> &str {
        match self {
            Self::Success { repo, .. } | Self::Skipped { repo, .. } | Self::Failed { repo, .. } => {
                repo
            }
        }
    }
}

/// Derived counts for a finished batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Total repositories processed
    pub total: usize,
    /// Repositories that merged successfully
    pub successful: usize,
    /// Repositories that failed
    pub failed: usize,
    /// Repositories that were skipped
    pub skipped: usize,
}

/// Accumulated outcomes for a whole batch
///
/// Invariant: every configured repository identifier appears in exactly one
/// bucket, in original input order within that bucket, and
/// `summary().total == successful + failed + skipped`.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Successful outcomes, in input order
    pub successful: Vec<RepositoryOutcome>,
    /// Failed outcomes, in input order
    pub failed: Vec<RepositoryOutcome>,
    /// Skipped outcomes, in input order
    pub skipped: Vec<RepositoryOutcome>,
}

impl BatchResult {
    /// Route an outcome into its bucket
    pub fn record(&mut self, outcome: RepositoryOutcome) {
        match &outcome {
            RepositoryOutcome::Success { .. } => self.successful.push(outcome),
            RepositoryOutcome::Skipped { .. } => self.skipped.push(outcome),
            RepositoryOutcome::Failed { .. } => self.failed.push(outcome),
        }
    }

    /// Derived counts
    pub fn summary(&self) -> Summary {
        Summary {
            total: self.successful.len() + self.failed.len() + self.skipped.len(),
            successful: self.successful.len(),
            failed: self.failed.len(),
            skipped: self.skipped.len(),
        }
    }

    /// Whether the run should terminate with a failed status
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Repository identifiers that merged successfully, in input order
    pub fn merged_repositories(&self) -> Vec<&str> {
        self.successful.iter().map(RepositoryOutcome::repo).collect()
    }

    /// Repository identifiers that failed, in input order
    pub fn failed_repositories(&self) -> Vec<&str> {
        self.failed.iter().map(RepositoryOutcome::repo).collect()
    }

    /// Reduce a version-bump hint over all successful outcomes' commit
    /// messages with a monotone max; a batch with no successes yields
    /// [`BumpHint::None`].
    pub fn bump_hint(&self) -> BumpHint {
        self.successful
            .iter()
            .filter_map(|outcome| match outcome {
                RepositoryOutcome::Success { commit_message, .. } => {
                    Some(classify_message(commit_message))
                }
                _ => None,
            })
            .fold(BumpHint::None, BumpHint::max)
    }
}
