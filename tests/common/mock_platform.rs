//! Mock hosting service and merge strategy for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use merge_sweep::error::{Error, Result};
use merge_sweep::merge::MergeStrategy;
use merge_sweep::platform::HostingService;
use merge_sweep::types::{
    BranchComparison, BranchRef, CommitInfo, MergeOutcome, ReleaseInfo, RepoId,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Errors a mock can be told to raise
#[derive(Debug, Clone)]
pub enum InjectedError {
    /// Generic API failure
    Api(String),
    /// Merge conflict
    Conflict(String),
    /// Nothing to merge
    NothingToMerge(String),
}

impl InjectedError {
    fn to_error(&self) -> Error {
        match self {
            Self::Api(msg) => Error::GitHubApi(msg.clone()),
            Self::Conflict(msg) => Error::MergeConflict(msg.clone()),
            Self::NothingToMerge(msg) => Error::NothingToMerge(msg.clone()),
        }
    }
}

/// Call record for `merge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub repo: String,
    pub base: String,
    pub head: String,
    pub message: String,
}

/// Call record for `create_branch_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRefCall {
    pub repo: String,
    pub branch: String,
    pub sha: String,
}

/// Call record for `create_release`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReleaseCall {
    pub repo: String,
    pub tag_name: String,
    pub target: String,
    pub body: String,
}

/// Manual mock of `HostingService`
///
/// Features:
/// - per-repository branch and comparison fixtures
/// - call tracking for verification
/// - error injection for failure paths, optionally scoped to one repository
pub struct MockHostingService {
    branches: Mutex<HashMap<(String, String), BranchRef>>,
    comparisons: Mutex<HashMap<String, BranchComparison>>,
    // Call tracking
    get_branch_calls: Mutex<Vec<(String, String)>>,
    compare_calls: Mutex<Vec<String>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    delete_ref_calls: Mutex<Vec<(String, String)>>,
    create_ref_calls: Mutex<Vec<CreateRefCall>>,
    create_release_calls: Mutex<Vec<CreateReleaseCall>>,
    // Error injection (repo scope of None = all repositories)
    error_on_get_branch: Mutex<Option<(Option<String>, InjectedError)>>,
    error_on_compare: Mutex<Option<(Option<String>, InjectedError)>>,
    error_on_merge: Mutex<Option<(Option<String>, InjectedError)>>,
    error_on_delete_ref: Mutex<Option<(Option<String>, InjectedError)>>,
}

impl MockHostingService {
    pub fn new() -> Self {
        Self {
            branches: Mutex::new(HashMap::new()),
            comparisons: Mutex::new(HashMap::new()),
            get_branch_calls: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            delete_ref_calls: Mutex::new(Vec::new()),
            create_ref_calls: Mutex::new(Vec::new()),
            create_release_calls: Mutex::new(Vec::new()),
            error_on_get_branch: Mutex::new(None),
            error_on_compare: Mutex::new(None),
            error_on_merge: Mutex::new(None),
            error_on_delete_ref: Mutex::new(None),
        }
    }

    // === Fixture setup ===

    /// Register a branch for a repository
    pub fn add_branch(&self, repo: &str, branch: &str, sha: &str) {
        self.branches.lock().unwrap().insert(
            (repo.to_string(), branch.to_string()),
            BranchRef {
                name: branch.to_string(),
                sha: sha.to_string(),
            },
        );
    }

    /// Register the comparison result for a repository
    pub fn set_comparison(&self, repo: &str, commits: Vec<CommitInfo>) {
        self.comparisons.lock().unwrap().insert(
            repo.to_string(),
            BranchComparison {
                ahead_by: commits.len() as u64,
                commits,
            },
        );
    }

    /// Set up a repository where `source` is `commits.len()` commits ahead
    /// of `target` and the merge will succeed
    pub fn setup_mergeable_repo(
        &self,
        repo: &str,
        source: &str,
        target: &str,
        commits: Vec<CommitInfo>,
    ) {
        self.add_branch(repo, source, &format!("{repo}_{source}_tip"));
        self.add_branch(repo, target, &format!("{repo}_{target}_tip"));
        self.set_comparison(repo, commits);
    }

    // === Error injection ===

    pub fn fail_get_branch(&self, msg: &str) {
        *self.error_on_get_branch.lock().unwrap() =
            Some((None, InjectedError::Api(msg.to_string())));
    }

    pub fn fail_compare(&self, msg: &str) {
        *self.error_on_compare.lock().unwrap() = Some((None, InjectedError::Api(msg.to_string())));
    }

    /// Make `merge` fail, for every repository or only for `repo`
    pub fn fail_merge(&self, repo: Option<&str>, error: InjectedError) {
        *self.error_on_merge.lock().unwrap() = Some((repo.map(ToString::to_string), error));
    }

    pub fn fail_delete_ref(&self, msg: &str) {
        *self.error_on_delete_ref.lock().unwrap() =
            Some((None, InjectedError::Api(msg.to_string())));
    }

    fn injected(
        slot: &Mutex<Option<(Option<String>, InjectedError)>>,
        repo: &RepoId,
    ) -> Option<Error> {
        let guard = slot.lock().unwrap();
        guard.as_ref().and_then(|(scope, error)| match scope {
            Some(scoped) if scoped != &repo.to_string() => None,
            _ => Some(error.to_error()),
        })
    }

    // === Call verification ===

    pub fn get_branch_calls(&self) -> Vec<(String, String)> {
        self.get_branch_calls.lock().unwrap().clone()
    }

    pub fn merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    pub fn delete_ref_calls(&self) -> Vec<(String, String)> {
        self.delete_ref_calls.lock().unwrap().clone()
    }

    pub fn create_ref_calls(&self) -> Vec<CreateRefCall> {
        self.create_ref_calls.lock().unwrap().clone()
    }

    pub fn create_release_calls(&self) -> Vec<CreateReleaseCall> {
        self.create_release_calls.lock().unwrap().clone()
    }

    /// Assert the pipeline was never entered for `repo`
    pub fn assert_never_touched(&self, repo: &str) {
        let calls = self.get_branch_calls();
        assert!(
            !calls.iter().any(|(r, _)| r == repo),
            "Expected no get_branch calls for {repo} but got: {calls:?}"
        );
    }

    /// Assert `delete_branch_ref` was never called for `repo`
    pub fn assert_delete_not_called(&self, repo: &str) {
        let calls = self.delete_ref_calls();
        assert!(
            !calls.iter().any(|(r, _)| r == repo),
            "Expected no delete_branch_ref calls for {repo} but got: {calls:?}"
        );
    }
}

impl Default for MockHostingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostingService for MockHostingService {
    async fn get_branch(&self, repo: &RepoId, branch: &str) -> Result<Option<BranchRef>> {
        self.get_branch_calls
            .lock()
            .unwrap()
            .push((repo.to_string(), branch.to_string()));

        if let Some(err) = Self::injected(&self.error_on_get_branch, repo) {
            return Err(err);
        }

        let branches = self.branches.lock().unwrap();
        Ok(branches.get(&(repo.to_string(), branch.to_string())).cloned())
    }

    async fn compare(&self, repo: &RepoId, _base: &str, _head: &str) -> Result<BranchComparison> {
        self.compare_calls.lock().unwrap().push(repo.to_string());

        if let Some(err) = Self::injected(&self.error_on_compare, repo) {
            return Err(err);
        }

        let comparisons = self.comparisons.lock().unwrap();
        Ok(comparisons.get(&repo.to_string()).cloned().unwrap_or_default())
    }

    async fn merge(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
        message: &str,
    ) -> Result<MergeOutcome> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            repo: repo.to_string(),
            base: base.to_string(),
            head: head.to_string(),
            message: message.to_string(),
        });

        if let Some(err) = Self::injected(&self.error_on_merge, repo) {
            return Err(err);
        }

        Ok(MergeOutcome {
            sha: format!("merge_sha_{}_{}", repo.owner, repo.name),
            message: message.to_string(),
        })
    }

    async fn create_branch_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<()> {
        self.create_ref_calls.lock().unwrap().push(CreateRefCall {
            repo: repo.to_string(),
            branch: branch.to_string(),
            sha: sha.to_string(),
        });
        Ok(())
    }

    async fn delete_branch_ref(&self, repo: &RepoId, branch: &str) -> Result<()> {
        self.delete_ref_calls
            .lock()
            .unwrap()
            .push((repo.to_string(), branch.to_string()));

        if let Some(err) = Self::injected(&self.error_on_delete_ref, repo) {
            return Err(err);
        }
        Ok(())
    }

    async fn create_release(
        &self,
        repo: &RepoId,
        tag_name: &str,
        target: &str,
        body: &str,
    ) -> Result<ReleaseInfo> {
        self.create_release_calls
            .lock()
            .unwrap()
            .push(CreateReleaseCall {
                repo: repo.to_string(),
                tag_name: tag_name.to_string(),
                target: target.to_string(),
                body: body.to_string(),
            });

        Ok(ReleaseInfo {
            tag_name: tag_name.to_string(),
            html_url: format!("https://github.com/{repo}/releases/tag/{tag_name}"),
        })
    }
}

/// Call record for `perform_squash_merge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquashCall {
    pub repo: String,
    pub source: String,
    pub target: String,
    pub message: String,
}

/// Manual mock of `MergeStrategy` with call tracking and error injection
pub struct MockMergeStrategy {
    calls: Mutex<Vec<SquashCall>>,
    next_sha: AtomicU64,
    error: Mutex<Option<(Option<String>, InjectedError)>>,
}

impl MockMergeStrategy {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_sha: AtomicU64::new(1),
            error: Mutex::new(None),
        }
    }

    /// Make the strategy fail, for every repository or only for `repo`
    pub fn fail(&self, repo: Option<&str>, error: InjectedError) {
        *self.error.lock().unwrap() = Some((repo.map(ToString::to_string), error));
    }

    pub fn calls(&self) -> Vec<SquashCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockMergeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MergeStrategy for MockMergeStrategy {
    async fn perform_squash_merge(
        &self,
        repo: &RepoId,
        source: &str,
        target: &str,
        message: &str,
    ) -> Result<MergeOutcome> {
        self.calls.lock().unwrap().push(SquashCall {
            repo: repo.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        });

        let injected = {
            let guard = self.error.lock().unwrap();
            guard.as_ref().and_then(|(scope, error)| match scope {
                Some(scoped) if scoped != &repo.to_string() => None,
                _ => Some(error.to_error()),
            })
        };
        if let Some(err) = injected {
            return Err(err);
        }

        let n = self.next_sha.fetch_add(1, Ordering::SeqCst);
        Ok(MergeOutcome {
            sha: format!("squash_sha_{n}"),
            message: message.to_string(),
        })
    }
}
