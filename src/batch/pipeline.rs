//! Per-repository merge pipeline
//!
//! One linear pass per repository: verify branches, compare, squash merge,
//! optionally delete/recreate the source branch, optionally tag a release.
//! Missing branches and empty comparisons return `Skipped`; real failures
//! propagate as errors for the iterator to convert into `Failed` outcomes.

use crate::compose::{release_notes, squash_commit_message};
use crate::config::BatchConfig;
use crate::error::Result;
use crate::merge::MergeStrategy;
use crate::platform::HostingService;
use crate::types::{CommitInfo, ReleaseInfo, RepoId, RepositoryOutcome};
use chrono::Utc;
use tracing::{debug, warn};

/// Branch names for which automated deletion is always refused
const PROTECTED_BRANCHES: &[&str] = &["main", "master"];

/// Process a single repository end to end.
///
/// `Ok(Skipped { .. })` covers the deliberate early exits (missing branch,
/// nothing to merge); `Err` covers everything the caller must record as a
/// failure.
pub async fn process_repository(
    repo: &RepoId,
    config: &BatchConfig,
    platform: &dyn HostingService,
    strategy: &dyn MergeStrategy,
) -> Result<RepositoryOutcome> {
    let source = &config.source_branch;
    let target = &config.target_branch;

    // Step 1: both branches must exist
    if platform.get_branch(repo, source).await?.is_none() {
        return Ok(RepositoryOutcome::Skipped {
            repo: repo.to_string(),
            reason: format!("Source branch '{source}' not found"),
        });
    }
    if platform.get_branch(repo, target).await?.is_none() {
        return Ok(RepositoryOutcome::Skipped {
            repo: repo.to_string(),
            reason: format!("Target branch '{target}' not found"),
        });
    }

    // Step 2: the comparison both gates the merge and supplies the ordered
    // commit list for the composer
    let comparison = platform.compare(repo, target, source).await?;
    if comparison.ahead_by == 0 {
        return Ok(RepositoryOutcome::Skipped {
            repo: repo.to_string(),
            reason: format!("No changes to merge from '{source}' into '{target}'"),
        });
    }
    debug!(%repo, ahead_by = comparison.ahead_by, "source is ahead of target");

    // Step 3: squash merge via the configured strategy
    let message = squash_commit_message(
        config.commit_message_template.as_deref(),
        source,
        target,
        &comparison.commits,
    );
    let merge = strategy
        .perform_squash_merge(repo, source, target, &message)
        .await?;

    // Step 4: optional delete (+ recreate) of the source branch
    if config.delete_source_branch {
        delete_source_branch(repo, config, platform, &merge.sha).await?;
    }

    // Step 5: optional release at the new target tip
    let release = if config.create_release {
        Some(create_release(repo, platform, target, &comparison.commits).await?)
    } else {
        None
    };

    Ok(RepositoryOutcome::Success {
        repo: repo.to_string(),
        source_branch: source.clone(),
        target_branch: target.clone(),
        commits_count: comparison.ahead_by,
        merge_sha: merge.sha,
        commit_message: merge.message,
        // Reports that deletion was requested; protected branches are
        // refused above without clearing this flag.
        source_branch_deleted: config.delete_source_branch,
        release,
    })
}

/// Delete the source branch, refusing protected names, and recreate it at
/// the new target tip when that policy is active.
async fn delete_source_branch(
    repo: &RepoId,
    config: &BatchConfig,
    platform: &dyn HostingService,
    target_tip: &str,
) -> Result<()> {
    let source = &config.source_branch;

    if PROTECTED_BRANCHES.contains(&source.as_str()) {
        // Never an error: log and move on
        warn!(%repo, branch = %source, "refusing to delete protected branch");
        return Ok(());
    }

    platform.delete_branch_ref(repo, source).await?;

    if config.recreate_source_branch {
        // The branch lives on as a pointer at the new tip so it can be
        // fast-forwarded again by later work
        platform.create_branch_ref(repo, source, target_tip).await?;
        debug!(%repo, branch = %source, sha = %target_tip, "recreated source branch");
    }

    Ok(())
}

/// Tag a time-based release at the target branch tip
async fn create_release(
    repo: &RepoId,
    platform: &dyn HostingService,
    target: &str,
    commits: &[CommitInfo],
) -> Result<ReleaseInfo> {
    // UTC, second precision, '-' and ':' stripped
    let tag_name = format!("release-{}", Utc::now().format("%Y%m%dT%H%M%SZ"));
    let body = release_notes(commits);
    platform.create_release(repo, &tag_name, target, &body).await
}
