//! Batch orchestration - the repository iterator and result aggregator
//!
//! Walks the configured repository list sequentially, dispatching each
//! identifier to the per-repository pipeline and bucketing the outcome.
//! One repository's failure never aborts the batch: every error raised by
//! the pipeline is caught here and converted to a `Failed` outcome.

mod pipeline;

pub use pipeline::process_repository;

use crate::config::BatchConfig;
use crate::error::{Error, Result};
use crate::merge::MergeStrategy;
use crate::platform::HostingService;
use crate::types::{BatchResult, RepoId, RepositoryOutcome};
use async_trait::async_trait;
use tracing::{info, warn};

/// Progress callback for per-repository status updates
///
/// Outcomes are reported as the batch proceeds, not buffered to the end.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// Called with a human-readable status line
    async fn on_message(&self, message: &str);
}

/// Reporter that discards all messages
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

#[async_trait]
impl ProgressReporter for SilentReporter {
    async fn on_message(&self, _message: &str) {}
}

/// Process every configured repository, strictly in order.
///
/// Returns an error only for batch-level configuration problems (empty
/// repository list); per-repository errors land in the `failed` bucket.
pub async fn run_batch(
    config: &BatchConfig,
    platform: &dyn HostingService,
    strategy: &dyn MergeStrategy,
    progress: &dyn ProgressReporter,
) -> Result<BatchResult> {
    if config.repositories.is_empty() {
        return Err(Error::Config(
            "target repository list must not be empty".to_string(),
        ));
    }

    let mut result = BatchResult::default();

    for spec in &config.repositories {
        progress.on_message(&format!("Processing {spec}...")).await;

        let outcome = match RepoId::parse(spec) {
            // Malformed identifier: record and move on, never invoke the pipeline
            Err(e) => {
                warn!(repo = %spec, error = %e, "invalid repository identifier");
                RepositoryOutcome::Failed {
                    repo: spec.clone(),
                    error: e.to_string(),
                }
            }
            Ok(repo) => match process_repository(&repo, config, platform, strategy).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(repo = %repo, error = %e, "repository failed");
                    RepositoryOutcome::Failed {
                        repo: repo.to_string(),
                        error: e.to_string(),
                    }
                }
            },
        };

        report_outcome(progress, &outcome).await;
        result.record(outcome);
    }

    let summary = result.summary();
    info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        skipped = summary.skipped,
        "batch complete"
    );
    Ok(result)
}

async fn report_outcome(progress: &dyn ProgressReporter, outcome: &RepositoryOutcome) {
    match outcome {
        RepositoryOutcome::Success {
            repo,
            commits_count,
            merge_sha,
            ..
        } => {
            progress
                .on_message(&format!(
                    "✅ {repo}: squashed {commits_count} commit(s) into {}",
                    &merge_sha[..merge_sha.len().min(8)]
                ))
                .await;
        }
        RepositoryOutcome::Skipped { repo, reason } => {
            progress
                .on_message(&format!("⏭️  {repo}: skipped ({reason})"))
                .await;
        }
        RepositoryOutcome::Failed { repo, error } => {
            progress.on_message(&format!("❌ {repo}: {error}")).await;
        }
    }
}
