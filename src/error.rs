//! Error types for merge-sweep

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors that can arise while processing a batch
///
/// Errors raised inside one repository's pipeline are caught at the batch
/// boundary and recorded as a `Failed` outcome; they never abort the batch.
/// Only `Config` errors are fatal to the whole run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Batch-level configuration problem (missing token, empty repo list)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Repository identifier is not of the form `owner/name`
    #[error("Invalid repository format: {0}")]
    InvalidRepositoryFormat(String),

    /// GitHub API returned an unexpected response
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// The squash merge hit a conflict and needs manual resolution
    #[error("Merge conflict: {0}")]
    MergeConflict(String),

    /// The merge produced no changes (target already contains source)
    ///
    /// Kept distinct from [`Error::MergeConflict`] so callers can eventually
    /// apply different retry/escalation policy to the two cases.
    #[error("Nothing to merge: {0}")]
    NothingToMerge(String),

    /// A `git` subcommand failed for a reason other than conflict/no-op
    #[error("git error: {0}")]
    Git(String),

    /// Filesystem or subprocess I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failure talking to the hosting API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
