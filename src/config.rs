//! Batch configuration
//!
//! CI platforms deliver inputs as strings; everything is parsed into real
//! types here, once, at the boundary. The pipeline never sees a
//! stringly-typed flag.

use crate::error::{Error, Result};

/// Which squash-merge strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MergeStrategyKind {
    /// Delegate the squash to the hosting platform's merge endpoint
    #[default]
    Api,
    /// Clone locally and run `git merge --squash` + push
    Local,
}

/// Immutable configuration for one batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Repository identifiers (`owner/name`), in processing order
    pub repositories: Vec<String>,
    /// Branch to merge from
    pub source_branch: String,
    /// Branch to merge into
    pub target_branch: String,
    /// Optional commit-message template with `{source}`/`{target}` placeholders
    pub commit_message_template: Option<String>,
    /// Delete the source branch after a successful merge
    pub delete_source_branch: bool,
    /// Recreate the source branch at the new target tip after deletion
    pub recreate_source_branch: bool,
    /// Create a release after a successful merge
    pub create_release: bool,
    /// Merge strategy selection
    pub strategy: MergeStrategyKind,
}

impl BatchConfig {
    /// Validate batch-level requirements.
    ///
    /// Failures here are fatal to the whole run and are reported before any
    /// repository is processed.
    pub fn validate(&self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(Error::Config("token must not be empty".to_string()));
        }
        if self.repositories.is_empty() {
            return Err(Error::Config(
                "target repository list must not be empty".to_string(),
            ));
        }
        if self.source_branch.trim().is_empty() || self.target_branch.trim().is_empty() {
            return Err(Error::Config(
                "source and target branch names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split a comma-separated repository list, dropping empty entries
pub fn parse_repository_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parse a CI boolean input: the literal `"true"` (any case, surrounding
/// whitespace ignored) is true, anything else is false.
pub fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}
