//! merge-sweep - batch squash-merge propagation across repositories
//!
//! Given a list of `owner/name` repositories, merge-sweep merges a source
//! branch into a target branch in each one using a squash strategy,
//! optionally deletes (and recreates) the source branch, optionally tags a
//! release, and derives a semantic-version bump hint from the composed
//! commit messages. Repositories are processed strictly sequentially with
//! per-repository failure isolation: a malformed or inaccessible repository
//! never blocks the rest of the batch.

pub mod batch;
pub mod compose;
pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod types;
pub mod version;
