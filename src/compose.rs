//! Commit-message and release-note composition

use crate::types::CommitInfo;

/// Maximum commits listed in the squash commit trailer
const TRAILER_COMMIT_CAP: usize = 10;

/// Maximum subject length in a trailer line
const TRAILER_SUBJECT_LEN: usize = 60;

/// Default squash commit header when no template is configured
pub const DEFAULT_MESSAGE_HEADER: &str = "Squash merge";

/// Substitute `{source}` and `{target}` placeholders in a template.
///
/// Single-replace semantics: a template containing a placeholder twice only
/// has the first occurrence replaced.
pub fn render_template(template: &str, source: &str, target: &str) -> String {
    template
        .replacen("{source}", source, 1)
        .replacen("{target}", target, 1)
}

/// Build the squash commit message: templated (or default) header plus a
/// deterministic trailer listing the squashed commits.
pub fn squash_commit_message(
    template: Option<&str>,
    source: &str,
    target: &str,
    commits: &[CommitInfo],
) -> String {
    let header = template.map_or_else(
        || format!("{DEFAULT_MESSAGE_HEADER} {source} into {target}"),
        |t| render_template(t, source, target),
    );
    format!("{header}\n\n{}", commit_trailer(commits))
}

/// `Merged N commits:` followed by up to ten `- <8-char sha>: <subject>`
/// lines in comparison order, plus an overflow line when more exist.
fn commit_trailer(commits: &[CommitInfo]) -> String {
    let mut trailer = format!("Merged {} commits:", commits.len());
    for commit in commits.iter().take(TRAILER_COMMIT_CAP) {
        let subject: String = commit.subject().chars().take(TRAILER_SUBJECT_LEN).collect();
        trailer.push_str(&format!("\n- {}: {subject}", commit.short_sha()));
    }
    if commits.len() > TRAILER_COMMIT_CAP {
        trailer.push_str(&format!(
            "\n... and {} more commits",
            commits.len() - TRAILER_COMMIT_CAP
        ));
    }
    trailer
}

/// Markdown release notes: one bullet per squashed commit, in comparison
/// order, no truncation and no cap.
pub fn release_notes(commits: &[CommitInfo]) -> String {
    commits
        .iter()
        .map(|c| format!("- {} ({})", c.subject(), c.short_sha()))
        .collect::<Vec<_>>()
        .join("\n")
}
