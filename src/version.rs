//! Version-bump classification from commit message text
//!
//! The hint drives downstream semantic-version increment decisions; this
//! module only classifies text, it never computes a version number.

use serde::{Deserialize, Serialize};

/// Severity of the version bump suggested by commit text
///
/// Totally ordered: `None < Patch < Minor < Major`. The derived `Ord`
/// follows variant declaration order, which makes the batch-level reduction
/// a plain `max` fold with `None` as the identity element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpHint {
    /// No keyword found
    #[default]
    None,
    /// Backwards-compatible fix
    Patch,
    /// Backwards-compatible feature
    Minor,
    /// Breaking change
    Major,
}

impl BumpHint {
    /// Value written to CI outputs; `None` becomes the empty string
    pub const fn as_output(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl std::fmt::Display for BumpHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Patch => write!(f, "patch"),
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
        }
    }
}

/// Classify a single commit message.
///
/// The message is lower-cased and trimmed, then checked for the keywords
/// `major`, `minor`, `patch` in severity order. A single `contains` check
/// per keyword suffices: any message starting with `major:` already
/// contains `major`, so the prefix form needs no separate test.
pub fn classify_message(message: &str) -> BumpHint {
    let message = message.trim().to_lowercase();
    if message.contains("major") {
        BumpHint::Major
    } else if message.contains("minor") {
        BumpHint::Minor
    } else if message.contains("patch") {
        BumpHint::Patch
    } else {
        BumpHint::None
    }
}

/// Reduce hints from multiple repositories to the highest severity seen
pub fn reduce_hints<I: IntoIterator<Item = BumpHint>>(hints: I) -> BumpHint {
    hints.into_iter().fold(BumpHint::None, BumpHint::max)
}
