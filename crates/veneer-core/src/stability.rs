//! Release tags and trim levels.
//!
//! A [`ReleaseTag`] is the ordered stability marker attached to a
//! declaration; a [`TrimLevel`] is the report-wide minimum the visibility
//! filter applies. The two are deliberately separate enums: `untrimmed` is
//! a threshold, not a tag a declaration can carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stability marker attached to a declaration, ordered from least to most
/// stable.
///
/// A declaration without its own tag inherits the tag of its nearest tagged
/// ancestor, defaulting to [`ReleaseTag::Public`] when no ancestor carries
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseTag {
    Internal,
    Alpha,
    Beta,
    Public,
}

impl ReleaseTag {
    /// The tag as it appears in synopsis comments, e.g. `@beta`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseTag::Internal => "@internal",
            ReleaseTag::Alpha => "@alpha",
            ReleaseTag::Beta => "@beta",
            ReleaseTag::Public => "@public",
        }
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The minimum stability a declaration must have to appear in a report.
///
/// Levels are ordered low to high: `untrimmed` includes everything;
/// `public` requires *exactly* [`ReleaseTag::Public`] — a public report
/// contains only finalized surface, not "at least as stable as public".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimLevel {
    Untrimmed,
    Alpha,
    Beta,
    Public,
}

impl TrimLevel {
    /// Whether a declaration with effective tag `tag` passes this level.
    pub fn admits(&self, tag: ReleaseTag) -> bool {
        match self {
            TrimLevel::Untrimmed => true,
            TrimLevel::Alpha => tag >= ReleaseTag::Alpha,
            TrimLevel::Beta => tag >= ReleaseTag::Beta,
            // Exact equality, not >=: see the type-level docs.
            TrimLevel::Public => tag == ReleaseTag::Public,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrimLevel::Untrimmed => "untrimmed",
            TrimLevel::Alpha => "alpha",
            TrimLevel::Beta => "beta",
            TrimLevel::Public => "public",
        }
    }
}

impl fmt::Display for TrimLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An unrecognized trim level in configuration.
///
/// This is a fatal configuration error; the filter never silently falls
/// back to a default level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown trim level `{0}`, expected `untrimmed`, `alpha`, `beta`, or `public`")]
pub struct TrimLevelParseError(pub String);

impl FromStr for TrimLevel {
    type Err = TrimLevelParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "untrimmed" => Ok(TrimLevel::Untrimmed),
            "alpha" => Ok(TrimLevel::Alpha),
            "beta" => Ok(TrimLevel::Beta),
            "public" => Ok(TrimLevel::Public),
            other => Err(TrimLevelParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_tag_ordering() {
        assert!(ReleaseTag::Internal < ReleaseTag::Alpha);
        assert!(ReleaseTag::Alpha < ReleaseTag::Beta);
        assert!(ReleaseTag::Beta < ReleaseTag::Public);
    }

    #[test]
    fn test_untrimmed_admits_everything() {
        for tag in [
            ReleaseTag::Internal,
            ReleaseTag::Alpha,
            ReleaseTag::Beta,
            ReleaseTag::Public,
        ] {
            assert!(TrimLevel::Untrimmed.admits(tag));
        }
    }

    #[test]
    fn test_beta_level_admits_beta_and_public() {
        assert!(!TrimLevel::Beta.admits(ReleaseTag::Internal));
        assert!(!TrimLevel::Beta.admits(ReleaseTag::Alpha));
        assert!(TrimLevel::Beta.admits(ReleaseTag::Beta));
        assert!(TrimLevel::Beta.admits(ReleaseTag::Public));
    }

    #[test]
    fn test_public_level_requires_exact_public() {
        assert!(!TrimLevel::Public.admits(ReleaseTag::Beta));
        assert!(TrimLevel::Public.admits(ReleaseTag::Public));
    }

    #[test]
    fn test_monotone_below_public_boundary() {
        // For T1 <= T2 (excluding the public boundary), inclusion at T2
        // implies inclusion at T1.
        let levels = [TrimLevel::Untrimmed, TrimLevel::Alpha, TrimLevel::Beta];
        let tags = [
            ReleaseTag::Internal,
            ReleaseTag::Alpha,
            ReleaseTag::Beta,
            ReleaseTag::Public,
        ];
        for (i, low) in levels.iter().enumerate() {
            for high in &levels[i..] {
                for tag in tags {
                    if high.admits(tag) {
                        assert!(low.admits(tag), "{high}: {tag} admitted but {low} rejects");
                    }
                }
            }
        }
    }

    #[test]
    fn test_trim_level_from_str() {
        assert_eq!("beta".parse::<TrimLevel>(), Ok(TrimLevel::Beta));
        assert_eq!("untrimmed".parse::<TrimLevel>(), Ok(TrimLevel::Untrimmed));
    }

    #[test]
    fn test_trim_level_from_str_rejects_unknown() {
        let err = "stable".parse::<TrimLevel>().unwrap_err();
        assert_eq!(err, TrimLevelParseError("stable".to_string()));
        assert!(err.to_string().contains("unknown trim level"));
    }

    #[test]
    fn test_release_tag_display() {
        assert_eq!(ReleaseTag::Beta.to_string(), "@beta");
        assert_eq!(TrimLevel::Public.to_string(), "public");
    }
}
