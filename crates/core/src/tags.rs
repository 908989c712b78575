//! Card tag vocabulary.
//!
//! Tags are stored as free-form strings; the editor offers this fixed set.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// The narrative role a card plays in its chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardTag {
    Introduction,
    Conflict,
    Development,
    Climax,
    Resolution,
    Support,
    Revelation,
    Sacrifice,
    Legacy,
    Shadow,
    Manipulation,
    Confrontation,
    Defeat,
    Guidance,
    TechnicalSupport,
}

impl CardTag {
    /// Every tag, in the order the editor lists them.
    pub const ALL: [CardTag; 15] = [
        CardTag::Introduction,
        CardTag::Conflict,
        CardTag::Development,
        CardTag::Climax,
        CardTag::Resolution,
        CardTag::Support,
        CardTag::Revelation,
        CardTag::Sacrifice,
        CardTag::Legacy,
        CardTag::Shadow,
        CardTag::Manipulation,
        CardTag::Confrontation,
        CardTag::Defeat,
        CardTag::Guidance,
        CardTag::TechnicalSupport,
    ];

    /// The stored slug.
    pub fn as_str(self) -> &'static str {
        match self {
            CardTag::Introduction => "introduction",
            CardTag::Conflict => "conflict",
            CardTag::Development => "development",
            CardTag::Climax => "climax",
            CardTag::Resolution => "resolution",
            CardTag::Support => "support",
            CardTag::Revelation => "revelation",
            CardTag::Sacrifice => "sacrifice",
            CardTag::Legacy => "legacy",
            CardTag::Shadow => "shadow",
            CardTag::Manipulation => "manipulation",
            CardTag::Confrontation => "confrontation",
            CardTag::Defeat => "defeat",
            CardTag::Guidance => "guidance",
            CardTag::TechnicalSupport => "technical-support",
        }
    }

    /// Badge label: the slug with its first letter capitalised.
    pub fn label(self) -> String {
        let slug = self.as_str();
        let mut chars = slug.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for CardTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown card tag '{s}'")))
    }
}
