//! Difficulty tiers and their fixed target numbers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Named difficulty of a skill check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Trivial,
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
    Impossible,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 6] = [
        DifficultyTier::Trivial,
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
        DifficultyTier::Extreme,
        DifficultyTier::Impossible,
    ];

    /// The DC this tier maps to. The mapping is fixed for every check.
    pub fn target_number(self) -> i32 {
        match self {
            Self::Trivial => 5,
            Self::Easy => 10,
            Self::Medium => 15,
            Self::Hard => 20,
            Self::Extreme => 25,
            Self::Impossible => 30,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Trivial => "Trivial",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Extreme => "Extreme",
            Self::Impossible => "Impossible",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DifficultyTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trivial" => Ok(Self::Trivial),
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "extreme" => Ok(Self::Extreme),
            "impossible" => Ok(Self::Impossible),
            other => Err(DomainError::parse(format!("Unknown difficulty: {}", other))),
        }
    }
}
