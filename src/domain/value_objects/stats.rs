//! Attribute and skill vocabulary
//!
//! The stat model is fixed: four attributes, each owning exactly six skills.
//! Lookups by name go through [`StatKey`] so an unknown name is a parse
//! error rather than a silent default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Lowest value an authored attribute or skill may hold
pub const MIN_STAT_VALUE: i32 = 1;
/// Highest value an authored attribute or skill may hold
pub const MAX_STAT_VALUE: i32 = 20;

/// The four attribute groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Intellect,
    Psyche,
    Physique,
    Motorics,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Intellect,
        Attribute::Psyche,
        Attribute::Physique,
        Attribute::Motorics,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Intellect => 0,
            Self::Psyche => 1,
            Self::Physique => 2,
            Self::Motorics => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intellect => "intellect",
            Self::Psyche => "psyche",
            Self::Physique => "physique",
            Self::Motorics => "motorics",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Intellect => "Intellect",
            Self::Psyche => "Psyche",
            Self::Physique => "Physique",
            Self::Motorics => "Motorics",
        }
    }

    /// The six skills grouped under this attribute
    pub fn skills(self) -> &'static [Skill] {
        let start = self.index() * SKILLS_PER_ATTRIBUTE;
        &Skill::ALL[start..start + SKILLS_PER_ATTRIBUTE]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intellect" => Ok(Self::Intellect),
            "psyche" => Ok(Self::Psyche),
            "physique" => Ok(Self::Physique),
            "motorics" => Ok(Self::Motorics),
            other => Err(DomainError::parse(format!("Unknown attribute: {}", other))),
        }
    }
}

const SKILLS_PER_ATTRIBUTE: usize = 6;

/// The 24 skills, declared in attribute order (six per attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    // Intellect
    Logic,
    Encyclopedia,
    Rhetoric,
    Drama,
    Conceptualization,
    VisualCalculus,
    // Psyche
    Volition,
    InlandEmpire,
    Empathy,
    Authority,
    Suggestion,
    #[serde(alias = "espirit_de_corps")]
    EspritDeCorps,
    // Physique
    Endurance,
    PainThreshold,
    PhysicalInstrument,
    Electrochemistry,
    Shivers,
    HalfLight,
    // Motorics
    HandEyeCoordination,
    Perception,
    ReactionSpeed,
    SavoirFaire,
    Interfacing,
    Composure,
}

impl Skill {
    pub const COUNT: usize = 24;

    pub const ALL: [Skill; Skill::COUNT] = [
        Skill::Logic,
        Skill::Encyclopedia,
        Skill::Rhetoric,
        Skill::Drama,
        Skill::Conceptualization,
        Skill::VisualCalculus,
        Skill::Volition,
        Skill::InlandEmpire,
        Skill::Empathy,
        Skill::Authority,
        Skill::Suggestion,
        Skill::EspritDeCorps,
        Skill::Endurance,
        Skill::PainThreshold,
        Skill::PhysicalInstrument,
        Skill::Electrochemistry,
        Skill::Shivers,
        Skill::HalfLight,
        Skill::HandEyeCoordination,
        Skill::Perception,
        Skill::ReactionSpeed,
        Skill::SavoirFaire,
        Skill::Interfacing,
        Skill::Composure,
    ];

    /// Position of this skill in [`Skill::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The attribute this skill is grouped under
    pub fn attribute(self) -> Attribute {
        Attribute::ALL[self.index() / SKILLS_PER_ATTRIBUTE]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logic => "logic",
            Self::Encyclopedia => "encyclopedia",
            Self::Rhetoric => "rhetoric",
            Self::Drama => "drama",
            Self::Conceptualization => "conceptualization",
            Self::VisualCalculus => "visual_calculus",
            Self::Volition => "volition",
            Self::InlandEmpire => "inland_empire",
            Self::Empathy => "empathy",
            Self::Authority => "authority",
            Self::Suggestion => "suggestion",
            Self::EspritDeCorps => "esprit_de_corps",
            Self::Endurance => "endurance",
            Self::PainThreshold => "pain_threshold",
            Self::PhysicalInstrument => "physical_instrument",
            Self::Electrochemistry => "electrochemistry",
            Self::Shivers => "shivers",
            Self::HalfLight => "half_light",
            Self::HandEyeCoordination => "hand_eye_coordination",
            Self::Perception => "perception",
            Self::ReactionSpeed => "reaction_speed",
            Self::SavoirFaire => "savoir_faire",
            Self::Interfacing => "interfacing",
            Self::Composure => "composure",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        if normalized == "espirit_de_corps" {
            return Ok(Self::EspritDeCorps);
        }
        Skill::ALL
            .iter()
            .copied()
            .find(|skill| skill.as_str() == normalized)
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}

/// Any stat a character carries: an attribute base value or a skill value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum StatKey {
    Attribute(Attribute),
    Skill(Skill),
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(a) => write!(f, "{}", a),
            Self::Skill(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for StatKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(skill) = s.parse::<Skill>() {
            return Ok(Self::Skill(skill));
        }
        s.parse::<Attribute>()
            .map(Self::Attribute)
            .map_err(|_| DomainError::parse(format!("Unknown stat: {}", s)))
    }
}

impl From<Skill> for StatKey {
    fn from(skill: Skill) -> Self {
        Self::Skill(skill)
    }
}

impl From<Attribute> for StatKey {
    fn from(attribute: Attribute) -> Self {
        Self::Attribute(attribute)
    }
}

/// Check that an authored stat value lies in the allowed range
pub fn validate_stat_value(key: StatKey, value: i32) -> Result<(), DomainError> {
    if !(MIN_STAT_VALUE..=MAX_STAT_VALUE).contains(&value) {
        return Err(DomainError::validation(format!(
            "{} must be between {} and {}, got {}",
            key, MIN_STAT_VALUE, MAX_STAT_VALUE, value
        )));
    }
    Ok(())
}
