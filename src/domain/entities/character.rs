//! Character entity - Authored characters with attribute and skill values

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::value_objects::{
    validate_stat_value, Attribute, CharacterId, ProjectId, Skill, StatKey, MIN_STAT_VALUE,
};

/// A character that can attempt skill checks and take on quests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub project_id: ProjectId,
    pub name: String,
    /// Base values indexed by [`Attribute::index`]
    attributes: [i32; 4],
    /// Skill values indexed by [`Skill::index`]
    skills: [i32; Skill::COUNT],
}

impl Character {
    /// Create a character with every attribute and skill at the minimum value
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            project_id,
            name: name.into(),
            attributes: [MIN_STAT_VALUE; 4],
            skills: [MIN_STAT_VALUE; Skill::COUNT],
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute, value: i32) -> Result<Self, DomainError> {
        self.set_attribute(attribute, value)?;
        Ok(self)
    }

    pub fn with_skill(mut self, skill: Skill, value: i32) -> Result<Self, DomainError> {
        self.set_skill(skill, value)?;
        Ok(self)
    }

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes[attribute.index()]
    }

    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills[skill.index()]
    }

    /// Read any stat through the closed key vocabulary
    pub fn stat(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Attribute(a) => self.attribute(a),
            StatKey::Skill(s) => self.skill(s),
        }
    }

    /// Look up a stat by its authored name.
    ///
    /// Returns `None` when the name is not part of the vocabulary; callers
    /// that gate on stats treat that as "does not block".
    pub fn stat_by_name(&self, name: &str) -> Option<i32> {
        name.parse::<StatKey>().ok().map(|key| self.stat(key))
    }

    pub fn set_attribute(&mut self, attribute: Attribute, value: i32) -> Result<(), DomainError> {
        validate_stat_value(attribute.into(), value)?;
        self.attributes[attribute.index()] = value;
        Ok(())
    }

    pub fn set_skill(&mut self, skill: Skill, value: i32) -> Result<(), DomainError> {
        validate_stat_value(skill.into(), value)?;
        self.skills[skill.index()] = value;
        Ok(())
    }

    pub fn set_stat(&mut self, key: StatKey, value: i32) -> Result<(), DomainError> {
        match key {
            StatKey::Attribute(a) => self.set_attribute(a, value),
            StatKey::Skill(s) => self.set_skill(s, value),
        }
    }

    /// Attribute base value plus the sum of its six skills
    pub fn attribute_total(&self, attribute: Attribute) -> i32 {
        self.attribute(attribute)
            + attribute
                .skills()
                .iter()
                .map(|skill| self.skill(*skill))
                .sum::<i32>()
    }
}
