//! Roll result - Append-only audit record of one skill check resolution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::roll_resolver::{OutcomeType, RollOutcome};
use crate::domain::value_objects::{CharacterId, RollResultId, Skill, SkillCheckId};

/// One resolved attempt of a skill check by a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub id: RollResultId,
    pub character_id: CharacterId,
    pub skill_check_id: SkillCheckId,
    pub skill: Skill,
    pub skill_value: i32,
    pub die: i32,
    pub total: i32,
    pub target_number: i32,
    pub success: bool,
    pub critical_success: bool,
    pub critical_failure: bool,
    pub outcome_text: String,
    pub rolled_at: DateTime<Utc>,
}

impl RollResult {
    pub fn record(
        character_id: CharacterId,
        skill_check_id: SkillCheckId,
        skill: Skill,
        outcome: &RollOutcome,
        outcome_text: impl Into<String>,
        rolled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RollResultId::new(),
            character_id,
            skill_check_id,
            skill,
            skill_value: outcome.skill_value,
            die: outcome.die,
            total: outcome.total,
            target_number: outcome.target_number,
            success: outcome.success,
            critical_success: outcome.critical_success,
            critical_failure: outcome.critical_failure,
            outcome_text: outcome_text.into(),
            rolled_at,
        }
    }

    pub fn outcome(&self) -> RollOutcome {
        RollOutcome {
            die: self.die,
            skill_value: self.skill_value,
            total: self.total,
            target_number: self.target_number,
            success: self.success,
            critical_success: self.critical_success,
            critical_failure: self.critical_failure,
        }
    }

    pub fn outcome_type(&self) -> OutcomeType {
        self.outcome().outcome_type()
    }
}
