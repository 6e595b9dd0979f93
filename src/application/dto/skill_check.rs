use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{CheckKind, OutcomeTexts, RollResult, SkillCheck};
use crate::domain::error::DomainError;
use crate::domain::services::OutcomeType;
use crate::domain::value_objects::{
    CharacterId, DialogueId, DifficultyTier, ProjectId, RollResultId, Skill, SkillCheckId,
};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to author a skill check with names as free text
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSkillCheckRequestDto {
    pub skill: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub dc_override: Option<i32>,
    #[serde(default)]
    pub kind: CheckKind,
    #[serde(default)]
    pub dialogue_id: Option<DialogueId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub texts: OutcomeTexts,
}

impl CreateSkillCheckRequestDto {
    pub fn into_domain(self, project_id: ProjectId) -> Result<SkillCheck, DomainError> {
        let skill: Skill = self.skill.parse()?;
        let difficulty = match self.difficulty.as_deref() {
            Some(name) => name.parse::<DifficultyTier>()?,
            None => DifficultyTier::default(),
        };

        let mut check = SkillCheck::new(project_id, skill, difficulty)
            .with_kind(self.kind)
            .with_description(self.description)
            .with_texts(self.texts);
        if let Some(dc) = self.dc_override {
            check = check.with_dc_override(dc);
        }
        if let Some(dialogue_id) = self.dialogue_id {
            check = check.with_dialogue(dialogue_id);
        }
        check.validate()?;
        Ok(check)
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Roll result with its classification and arithmetic breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollResultDto {
    pub id: RollResultId,
    pub character_id: CharacterId,
    pub skill_check_id: SkillCheckId,
    pub skill: Skill,
    pub die: i32,
    pub skill_value: i32,
    pub total: i32,
    pub target_number: i32,
    pub success: bool,
    pub critical_success: bool,
    pub critical_failure: bool,
    pub outcome_type: OutcomeType,
    pub outcome_text: String,
    pub breakdown: String,
    pub rolled_at: DateTime<Utc>,
}

impl From<RollResult> for RollResultDto {
    fn from(result: RollResult) -> Self {
        let outcome = result.outcome();
        Self {
            id: result.id,
            character_id: result.character_id,
            skill_check_id: result.skill_check_id,
            skill: result.skill,
            die: result.die,
            skill_value: result.skill_value,
            total: result.total,
            target_number: result.target_number,
            success: result.success,
            critical_success: result.critical_success,
            critical_failure: result.critical_failure,
            outcome_type: outcome.outcome_type(),
            outcome_text: result.outcome_text,
            breakdown: outcome.breakdown(),
            rolled_at: result.rolled_at,
        }
    }
}
