//! Skill check entity - A configured test of one skill against a DC
//!
//! A check names a skill, a difficulty tier (or an explicit override
//! target) and the narrative text shown for each outcome band.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::services::roll_resolver::{OutcomeType, RollOutcome};
use crate::domain::value_objects::{DialogueId, DifficultyTier, ProjectId, Skill, SkillCheckId};

/// A skill check that characters can attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheck {
    pub id: SkillCheckId,
    pub project_id: ProjectId,
    /// Dialogue the check was authored in, if any
    pub dialogue_id: Option<DialogueId>,
    pub skill: Skill,
    pub difficulty: DifficultyTier,
    /// Explicit target number; takes precedence over the tier mapping
    pub dc_override: Option<i32>,
    pub kind: CheckKind,
    pub description: String,
    pub texts: OutcomeTexts,
}

impl SkillCheck {
    pub fn new(project_id: ProjectId, skill: Skill, difficulty: DifficultyTier) -> Self {
        Self {
            id: SkillCheckId::new(),
            project_id,
            dialogue_id: None,
            skill,
            difficulty,
            dc_override: None,
            kind: CheckKind::default(),
            description: String::new(),
            texts: OutcomeTexts::default(),
        }
    }

    pub fn with_dc_override(mut self, target_number: i32) -> Self {
        self.dc_override = Some(target_number);
        self
    }

    pub fn with_kind(mut self, kind: CheckKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_dialogue(mut self, dialogue_id: DialogueId) -> Self {
        self.dialogue_id = Some(dialogue_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_texts(mut self, texts: OutcomeTexts) -> Self {
        self.texts = texts;
        self
    }

    /// The DC this check is rolled against
    pub fn target_number(&self) -> i32 {
        self.dc_override
            .unwrap_or_else(|| self.difficulty.target_number())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(dc) = self.dc_override {
            if dc <= 0 {
                return Err(DomainError::validation(format!(
                    "Target number override must be positive, got {}",
                    dc
                )));
            }
        }
        Ok(())
    }

    /// Pick the narrative text for a resolved roll, falling back to
    /// generated messages when a band has no authored text
    pub fn outcome_text(&self, outcome: &RollOutcome) -> String {
        match outcome.outcome_type() {
            OutcomeType::CriticalSuccess => match non_empty(&self.texts.critical_success) {
                Some(text) => text.to_string(),
                None => format!("Critical Success! {}", self.success_text(outcome)),
            },
            OutcomeType::CriticalFailure => match non_empty(&self.texts.critical_failure) {
                Some(text) => text.to_string(),
                None => format!("Critical Failure! {}", self.failure_text(outcome)),
            },
            OutcomeType::Success => self.success_text(outcome),
            OutcomeType::Failure => self.failure_text(outcome),
        }
    }

    fn success_text(&self, outcome: &RollOutcome) -> String {
        match non_empty(&self.texts.success) {
            Some(text) => text.to_string(),
            None => format!("Success! {} vs DC {}", outcome.total, outcome.target_number),
        }
    }

    fn failure_text(&self, outcome: &RollOutcome) -> String {
        match non_empty(&self.texts.failure) {
            Some(text) => text.to_string(),
            None => format!("Failure! {} vs DC {}", outcome.total, outcome.target_number),
        }
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

/// White checks can be retried; red checks get one attempt per character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    #[default]
    White,
    Red,
}

impl CheckKind {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::White)
    }
}

/// Authored narrative text per outcome band. Empty text counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTexts {
    pub success: Option<String>,
    pub failure: Option<String>,
    pub critical_success: Option<String>,
    pub critical_failure: Option<String>,
}

impl OutcomeTexts {
    pub fn simple(success: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            success: Some(success.into()),
            failure: Some(failure.into()),
            critical_success: None,
            critical_failure: None,
        }
    }

    pub fn with_critical_success(mut self, text: impl Into<String>) -> Self {
        self.critical_success = Some(text.into());
        self
    }

    pub fn with_critical_failure(mut self, text: impl Into<String>) -> Self {
        self.critical_failure = Some(text.into());
        self
    }
}
