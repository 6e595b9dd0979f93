//! Quest entity - Status machine, progress counter and owned objectives
//!
//! Transitions here are purely in-memory. Cross-quest effects (unlocking
//! dependents) and persistence belong to the quest service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Character;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{CharacterId, DialogueId, ObjectiveId, ProjectId, QuestId, StatKey};

/// Lifecycle state of a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    #[default]
    Available,
    Active,
    Completed,
    Failed,
    Locked,
    Paused,
}

impl QuestStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Locked => "Locked",
            Self::Paused => "Paused",
        }
    }

    /// Completed and failed quests take no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Authoring category of a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Main,
    #[default]
    Side,
    Dialogue,
    SkillCheck,
    Social,
}

/// A sub-goal of a quest with its own counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestObjective {
    pub id: ObjectiveId,
    pub description: String,
    pub required_count: u32,
    pub current_count: u32,
    pub is_completed: bool,
}

impl QuestObjective {
    pub fn new(description: impl Into<String>, required_count: u32) -> Self {
        Self {
            id: ObjectiveId::new(),
            description: description.into(),
            required_count,
            current_count: 0,
            is_completed: false,
        }
    }

    /// Returns true when this call completed the objective
    fn advance(&mut self, amount: u32) -> bool {
        self.current_count = self
            .current_count
            .saturating_add(amount)
            .min(self.required_count);
        if self.current_count >= self.required_count && !self.is_completed {
            return self.mark_completed();
        }
        false
    }

    /// Returns false if the objective was already completed
    fn mark_completed(&mut self) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        self.current_count = self.required_count;
        true
    }
}

/// Result of an objective transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveUpdate {
    pub objective: QuestObjective,
    /// The objective became complete during this transition
    pub objective_completed: bool,
    /// The parent quest reached max progress during this transition
    pub quest_completed: bool,
}

/// Availability of a quest for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestAvailability {
    pub available: bool,
    pub can_start: bool,
}

/// A quest with prerequisites, stat requirements and objectives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub quest_type: QuestType,
    pub status: QuestStatus,
    pub progress: u32,
    pub max_progress: u32,
    /// Quests that must be completed before this one becomes available
    pub prerequisites: Vec<QuestId>,
    /// Stat name to minimum value
    pub required_skills: BTreeMap<String, i32>,
    pub assigned_character: Option<CharacterId>,
    pub dialogue_id: Option<DialogueId>,
    pub objectives: Vec<QuestObjective>,
}

impl Quest {
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id: QuestId::new(),
            project_id,
            title: title.into(),
            description: String::new(),
            quest_type: QuestType::default(),
            status: QuestStatus::Available,
            progress: 0,
            max_progress: 1,
            prerequisites: Vec::new(),
            required_skills: BTreeMap::new(),
            assigned_character: None,
            dialogue_id: None,
            objectives: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_type(mut self, quest_type: QuestType) -> Self {
        self.quest_type = quest_type;
        self
    }

    pub fn with_max_progress(mut self, max_progress: u32) -> Self {
        self.max_progress = max_progress;
        self
    }

    pub fn with_prerequisite(mut self, quest_id: QuestId) -> Self {
        self.prerequisites.push(quest_id);
        self
    }

    pub fn with_required_skill(mut self, stat: impl Into<String>, minimum: i32) -> Self {
        self.required_skills.insert(stat.into(), minimum);
        self
    }

    pub fn with_objective(mut self, objective: QuestObjective) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_dialogue(mut self, dialogue_id: DialogueId) -> Self {
        self.dialogue_id = Some(dialogue_id);
        self
    }

    /// Author the quest as locked until a prerequisite completes
    pub fn locked(mut self) -> Self {
        self.status = QuestStatus::Locked;
        self
    }

    /// Check authoring invariants that do not need other quests
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("Quest title cannot be empty"));
        }
        if self.max_progress == 0 {
            return Err(DomainError::validation("Quest max progress must be at least 1"));
        }
        if self.progress > self.max_progress {
            return Err(DomainError::validation(format!(
                "Quest progress {} exceeds max progress {}",
                self.progress, self.max_progress
            )));
        }
        if self.prerequisites.contains(&self.id) {
            return Err(DomainError::validation(format!(
                "Quest {} cannot be its own prerequisite",
                self.id
            )));
        }
        for name in self.required_skills.keys() {
            name.parse::<StatKey>().map_err(|_| {
                DomainError::validation(format!("Unknown stat in quest requirements: {}", name))
            })?;
        }
        for objective in &self.objectives {
            if objective.required_count == 0 {
                return Err(DomainError::validation(format!(
                    "Objective '{}' must require at least 1",
                    objective.description
                )));
            }
        }
        Ok(())
    }

    /// Whether the character could take this quest now.
    ///
    /// `prerequisites` holds the loaded prerequisite quests; an id that is
    /// missing from it counts as not completed.
    pub fn is_available_for_character(&self, character: &Character, prerequisites: &[Quest]) -> bool {
        if self.status != QuestStatus::Available {
            return false;
        }

        let prerequisites_met = self.prerequisites.iter().all(|required| {
            prerequisites
                .iter()
                .any(|quest| quest.id == *required && quest.status == QuestStatus::Completed)
        });
        if !prerequisites_met {
            return false;
        }

        self.required_skills
            .iter()
            .all(|(name, minimum)| match character.stat_by_name(name) {
                Some(value) => value >= *minimum,
                // A stat the character does not carry never blocks
                None => true,
            })
    }

    pub fn can_start(&self, character: &Character, prerequisites: &[Quest]) -> bool {
        self.is_available_for_character(character, prerequisites)
            && self.status == QuestStatus::Available
    }

    pub fn availability(&self, character: &Character, prerequisites: &[Quest]) -> QuestAvailability {
        QuestAvailability {
            available: self.is_available_for_character(character, prerequisites),
            can_start: self.can_start(character, prerequisites),
        }
    }

    /// Activate for a character. Callers check [`Quest::can_start`] first.
    pub fn start(&mut self, character_id: CharacterId) {
        self.status = QuestStatus::Active;
        self.assigned_character = Some(character_id);
        self.progress = 0;
    }

    /// Add progress, clamped to max. Returns true when this call completed the quest.
    /// Completed and failed quests are left unchanged.
    pub fn update_progress(&mut self, amount: u32) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.progress = self.progress.saturating_add(amount).min(self.max_progress);
        if self.progress >= self.max_progress {
            self.complete();
            return true;
        }
        false
    }

    pub fn complete(&mut self) {
        self.status = QuestStatus::Completed;
        self.progress = self.max_progress;
    }

    pub fn fail(&mut self) {
        self.status = QuestStatus::Failed;
    }

    /// Flip locked to available. Returns false for any other status.
    pub fn unlock(&mut self) -> bool {
        if self.status == QuestStatus::Locked {
            self.status = QuestStatus::Available;
            return true;
        }
        false
    }

    pub fn pause(&mut self) -> Result<(), DomainError> {
        if self.status != QuestStatus::Active {
            return Err(DomainError::invalid_state_transition(format!(
                "Cannot pause quest in status {}",
                self.status
            )));
        }
        self.status = QuestStatus::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), DomainError> {
        if self.status != QuestStatus::Paused {
            return Err(DomainError::invalid_state_transition(format!(
                "Cannot resume quest in status {}",
                self.status
            )));
        }
        self.status = QuestStatus::Active;
        Ok(())
    }

    pub fn is_active_for(&self, character_id: CharacterId) -> bool {
        self.status == QuestStatus::Active && self.assigned_character == Some(character_id)
    }

    pub fn objective(&self, objective_id: ObjectiveId) -> Option<&QuestObjective> {
        self.objectives.iter().find(|o| o.id == objective_id)
    }

    fn objective_mut(&mut self, objective_id: ObjectiveId) -> Result<&mut QuestObjective, DomainError> {
        if self.status != QuestStatus::Active {
            return Err(DomainError::invalid_state_transition(format!(
                "Cannot advance objectives of quest in status {}",
                self.status
            )));
        }
        self.objectives
            .iter_mut()
            .find(|o| o.id == objective_id)
            .ok_or_else(|| DomainError::not_found("QuestObjective", objective_id))
    }

    /// Advance an objective. Completing it adds exactly 1 to quest progress.
    pub fn update_objective_progress(
        &mut self,
        objective_id: ObjectiveId,
        amount: u32,
    ) -> Result<ObjectiveUpdate, DomainError> {
        let objective = self.objective_mut(objective_id)?;
        let objective_completed = objective.advance(amount);
        let objective = objective.clone();
        let quest_completed = objective_completed && self.update_progress(1);
        Ok(ObjectiveUpdate {
            objective,
            objective_completed,
            quest_completed,
        })
    }

    /// Mark an objective complete. Already-completed objectives are left
    /// alone and contribute nothing further.
    pub fn complete_objective(&mut self, objective_id: ObjectiveId) -> Result<ObjectiveUpdate, DomainError> {
        let objective = self.objective_mut(objective_id)?;
        let objective_completed = objective.mark_completed();
        let objective = objective.clone();
        let quest_completed = objective_completed && self.update_progress(1);
        Ok(ObjectiveUpdate {
            objective,
            objective_completed,
            quest_completed,
        })
    }
}
