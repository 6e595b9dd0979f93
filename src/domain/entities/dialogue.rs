//! Dialogue entities - Dialogues, their posts (nodes) and player options
//!
//! Options are the edges of the dialogue graph. They point at the next
//! post or dialogue and may carry quest side effects that fire when the
//! option is taken.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Character;
use crate::domain::value_objects::{
    DialogueId, ObjectiveId, OptionId, PostId, ProjectId, QuestId, SkillCheckId, StatKey,
};

/// A dialogue tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    pub id: DialogueId,
    pub project_id: ProjectId,
    pub title: String,
}

impl Dialogue {
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id: DialogueId::new(),
            project_id,
            title: title.into(),
        }
    }
}

/// A node of a dialogue: one line spoken by someone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialoguePost {
    pub id: PostId,
    pub dialogue_id: DialogueId,
    /// Position within the dialogue; options at or after it are offered
    pub order: u32,
    pub speaker: String,
    pub text: String,
}

impl DialoguePost {
    pub fn new(dialogue_id: DialogueId, order: u32, text: impl Into<String>) -> Self {
        Self {
            id: PostId::new(),
            dialogue_id,
            order,
            speaker: String::new(),
            text: text.into(),
        }
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = speaker.into();
        self
    }
}

/// Reference to one objective inside a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectiveRef {
    pub quest_id: QuestId,
    pub objective_id: ObjectiveId,
}

/// A player-facing choice within a dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOption {
    pub id: OptionId,
    pub dialogue_id: DialogueId,
    pub order: u32,
    pub text: String,
    pub required_skill: Option<StatKey>,
    /// Minimum value for `required_skill`; without it the skill does not gate
    pub required_skill_value: Option<i32>,
    pub skill_check_id: Option<SkillCheckId>,
    /// Externally set narrative flag, independent of skill gating
    pub condition_met: bool,
    pub is_available: bool,
    pub next_post_id: Option<PostId>,
    pub next_dialogue_id: Option<DialogueId>,
    /// Post to branch to when the linked check is failed
    pub failure_post_id: Option<PostId>,
    pub quest_trigger: Option<QuestId>,
    pub quest_completion: Option<QuestId>,
    pub objective_trigger: Option<ObjectiveRef>,
    pub objective_completion: Option<ObjectiveRef>,
}

impl DialogueOption {
    pub fn new(dialogue_id: DialogueId, order: u32, text: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(),
            dialogue_id,
            order,
            text: text.into(),
            required_skill: None,
            required_skill_value: None,
            skill_check_id: None,
            condition_met: true,
            is_available: true,
            next_post_id: None,
            next_dialogue_id: None,
            failure_post_id: None,
            quest_trigger: None,
            quest_completion: None,
            objective_trigger: None,
            objective_completion: None,
        }
    }

    pub fn with_requirement(mut self, stat: impl Into<StatKey>, minimum: i32) -> Self {
        self.required_skill = Some(stat.into());
        self.required_skill_value = Some(minimum);
        self
    }

    pub fn with_skill_check(mut self, skill_check_id: SkillCheckId) -> Self {
        self.skill_check_id = Some(skill_check_id);
        self
    }

    pub fn with_next_post(mut self, post_id: PostId) -> Self {
        self.next_post_id = Some(post_id);
        self
    }

    pub fn with_next_dialogue(mut self, dialogue_id: DialogueId) -> Self {
        self.next_dialogue_id = Some(dialogue_id);
        self
    }

    pub fn with_failure_post(mut self, post_id: PostId) -> Self {
        self.failure_post_id = Some(post_id);
        self
    }

    pub fn triggers_quest(mut self, quest_id: QuestId) -> Self {
        self.quest_trigger = Some(quest_id);
        self
    }

    pub fn completes_quest(mut self, quest_id: QuestId) -> Self {
        self.quest_completion = Some(quest_id);
        self
    }

    pub fn triggers_objective(mut self, quest_id: QuestId, objective_id: ObjectiveId) -> Self {
        self.objective_trigger = Some(ObjectiveRef {
            quest_id,
            objective_id,
        });
        self
    }

    pub fn completes_objective(mut self, quest_id: QuestId, objective_id: ObjectiveId) -> Self {
        self.objective_completion = Some(ObjectiveRef {
            quest_id,
            objective_id,
        });
        self
    }

    /// Whether the character may pick this option
    pub fn is_accessible(&self, character: &Character) -> bool {
        if !self.is_available || !self.condition_met {
            return false;
        }
        match (self.required_skill, self.required_skill_value) {
            (Some(stat), Some(minimum)) => character.stat(stat) >= minimum,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Skill;

    fn character_with_logic(value: i32) -> Character {
        Character::new(ProjectId::new(), "Harry")
            .with_skill(Skill::Logic, value)
            .unwrap()
    }

    #[test]
    fn test_skill_gate_blocks_below_threshold() {
        let option = DialogueOption::new(DialogueId::new(), 0, "Deduce the motive")
            .with_requirement(Skill::Logic, 10);

        assert!(!option.is_accessible(&character_with_logic(8)));
        assert!(option.is_accessible(&character_with_logic(10)));
        assert!(option.is_accessible(&character_with_logic(14)));
    }

    #[test]
    fn test_unavailable_option_is_never_accessible() {
        let mut option = DialogueOption::new(DialogueId::new(), 0, "Leave");
        option.is_available = false;
        assert!(!option.is_accessible(&character_with_logic(20)));
    }

    #[test]
    fn test_unmet_condition_blocks() {
        let mut option = DialogueOption::new(DialogueId::new(), 0, "Mention the tie");
        option.condition_met = false;
        assert!(!option.is_accessible(&character_with_logic(20)));
    }

    #[test]
    fn test_required_skill_without_threshold_does_not_gate() {
        let mut option = DialogueOption::new(DialogueId::new(), 0, "Ponder");
        option.required_skill = Some(StatKey::Skill(Skill::Logic));
        assert!(option.is_accessible(&character_with_logic(1)));
    }

    #[test]
    fn test_attribute_requirement() {
        let option = DialogueOption::new(DialogueId::new(), 0, "Lift the crate")
            .with_requirement(crate::domain::value_objects::Attribute::Physique, 3);
        let weak = Character::new(ProjectId::new(), "Cuno");
        assert!(!option.is_accessible(&weak));
    }
}
