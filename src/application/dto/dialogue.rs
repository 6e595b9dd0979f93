use serde::{Deserialize, Serialize};

use super::{QuestActionRecord, RollResultDto};
use crate::domain::entities::DialogueOption;
use crate::domain::value_objects::{DialogueId, PostId};

/// Outcome of taking a dialogue option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteOptionResponse {
    pub option: DialogueOption,
    pub quest_actions: Vec<QuestActionRecord>,
    /// Present when the option linked a skill check
    pub roll_result: Option<RollResultDto>,
    pub next_post_id: Option<PostId>,
    pub next_dialogue_id: Option<DialogueId>,
}

impl ExecuteOptionResponse {
    /// Whether the linked check, if any, was passed
    pub fn check_passed(&self) -> Option<bool> {
        self.roll_result.as_ref().map(|r| r.success)
    }
}
