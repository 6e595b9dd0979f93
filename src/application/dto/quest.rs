use serde::{Deserialize, Serialize};

use crate::domain::entities::Quest;
use crate::domain::value_objects::{ObjectiveId, QuestId};

/// Quest side effect applied while executing a dialogue option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestActionRecord {
    QuestStarted {
        quest_id: QuestId,
        title: String,
    },
    QuestCompleted {
        quest_id: QuestId,
        title: String,
    },
    ObjectiveProgressed {
        quest_id: QuestId,
        objective_id: ObjectiveId,
        current_count: u32,
        required_count: u32,
    },
    ObjectiveCompleted {
        quest_id: QuestId,
        objective_id: ObjectiveId,
    },
}

/// Result of a start attempt. Not starting is reported, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartQuestResponse {
    pub quest: Quest,
    pub started: bool,
    pub available: bool,
    pub can_start: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_records_are_tagged() {
        let quest_id = QuestId::new();
        let record = QuestActionRecord::QuestStarted {
            quest_id,
            title: "Find the Murderer".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "quest_started");
        assert_eq!(json["quest_id"], quest_id.to_string());

        let objective = QuestActionRecord::ObjectiveCompleted {
            quest_id,
            objective_id: ObjectiveId::new(),
        };
        let json = serde_json::to_value(&objective).unwrap();
        assert_eq!(json["type"], "objective_completed");
        assert_eq!(json["quest_id"], quest_id.to_string());
    }

    #[test]
    fn test_progressed_record_deserializes() {
        let quest_id = QuestId::new();
        let objective_id = ObjectiveId::new();
        let json = serde_json::json!({
            "type": "objective_progressed",
            "quest_id": quest_id,
            "objective_id": objective_id,
            "current_count": 2,
            "required_count": 3,
        });
        let record: QuestActionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(
            record,
            QuestActionRecord::ObjectiveProgressed {
                quest_id,
                objective_id,
                current_count: 2,
                required_count: 3,
            }
        );
    }
}
