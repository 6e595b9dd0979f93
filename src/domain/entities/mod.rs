//! Domain entities - Core business objects with identity

mod character;
mod dialogue;
mod quest;
mod roll_result;
mod skill_check;

pub use character::Character;
pub use dialogue::{Dialogue, DialogueOption, DialoguePost, ObjectiveRef};
pub use quest::{
    ObjectiveUpdate, Quest, QuestAvailability, QuestObjective, QuestStatus, QuestType,
};
pub use roll_result::RollResult;
pub use skill_check::{CheckKind, OutcomeTexts, SkillCheck};
