//! Shared in-process storage behind the in-memory repositories

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entities::{
    Character, Dialogue, DialogueOption, DialoguePost, Quest, RollResult, SkillCheck,
};
use crate::domain::value_objects::{
    CharacterId, DialogueId, OptionId, PostId, QuestId, SkillCheckId,
};

pub(super) type Table<K, V> = Arc<RwLock<HashMap<K, V>>>;

/// Every table of the in-memory backend. Cloning shares the tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub(super) characters: Table<CharacterId, Character>,
    pub(super) skill_checks: Table<SkillCheckId, SkillCheck>,
    pub(super) roll_results: Arc<RwLock<Vec<RollResult>>>,
    pub(super) dialogues: Table<DialogueId, Dialogue>,
    pub(super) posts: Table<PostId, DialoguePost>,
    pub(super) options: Table<OptionId, DialogueOption>,
    pub(super) quests: Table<QuestId, Quest>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
