//! In-memory persistence adapters
//!
//! This module implements the repository ports over process-local tables,
//! providing CRUD operations for all domain entities.

mod character_repository;
mod dialogue_repository;
mod quest_repository;
mod skill_check_repository;
mod store;

pub use character_repository::InMemoryCharacterRepository;
pub use dialogue_repository::InMemoryDialogueRepository;
pub use quest_repository::InMemoryQuestRepository;
pub use skill_check_repository::{InMemoryRollResultRepository, InMemorySkillCheckRepository};
pub use store::InMemoryStore;

/// Combined repository providing access to all domain repositories
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    store: InMemoryStore,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(),
        }
    }

    pub fn characters(&self) -> InMemoryCharacterRepository {
        InMemoryCharacterRepository::new(self.store.clone())
    }

    pub fn skill_checks(&self) -> InMemorySkillCheckRepository {
        InMemorySkillCheckRepository::new(self.store.clone())
    }

    pub fn roll_results(&self) -> InMemoryRollResultRepository {
        InMemoryRollResultRepository::new(self.store.clone())
    }

    pub fn dialogues(&self) -> InMemoryDialogueRepository {
        InMemoryDialogueRepository::new(self.store.clone())
    }

    pub fn quests(&self) -> InMemoryQuestRepository {
        InMemoryQuestRepository::new(self.store.clone())
    }
}
