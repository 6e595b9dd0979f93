//! Quest repository implementation for the in-memory store

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use super::store::InMemoryStore;
use crate::application::ports::outbound::QuestRepositoryPort;
use crate::domain::entities::Quest;
use crate::domain::value_objects::{ProjectId, QuestId};

/// Repository for Quest operations
pub struct InMemoryQuestRepository {
    store: InMemoryStore,
}

impl InMemoryQuestRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QuestRepositoryPort for InMemoryQuestRepository {
    async fn create(&self, quest: &Quest) -> Result<()> {
        let mut quests = self.store.quests.write().await;
        if quests.contains_key(&quest.id) {
            bail!("Quest {} already exists", quest.id);
        }
        quests.insert(quest.id, quest.clone());
        Ok(())
    }

    async fn get(&self, id: QuestId) -> Result<Option<Quest>> {
        Ok(self.store.quests.read().await.get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> Result<Vec<Quest>> {
        Ok(self
            .store
            .quests
            .read()
            .await
            .values()
            .filter(|q| q.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn list_dependents(&self, quest_id: QuestId) -> Result<Vec<Quest>> {
        Ok(self
            .store
            .quests
            .read()
            .await
            .values()
            .filter(|q| q.prerequisites.contains(&quest_id))
            .cloned()
            .collect())
    }

    async fn update(&self, quest: &Quest) -> Result<()> {
        let mut quests = self.store.quests.write().await;
        let slot = quests
            .get_mut(&quest.id)
            .with_context(|| format!("Cannot update missing quest {}", quest.id))?;
        *slot = quest.clone();
        Ok(())
    }
}
