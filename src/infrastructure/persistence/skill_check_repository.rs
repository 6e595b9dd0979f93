//! Skill check and roll log repositories for the in-memory store

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::store::InMemoryStore;
use crate::application::ports::outbound::{RollResultRepositoryPort, SkillCheckRepositoryPort};
use crate::domain::entities::{RollResult, SkillCheck};
use crate::domain::value_objects::{CharacterId, ProjectId, SkillCheckId};

/// Repository for SkillCheck operations
pub struct InMemorySkillCheckRepository {
    store: InMemoryStore,
}

impl InMemorySkillCheckRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SkillCheckRepositoryPort for InMemorySkillCheckRepository {
    async fn create(&self, check: &SkillCheck) -> Result<()> {
        let mut checks = self.store.skill_checks.write().await;
        if checks.contains_key(&check.id) {
            bail!("Skill check {} already exists", check.id);
        }
        checks.insert(check.id, check.clone());
        Ok(())
    }

    async fn get(&self, id: SkillCheckId) -> Result<Option<SkillCheck>> {
        Ok(self.store.skill_checks.read().await.get(&id).cloned())
    }

    async fn list_ids_by_project(&self, project_id: ProjectId) -> Result<Vec<SkillCheckId>> {
        Ok(self
            .store
            .skill_checks
            .read()
            .await
            .values()
            .filter(|c| c.project_id == project_id)
            .map(|c| c.id)
            .collect())
    }
}

/// Append-only roll log
pub struct InMemoryRollResultRepository {
    store: InMemoryStore,
}

impl InMemoryRollResultRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    async fn filtered(&self, keep: impl Fn(&RollResult) -> bool + Send) -> Vec<RollResult> {
        self.store
            .roll_results
            .read()
            .await
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RollResultRepositoryPort for InMemoryRollResultRepository {
    async fn append(&self, result: &RollResult) -> Result<()> {
        self.store.roll_results.write().await.push(result.clone());
        Ok(())
    }

    async fn list_by_character(&self, character_id: CharacterId) -> Result<Vec<RollResult>> {
        Ok(self.filtered(|r| r.character_id == character_id).await)
    }

    async fn list_by_skill_check(&self, skill_check_id: SkillCheckId) -> Result<Vec<RollResult>> {
        Ok(self.filtered(|r| r.skill_check_id == skill_check_id).await)
    }

    async fn list_for(
        &self,
        character_id: CharacterId,
        skill_check_id: SkillCheckId,
    ) -> Result<Vec<RollResult>> {
        Ok(self
            .filtered(|r| r.character_id == character_id && r.skill_check_id == skill_check_id)
            .await)
    }
}
