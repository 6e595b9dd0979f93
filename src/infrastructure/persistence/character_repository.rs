//! Character repository implementation for the in-memory store

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use super::store::InMemoryStore;
use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterId, ProjectId};

/// Repository for Character operations
pub struct InMemoryCharacterRepository {
    store: InMemoryStore,
}

impl InMemoryCharacterRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryCharacterRepository {
    async fn create(&self, character: &Character) -> Result<()> {
        let mut characters = self.store.characters.write().await;
        if characters.contains_key(&character.id) {
            bail!("Character {} already exists", character.id);
        }
        characters.insert(character.id, character.clone());
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>> {
        Ok(self.store.characters.read().await.get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> Result<Vec<Character>> {
        let mut characters: Vec<Character> = self
            .store
            .characters
            .read()
            .await
            .values()
            .filter(|c| c.project_id == project_id)
            .cloned()
            .collect();
        characters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(characters)
    }

    async fn update(&self, character: &Character) -> Result<()> {
        let mut characters = self.store.characters.write().await;
        let slot = characters
            .get_mut(&character.id)
            .with_context(|| format!("Cannot update missing character {}", character.id))?;
        *slot = character.clone();
        Ok(())
    }
}
