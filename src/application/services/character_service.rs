//! Character Service - Application service for character management
//!
//! This service provides use case implementations for creating characters
//! and authoring their attribute and skill values. Stat edits run under a
//! per-character lock.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::keyed_lock::KeyedLocks;
use super::{ServiceError, ServiceResult};
use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::domain::entities::Character;
use crate::domain::value_objects::{Attribute, CharacterId, ProjectId, Skill, StatKey};

/// Request to create a new character
#[derive(Debug, Clone)]
pub struct CreateCharacterRequest {
    pub project_id: ProjectId,
    pub name: String,
    /// Initial values; anything not listed starts at the minimum
    pub stats: Vec<(StatKey, i32)>,
}

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Create a new character
    async fn create_character(&self, request: CreateCharacterRequest) -> ServiceResult<Character>;

    /// Get a character by ID
    async fn get_character(&self, id: CharacterId) -> ServiceResult<Character>;

    /// List all characters in a project
    async fn list_characters(&self, project_id: ProjectId) -> ServiceResult<Vec<Character>>;

    /// Set one skill value
    async fn set_skill(&self, id: CharacterId, skill: Skill, value: i32) -> ServiceResult<Character>;

    /// Set one attribute base value
    async fn set_attribute(
        &self,
        id: CharacterId,
        attribute: Attribute,
        value: i32,
    ) -> ServiceResult<Character>;
}

/// Default implementation of CharacterService
pub struct CharacterServiceImpl {
    characters: Arc<dyn CharacterRepositoryPort>,
    locks: KeyedLocks<CharacterId>,
}

impl CharacterServiceImpl {
    pub fn new(characters: Arc<dyn CharacterRepositoryPort>) -> Self {
        Self {
            characters,
            locks: KeyedLocks::new(),
        }
    }

    fn validate_create_request(request: &CreateCharacterRequest) -> ServiceResult<()> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Character name cannot be empty".to_string(),
            ));
        }
        if request.name.len() > 255 {
            return Err(ServiceError::Validation(
                "Character name cannot exceed 255 characters".to_string(),
            ));
        }
        Ok(())
    }

    async fn set_stat(&self, id: CharacterId, key: StatKey, value: i32) -> ServiceResult<Character> {
        let _guard = self.locks.lock(id).await;
        let mut character = self.get_character(id).await?;
        character.set_stat(key, value)?;
        self.characters.update(&character).await?;
        debug!(character_id = %id, stat = %key, value, "Stat updated");
        Ok(character)
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self), fields(project_id = %request.project_id, name = %request.name))]
    async fn create_character(&self, request: CreateCharacterRequest) -> ServiceResult<Character> {
        Self::validate_create_request(&request)?;

        let mut character = Character::new(request.project_id, request.name.trim());
        for (key, value) in request.stats {
            character.set_stat(key, value)?;
        }

        self.characters.create(&character).await?;
        info!(character_id = %character.id, "Created character: {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn get_character(&self, id: CharacterId) -> ServiceResult<Character> {
        self.characters
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Character", id))
    }

    #[instrument(skip(self))]
    async fn list_characters(&self, project_id: ProjectId) -> ServiceResult<Vec<Character>> {
        Ok(self.characters.list_by_project(project_id).await?)
    }

    #[instrument(skip(self))]
    async fn set_skill(&self, id: CharacterId, skill: Skill, value: i32) -> ServiceResult<Character> {
        self.set_stat(id, StatKey::Skill(skill), value).await
    }

    #[instrument(skip(self))]
    async fn set_attribute(
        &self,
        id: CharacterId,
        attribute: Attribute,
        value: i32,
    ) -> ServiceResult<Character> {
        self.set_stat(id, StatKey::Attribute(attribute), value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryRepository;

    fn service() -> CharacterServiceImpl {
        CharacterServiceImpl::new(Arc::new(InMemoryRepository::new().characters()))
    }

    #[tokio::test]
    async fn test_create_with_initial_stats() {
        let service = service();
        let character = service
            .create_character(CreateCharacterRequest {
                project_id: ProjectId::new(),
                name: "Harry".to_string(),
                stats: vec![(Skill::Logic.into(), 5), (Attribute::Intellect.into(), 4)],
            })
            .await
            .unwrap();

        assert_eq!(character.skill(Skill::Logic), 5);
        assert_eq!(character.attribute(Attribute::Intellect), 4);
        assert_eq!(character.skill(Skill::Empathy), 1);

        let loaded = service.get_character(character.id).await.unwrap();
        assert_eq!(loaded, character);
    }

    #[tokio::test]
    async fn test_out_of_range_stat_is_rejected() {
        let service = service();
        let err = service
            .create_character(CreateCharacterRequest {
                project_id: ProjectId::new(),
                name: "Harry".to_string(),
                stats: vec![(Skill::Logic.into(), 21)],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let character = service
            .create_character(CreateCharacterRequest {
                project_id: ProjectId::new(),
                name: "Kim".to_string(),
                stats: vec![],
            })
            .await
            .unwrap();
        let err = service.set_skill(character.id, Skill::Logic, 0).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(service.get_character(character.id).await.unwrap().skill(Skill::Logic), 1);
    }

    #[tokio::test]
    async fn test_set_values_persist() {
        let service = service();
        let project_id = ProjectId::new();
        let character = service
            .create_character(CreateCharacterRequest {
                project_id,
                name: "Kim".to_string(),
                stats: vec![],
            })
            .await
            .unwrap();

        service.set_skill(character.id, Skill::Perception, 12).await.unwrap();
        service
            .set_attribute(character.id, Attribute::Motorics, 3)
            .await
            .unwrap();

        let listed = service.list_characters(project_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].skill(Skill::Perception), 12);
        assert_eq!(listed[0].attribute(Attribute::Motorics), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_stat_edits_are_all_kept() {
        let service = Arc::new(service());
        let character = service
            .create_character(CreateCharacterRequest {
                project_id: ProjectId::new(),
                name: "Harry".to_string(),
                stats: vec![],
            })
            .await
            .unwrap();
        let character_id = character.id;

        let edits: Vec<_> = Skill::ALL
            .into_iter()
            .map(|skill| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.set_skill(character_id, skill, 7).await })
            })
            .collect();
        for edit in edits {
            edit.await.unwrap().unwrap();
        }

        let stored = service.get_character(character_id).await.unwrap();
        for skill in Skill::ALL {
            assert_eq!(stored.skill(skill), 7, "{skill} edit was lost");
        }
    }

    #[tokio::test]
    async fn test_missing_character_is_not_found() {
        let err = service().get_character(CharacterId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let err = service()
            .create_character(CreateCharacterRequest {
                project_id: ProjectId::new(),
                name: "   ".to_string(),
                stats: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
