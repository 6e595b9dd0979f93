//! Quest Service - Quest authoring, availability and state transitions
//!
//! Every transition is a load, mutate, store sequence under a per-quest
//! lock. Completing a quest unlocks its locked dependents one level deep;
//! that cascade runs after the completed quest is stored and its lock is
//! released, taking each dependent's lock in turn.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::keyed_lock::KeyedLocks;
use super::{ServiceError, ServiceResult};
use crate::application::dto::StartQuestResponse;
use crate::application::ports::outbound::{CharacterRepositoryPort, QuestRepositoryPort};
use crate::domain::entities::{Character, ObjectiveUpdate, Quest, QuestAvailability};
use crate::domain::error::DomainError;
use crate::domain::services::check_prerequisites;
use crate::domain::value_objects::{CharacterId, ObjectiveId, ProjectId, QuestId};

/// Quest service trait defining the application use cases
#[async_trait]
pub trait QuestService: Send + Sync {
    /// Validate and store a new quest
    async fn create_quest(&self, quest: Quest) -> ServiceResult<Quest>;

    /// Get a quest by ID
    async fn get_quest(&self, id: QuestId) -> ServiceResult<Quest>;

    /// List all quests in a project
    async fn list_quests(&self, project_id: ProjectId) -> ServiceResult<Vec<Quest>>;

    /// Replace a quest's prerequisites, rejecting unknown ids and cycles
    async fn set_prerequisites(
        &self,
        quest_id: QuestId,
        prerequisites: Vec<QuestId>,
    ) -> ServiceResult<Quest>;

    /// Whether a character could take the quest now
    async fn check_availability(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> ServiceResult<QuestAvailability>;

    /// Start the quest for a character if it can be started
    async fn start_quest(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> ServiceResult<StartQuestResponse>;

    /// Add progress, completing the quest when it reaches max
    async fn update_quest_progress(&self, quest_id: QuestId, amount: u32) -> ServiceResult<Quest>;

    /// Complete the quest and unlock its locked dependents
    async fn complete_quest(&self, quest_id: QuestId) -> ServiceResult<Quest>;

    /// Complete the quest only if it is active for this character.
    /// Returns `None` when the quest was left untouched.
    async fn complete_quest_for(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> ServiceResult<Option<Quest>>;

    /// Mark the quest failed
    async fn fail_quest(&self, quest_id: QuestId) -> ServiceResult<Quest>;

    async fn pause_quest(&self, quest_id: QuestId) -> ServiceResult<Quest>;

    async fn resume_quest(&self, quest_id: QuestId) -> ServiceResult<Quest>;

    /// Advance an objective by `amount`
    async fn update_objective_progress(
        &self,
        quest_id: QuestId,
        objective_id: ObjectiveId,
        amount: u32,
    ) -> ServiceResult<ObjectiveUpdate>;

    /// Mark an objective complete; a no-op for already completed objectives
    async fn complete_objective(
        &self,
        quest_id: QuestId,
        objective_id: ObjectiveId,
    ) -> ServiceResult<ObjectiveUpdate>;

    /// Advance an objective only if its quest is active for this character.
    /// Returns `None` when the quest was left untouched.
    async fn update_objective_progress_for(
        &self,
        quest_id: QuestId,
        objective_id: ObjectiveId,
        character_id: CharacterId,
        amount: u32,
    ) -> ServiceResult<Option<ObjectiveUpdate>>;

    /// Complete an objective only if its quest is active for this character
    async fn complete_objective_for(
        &self,
        quest_id: QuestId,
        objective_id: ObjectiveId,
        character_id: CharacterId,
    ) -> ServiceResult<Option<ObjectiveUpdate>>;
}

/// Default implementation of QuestService
pub struct QuestServiceImpl {
    quests: Arc<dyn QuestRepositoryPort>,
    characters: Arc<dyn CharacterRepositoryPort>,
    locks: KeyedLocks<QuestId>,
}

impl QuestServiceImpl {
    pub fn new(
        quests: Arc<dyn QuestRepositoryPort>,
        characters: Arc<dyn CharacterRepositoryPort>,
    ) -> Self {
        Self {
            quests,
            characters,
            locks: KeyedLocks::new(),
        }
    }

    async fn load(&self, quest_id: QuestId) -> ServiceResult<Quest> {
        self.quests
            .get(quest_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quest", quest_id))
    }

    async fn load_character(&self, character_id: CharacterId) -> ServiceResult<Character> {
        self.characters
            .get(character_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Character", character_id))
    }

    /// Prerequisite quests that still exist; missing ones count as not completed
    async fn load_prerequisites(&self, quest: &Quest) -> ServiceResult<Vec<Quest>> {
        let mut loaded = Vec::with_capacity(quest.prerequisites.len());
        for id in &quest.prerequisites {
            if let Some(prerequisite) = self.quests.get(*id).await? {
                loaded.push(prerequisite);
            }
        }
        Ok(loaded)
    }

    /// Run `mutate` on the stored quest under its lock and store the result
    async fn transition<T: Send>(
        &self,
        quest_id: QuestId,
        mutate: impl FnOnce(&mut Quest) -> ServiceResult<T> + Send,
    ) -> ServiceResult<(Quest, T)> {
        let _guard = self.locks.lock(quest_id).await;
        let mut quest = self.load(quest_id).await?;
        let output = mutate(&mut quest)?;
        self.quests.update(&quest).await?;
        Ok((quest, output))
    }

    /// Apply an objective change if the quest is active for `character_id`
    async fn objective_transition_for(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
        apply: impl FnOnce(&mut Quest) -> Result<ObjectiveUpdate, DomainError> + Send,
    ) -> ServiceResult<Option<ObjectiveUpdate>> {
        let update = {
            let _guard = self.locks.lock(quest_id).await;
            let mut quest = self.load(quest_id).await?;
            if !quest.is_active_for(character_id) {
                debug!(quest_id = %quest_id, status = %quest.status, "Quest not active for character");
                return Ok(None);
            }
            let update = apply(&mut quest)?;
            self.quests.update(&quest).await?;
            update
        };
        self.after_objective(quest_id, &update).await?;
        Ok(Some(update))
    }

    async fn after_objective(&self, quest_id: QuestId, update: &ObjectiveUpdate) -> ServiceResult<()> {
        debug!(
            objective_id = %update.objective.id,
            current_count = update.objective.current_count,
            required_count = update.objective.required_count,
            "Objective progressed"
        );
        if update.quest_completed {
            info!(quest_id = %quest_id, "Quest completed through objective");
            self.unlock_dependents(quest_id).await?;
        }
        Ok(())
    }

    /// Flip locked dependents of a completed quest to available
    async fn unlock_dependents(&self, quest_id: QuestId) -> ServiceResult<()> {
        for dependent in self.quests.list_dependents(quest_id).await? {
            let _guard = self.locks.lock(dependent.id).await;
            let Some(mut dependent) = self.quests.get(dependent.id).await? else {
                continue;
            };
            if dependent.unlock() {
                self.quests.update(&dependent).await?;
                info!(
                    quest_id = %dependent.id,
                    unlocked_by = %quest_id,
                    "Quest unlocked: {}", dependent.title
                );
            }
        }
        Ok(())
    }

    async fn validate_authoring(&self, quest: &Quest) -> ServiceResult<()> {
        quest.validate()?;
        let others = self.quests.list_by_project(quest.project_id).await?;
        check_prerequisites(quest, &others)?;
        Ok(())
    }
}

#[async_trait]
impl QuestService for QuestServiceImpl {
    #[instrument(skip(self, quest), fields(quest_id = %quest.id, title = %quest.title))]
    async fn create_quest(&self, quest: Quest) -> ServiceResult<Quest> {
        self.validate_authoring(&quest).await?;
        self.quests.create(&quest).await?;
        info!(status = %quest.status, "Created quest");
        Ok(quest)
    }

    #[instrument(skip(self))]
    async fn get_quest(&self, id: QuestId) -> ServiceResult<Quest> {
        self.load(id).await
    }

    #[instrument(skip(self))]
    async fn list_quests(&self, project_id: ProjectId) -> ServiceResult<Vec<Quest>> {
        Ok(self.quests.list_by_project(project_id).await?)
    }

    #[instrument(skip(self))]
    async fn set_prerequisites(
        &self,
        quest_id: QuestId,
        prerequisites: Vec<QuestId>,
    ) -> ServiceResult<Quest> {
        let _guard = self.locks.lock(quest_id).await;
        let mut quest = self.load(quest_id).await?;
        quest.prerequisites = prerequisites;
        self.validate_authoring(&quest).await?;
        self.quests.update(&quest).await?;
        debug!(count = quest.prerequisites.len(), "Prerequisites updated");
        Ok(quest)
    }

    #[instrument(skip(self))]
    async fn check_availability(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> ServiceResult<QuestAvailability> {
        let quest = self.load(quest_id).await?;
        let character = self.load_character(character_id).await?;
        let prerequisites = self.load_prerequisites(&quest).await?;
        Ok(quest.availability(&character, &prerequisites))
    }

    #[instrument(skip(self))]
    async fn start_quest(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> ServiceResult<StartQuestResponse> {
        let character = self.load_character(character_id).await?;

        let _guard = self.locks.lock(quest_id).await;
        let mut quest = self.load(quest_id).await?;
        let prerequisites = self.load_prerequisites(&quest).await?;
        let availability = quest.availability(&character, &prerequisites);

        let started = availability.can_start;
        if started {
            quest.start(character_id);
            self.quests.update(&quest).await?;
            info!(quest_id = %quest_id, character_id = %character_id, "Quest started: {}", quest.title);
        } else {
            debug!(quest_id = %quest_id, status = %quest.status, "Quest cannot be started");
        }

        Ok(StartQuestResponse {
            quest,
            started,
            available: availability.available,
            can_start: availability.can_start,
        })
    }

    #[instrument(skip(self))]
    async fn update_quest_progress(&self, quest_id: QuestId, amount: u32) -> ServiceResult<Quest> {
        let (quest, completed) = self
            .transition(quest_id, |quest| Ok(quest.update_progress(amount)))
            .await?;
        debug!(progress = quest.progress, max_progress = quest.max_progress, "Progress updated");
        if completed {
            info!(quest_id = %quest_id, "Quest completed: {}", quest.title);
            self.unlock_dependents(quest_id).await?;
        }
        Ok(quest)
    }

    #[instrument(skip(self))]
    async fn complete_quest(&self, quest_id: QuestId) -> ServiceResult<Quest> {
        let (quest, ()) = self
            .transition(quest_id, |quest| {
                quest.complete();
                Ok(())
            })
            .await?;
        info!(quest_id = %quest_id, "Quest completed: {}", quest.title);
        self.unlock_dependents(quest_id).await?;
        Ok(quest)
    }

    #[instrument(skip(self))]
    async fn complete_quest_for(
        &self,
        quest_id: QuestId,
        character_id: CharacterId,
    ) -> ServiceResult<Option<Quest>> {
        let completed = {
            let _guard = self.locks.lock(quest_id).await;
            let mut quest = self.load(quest_id).await?;
            if !quest.is_active_for(character_id) {
                debug!(quest_id = %quest_id, status = %quest.status, "Quest not active for character");
                return Ok(None);
            }
            quest.complete();
            self.quests.update(&quest).await?;
            quest
        };
        info!(quest_id = %quest_id, character_id = %character_id, "Quest completed: {}", completed.title);
        self.unlock_dependents(quest_id).await?;
        Ok(Some(completed))
    }

    #[instrument(skip(self))]
    async fn fail_quest(&self, quest_id: QuestId) -> ServiceResult<Quest> {
        let (quest, ()) = self
            .transition(quest_id, |quest| {
                quest.fail();
                Ok(())
            })
            .await?;
        info!(quest_id = %quest_id, "Quest failed: {}", quest.title);
        Ok(quest)
    }

    #[instrument(skip(self))]
    async fn pause_quest(&self, quest_id: QuestId) -> ServiceResult<Quest> {
        let (quest, ()) = self
            .transition(quest_id, |quest| Ok(quest.pause()?))
            .await?;
        debug!(quest_id = %quest_id, "Quest paused");
        Ok(quest)
    }

    #[instrument(skip(self))]
    async fn resume_quest(&self, quest_id: QuestId) -> ServiceResult<Quest> {
        let (quest, ()) = self
            .transition(quest_id, |quest| Ok(quest.resume()?))
            .await?;
        debug!(quest_id = %quest_id, "Quest resumed");
        Ok(quest)
    }

    #[instrument(skip(self))]
    async fn update_objective_progress(
        &self,
        quest_id: QuestId,
        objective_id: ObjectiveId,
        amount: u32,
    ) -> ServiceResult<ObjectiveUpdate> {
        let (_, update) = self
            .transition(quest_id, |quest| {
                Ok(quest.update_objective_progress(objective_id, amount)?)
            })
            .await?;
        self.after_objective(quest_id, &update).await?;
        Ok(update)
    }

    #[instrument(skip(self))]
    async fn complete_objective(
        &self,
        quest_id: QuestId,
        objective_id: ObjectiveId,
    ) -> ServiceResult<ObjectiveUpdate> {
        let (_, update) = self
            .transition(quest_id, |quest| Ok(quest.complete_objective(objective_id)?))
            .await?;
        self.after_objective(quest_id, &update).await?;
        Ok(update)
    }

    #[instrument(skip(self))]
    async fn update_objective_progress_for(
        &self,
        quest_id: QuestId,
        objective_id: ObjectiveId,
        character_id: CharacterId,
        amount: u32,
    ) -> ServiceResult<Option<ObjectiveUpdate>> {
        self.objective_transition_for(quest_id, character_id, |quest| {
            quest.update_objective_progress(objective_id, amount)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn complete_objective_for(
        &self,
        quest_id: QuestId,
        objective_id: ObjectiveId,
        character_id: CharacterId,
    ) -> ServiceResult<Option<ObjectiveUpdate>> {
        self.objective_transition_for(quest_id, character_id, |quest| {
            quest.complete_objective(objective_id)
        })
        .await
    }
}
