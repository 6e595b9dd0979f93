//! Repository ports - Interfaces for data persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{
    Character, Dialogue, DialogueOption, DialoguePost, Quest, RollResult, SkillCheck,
};
use crate::domain::value_objects::{
    CharacterId, DialogueId, OptionId, PostId, ProjectId, QuestId, SkillCheckId,
};

// =============================================================================
// Character Repository Port
// =============================================================================

/// Repository port for Character operations
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Create a new character
    async fn create(&self, character: &Character) -> Result<()>;

    /// Get a character by ID
    async fn get(&self, id: CharacterId) -> Result<Option<Character>>;

    /// List all characters in a project
    async fn list_by_project(&self, project_id: ProjectId) -> Result<Vec<Character>>;

    /// Update a character
    async fn update(&self, character: &Character) -> Result<()>;
}

// =============================================================================
// Skill Check Repository Port
// =============================================================================

/// Repository port for SkillCheck operations
#[async_trait]
pub trait SkillCheckRepositoryPort: Send + Sync {
    /// Create a new skill check
    async fn create(&self, check: &SkillCheck) -> Result<()>;

    /// Get a skill check by ID
    async fn get(&self, id: SkillCheckId) -> Result<Option<SkillCheck>>;

    /// Ids of every stored skill check in a project
    async fn list_ids_by_project(&self, project_id: ProjectId) -> Result<Vec<SkillCheckId>>;
}

// =============================================================================
// Roll Result Repository Port
// =============================================================================

/// Repository port for the append-only roll log
#[async_trait]
pub trait RollResultRepositoryPort: Send + Sync {
    /// Append a roll result
    async fn append(&self, result: &RollResult) -> Result<()>;

    /// All rolls made by a character, oldest first
    async fn list_by_character(&self, character_id: CharacterId) -> Result<Vec<RollResult>>;

    /// All rolls made against a skill check, oldest first
    async fn list_by_skill_check(&self, skill_check_id: SkillCheckId) -> Result<Vec<RollResult>>;

    /// Rolls a character made against one skill check, oldest first
    async fn list_for(
        &self,
        character_id: CharacterId,
        skill_check_id: SkillCheckId,
    ) -> Result<Vec<RollResult>>;
}

// =============================================================================
// Dialogue Repository Port
// =============================================================================

/// Repository port for dialogues, their posts and options
#[async_trait]
pub trait DialogueRepositoryPort: Send + Sync {
    /// Create a new dialogue
    async fn create(&self, dialogue: &Dialogue) -> Result<()>;

    /// Get a dialogue by ID
    async fn get(&self, id: DialogueId) -> Result<Option<Dialogue>>;

    /// Create a post within a dialogue
    async fn create_post(&self, post: &DialoguePost) -> Result<()>;

    /// Get a post by ID
    async fn get_post(&self, id: PostId) -> Result<Option<DialoguePost>>;

    /// Posts of a dialogue, sorted by order
    async fn list_posts(&self, dialogue_id: DialogueId) -> Result<Vec<DialoguePost>>;

    /// Create an option within a dialogue
    async fn create_option(&self, option: &DialogueOption) -> Result<()>;

    /// Get an option by ID
    async fn get_option(&self, id: OptionId) -> Result<Option<DialogueOption>>;

    /// Update an option
    async fn update_option(&self, option: &DialogueOption) -> Result<()>;

    /// Options of a dialogue, sorted by order
    async fn list_options(&self, dialogue_id: DialogueId) -> Result<Vec<DialogueOption>>;
}

// =============================================================================
// Quest Repository Port
// =============================================================================

/// Repository port for Quest operations
#[async_trait]
pub trait QuestRepositoryPort: Send + Sync {
    /// Create a new quest
    async fn create(&self, quest: &Quest) -> Result<()>;

    /// Get a quest by ID
    async fn get(&self, id: QuestId) -> Result<Option<Quest>>;

    /// List all quests in a project
    async fn list_by_project(&self, project_id: ProjectId) -> Result<Vec<Quest>>;

    /// Quests that list the given quest as a prerequisite
    async fn list_dependents(&self, quest_id: QuestId) -> Result<Vec<Quest>>;

    /// Update a quest
    async fn update(&self, quest: &Quest) -> Result<()>;
}
