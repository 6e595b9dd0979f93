//! Application services - Use case implementations
//!
//! This module contains the application services that implement the use cases
//! of the engine. Each service follows hexagonal architecture principles,
//! accepting port dependencies and returning domain entities or DTOs.

pub mod character_service;
pub mod dialogue_service;
mod error;
mod keyed_lock;
pub mod quest_service;
pub mod skill_check_service;

pub use error::{ServiceError, ServiceResult};

// Re-export character service types
pub use character_service::{CharacterService, CharacterServiceImpl, CreateCharacterRequest};

// Re-export skill check service types
pub use skill_check_service::{SkillCheckService, SkillCheckServiceImpl};

// Re-export dialogue service types
pub use dialogue_service::{DialogueService, DialogueServiceImpl};

// Re-export quest service types
pub use quest_service::{QuestService, QuestServiceImpl};
