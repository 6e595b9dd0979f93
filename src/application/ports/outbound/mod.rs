//! Outbound ports - Interfaces that the application requires from external systems

mod random_port;
mod repository_port;

#[cfg(test)]
pub use random_port::{MockClockPort, MockRandomPort};
pub use random_port::{ClockPort, RandomPort};
pub use repository_port::{
    CharacterRepositoryPort, DialogueRepositoryPort, QuestRepositoryPort,
    RollResultRepositoryPort, SkillCheckRepositoryPort,
};
