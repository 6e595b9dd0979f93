//! Domain layer - Core business logic with no I/O
//!
//! This layer contains:
//! - Entities: Character, SkillCheck, Dialogue, Quest, etc.
//! - Value Objects: Ids, stats, difficulty tiers
//! - Domain Services: Roll resolution and graph validation
//! - Errors: Domain rule violations

pub mod entities;
pub mod error;
pub mod services;
pub mod value_objects;
