//! Value objects - Immutable objects defined by their attributes

mod difficulty;
mod ids;
mod stats;

pub use difficulty::DifficultyTier;
pub use ids::*;
pub use stats::{
    validate_stat_value, Attribute, Skill, StatKey, MAX_STAT_VALUE, MIN_STAT_VALUE,
};
