//! Nexus Engine - Skill-check dialogue resolution for narrative games
//!
//! The engine:
//! - Resolves d20 skill checks against authored difficulty classes
//! - Decides which dialogue options a character can take and where they lead
//! - Drives quest state from the options a character takes

pub mod application;
pub mod domain;
pub mod infrastructure;
