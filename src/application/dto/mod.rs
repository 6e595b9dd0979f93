//! Data Transfer Objects - For service boundaries
//!
//! Responses and request shapes that callers outside the crate serialize.

pub mod dialogue;
pub mod quest;
pub mod skill_check;

pub use dialogue::*;
pub use quest::*;
pub use skill_check::*;
