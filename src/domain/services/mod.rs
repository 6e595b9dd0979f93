//! Domain services - Pure operations that span entities

pub mod dialogue_graph;
pub mod quest_graph;
pub mod roll_resolver;

pub use dialogue_graph::{validate_dialogue, DialogueIssue, IssueKind, IssueLocation, IssueSeverity};
pub use quest_graph::{check_prerequisites, find_prerequisite_cycle};
pub use roll_resolver::{resolve_with_die, OutcomeType, RollOutcome, CHECK_DIE_SIDES};
