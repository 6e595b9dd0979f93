//! Dialogue graph validation
//!
//! Reports authoring problems in one dialogue without rejecting it, so
//! editors can show every issue at once.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DialogueOption, DialoguePost};
use crate::domain::value_objects::{OptionId, PostId, SkillCheckId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// An option points at a post that is not part of the dialogue
    MissingConnection,
    /// An option links a skill check that does not exist
    InvalidSkillCheck,
    /// A post after the opening one that no option leads to
    OrphanedPost,
}

impl IssueKind {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::MissingConnection | Self::InvalidSkillCheck => IssueSeverity::Error,
            Self::OrphanedPost => IssueSeverity::Warning,
        }
    }
}

/// Where in the dialogue an issue was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", content = "id", rename_all = "snake_case")]
pub enum IssueLocation {
    Post(PostId),
    Option(OptionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub location: IssueLocation,
    pub message: String,
}

impl DialogueIssue {
    fn new(kind: IssueKind, location: IssueLocation, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            location,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

/// Validate the posts and options of a single dialogue.
///
/// `known_checks` is the set of skill check ids that exist. Issues come back
/// with options first (in option order) then orphaned posts (in post order).
pub fn validate_dialogue(
    posts: &[DialoguePost],
    options: &[DialogueOption],
    known_checks: &HashSet<SkillCheckId>,
) -> Vec<DialogueIssue> {
    let post_ids: HashSet<PostId> = posts.iter().map(|p| p.id).collect();
    let mut issues = Vec::new();
    let mut reached: HashSet<PostId> = HashSet::new();

    let mut ordered_options: Vec<&DialogueOption> = options.iter().collect();
    ordered_options.sort_by_key(|o| o.order);

    for option in ordered_options {
        let location = IssueLocation::Option(option.id);
        for (label, target) in [
            ("next post", option.next_post_id),
            ("failure post", option.failure_post_id),
        ] {
            let Some(target) = target else { continue };
            if post_ids.contains(&target) {
                reached.insert(target);
            } else {
                issues.push(DialogueIssue::new(
                    IssueKind::MissingConnection,
                    location,
                    format!("Option '{}' {} {} is not in this dialogue", option.text, label, target),
                ));
            }
        }

        if let Some(check_id) = option.skill_check_id {
            if !known_checks.contains(&check_id) {
                issues.push(DialogueIssue::new(
                    IssueKind::InvalidSkillCheck,
                    location,
                    format!("Option '{}' links unknown skill check {}", option.text, check_id),
                ));
            }
        }
    }

    let mut ordered_posts: Vec<&DialoguePost> = posts.iter().collect();
    ordered_posts.sort_by_key(|p| p.order);
    // The opening post is the entry point and needs no incoming edge
    for post in ordered_posts.into_iter().skip(1) {
        if !reached.contains(&post.id) {
            issues.push(DialogueIssue::new(
                IssueKind::OrphanedPost,
                IssueLocation::Post(post.id),
                format!("Post {} (order {}) is not reachable from any option", post.id, post.order),
            ));
        }
    }

    issues
}
