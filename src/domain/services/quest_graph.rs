//! Quest prerequisite graph checks
//!
//! Prerequisites form a directed graph from a quest to the quests it
//! waits on. Authoring must keep it acyclic and closed over known ids.

use std::collections::HashMap;

use crate::domain::entities::Quest;
use crate::domain::error::DomainError;
use crate::domain::value_objects::QuestId;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Find one prerequisite cycle, returned as the path that closes it
/// (first and last ids are equal).
pub fn find_prerequisite_cycle(quests: &[Quest]) -> Option<Vec<QuestId>> {
    let edges: HashMap<QuestId, &[QuestId]> = quests
        .iter()
        .map(|q| (q.id, q.prerequisites.as_slice()))
        .collect();
    let mut marks: HashMap<QuestId, Mark> = HashMap::new();
    let mut path = Vec::new();

    for quest in quests {
        if let Some(cycle) = visit(quest.id, &edges, &mut marks, &mut path) {
            return Some(cycle);
        }
    }
    None
}

fn visit(
    id: QuestId,
    edges: &HashMap<QuestId, &[QuestId]>,
    marks: &mut HashMap<QuestId, Mark>,
    path: &mut Vec<QuestId>,
) -> Option<Vec<QuestId>> {
    match marks.get(&id) {
        Some(Mark::Done) => return None,
        Some(Mark::Visiting) => {
            let start = path.iter().position(|p| *p == id).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(id);
            return Some(cycle);
        }
        None => {}
    }

    marks.insert(id, Mark::Visiting);
    path.push(id);
    for next in edges.get(&id).copied().unwrap_or_default() {
        if let Some(cycle) = visit(*next, edges, marks, path) {
            return Some(cycle);
        }
    }
    path.pop();
    marks.insert(id, Mark::Done);
    None
}

/// Validate `quest`'s prerequisites against the other quests of its project.
/// Unknown ids are `NotFound`, cycles are `Validation`.
///
/// `others` may or may not contain a previous version of `quest`; the
/// candidate always wins.
pub fn check_prerequisites(quest: &Quest, others: &[Quest]) -> Result<(), DomainError> {
    for required in &quest.prerequisites {
        if !others.iter().any(|q| q.id == *required) {
            return Err(DomainError::not_found("Quest", required));
        }
    }

    let mut graph: Vec<Quest> = others.iter().filter(|q| q.id != quest.id).cloned().collect();
    graph.push(quest.clone());

    if let Some(cycle) = find_prerequisite_cycle(&graph) {
        let rendered: Vec<String> = cycle.iter().map(ToString::to_string).collect();
        return Err(DomainError::validation(format!(
            "Prerequisite cycle detected: {}",
            rendered.join(" -> ")
        )));
    }
    Ok(())
}
