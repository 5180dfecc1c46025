// ABOUTME: Type definitions shared by the batch commands
// ABOUTME: Workflow state matching, issue transitions, and per-issue batch results

use linear_sdk::{StateType, WorkflowState};
use serde::Serialize;
use std::fmt;

use crate::constants::STATE_ALIASES;

/// Find the team state a user asked for: an exact case-insensitive name
/// first, then the first state whose type the shorthand stands for.
pub fn match_state<'a>(states: &'a [WorkflowState], target: &str) -> Option<&'a WorkflowState> {
    let needle = target.trim().to_lowercase();

    if let Some(state) = states.iter().find(|s| s.name.to_lowercase() == needle) {
        return Some(state);
    }

    let alias = STATE_ALIASES
        .get(needle.as_str())
        .or_else(|| STATE_ALIASES.get(needle.replace(' ', "-").as_str()))?;
    let state_type = StateType::from(alias.to_string());
    states.iter().find(|s| s.state_type == state_type)
}

/// A workflow state change for one issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub identifier: String,
    pub from: String,
    pub to: String,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} → {}", self.identifier, self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemStatus {
    Updated,
    Planned,
    NotFound,
    Failed,
}

/// Result for one identifier in a batch command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResult {
    pub identifier: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemResult {
    pub fn failed(identifier: impl Into<String>, status: ItemStatus, error: String) -> Self {
        Self {
            identifier: identifier.into(),
            status,
            transition: None,
            error: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, ItemStatus::NotFound | ItemStatus::Failed)
    }
}

/// Totals line printed at the end of a batch, e.g. `2 updated, 0 failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub updated: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

impl BatchSummary {
    pub fn from_results(results: &[ItemResult], dry_run: bool) -> Self {
        let failed = results.iter().filter(|r| r.is_failure()).count();
        Self {
            updated: results.len() - failed,
            failed,
            dry_run,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            write!(
                f,
                "{} would be updated, {} failed (dry run)",
                self.updated, self.failed
            )
        } else {
            write!(f, "{} updated, {} failed", self.updated, self.failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(id: &str, name: &str, state_type: &str) -> WorkflowState {
        WorkflowState {
            id: id.to_string(),
            name: name.to_string(),
            state_type: StateType::from(state_type.to_string()),
        }
    }

    fn team_states() -> Vec<WorkflowState> {
        vec![
            state("s-todo", "Todo", "unstarted"),
            state("s-prog", "In Progress", "started"),
            state("s-review", "In Review", "started"),
            state("s-shipped", "Shipped", "completed"),
            state("s-cancel", "Canceled", "canceled"),
        ]
    }

    #[test]
    fn test_match_state_by_name() {
        let states = team_states();
        assert_eq!(match_state(&states, "in review").unwrap().id, "s-review");
        assert_eq!(match_state(&states, "TODO").unwrap().id, "s-todo");
    }

    #[test]
    fn test_match_state_by_alias() {
        let states = team_states();
        // No state is literally named "Done"; the completed-type state wins
        assert_eq!(match_state(&states, "Done").unwrap().id, "s-shipped");
        assert_eq!(match_state(&states, "wip").unwrap().id, "s-prog");
        assert_eq!(match_state(&states, "in progress").unwrap().id, "s-prog");
    }

    #[test]
    fn test_match_state_missing() {
        let states = team_states();
        assert!(match_state(&states, "Deployed").is_none());
        assert!(match_state(&states, "backlog").is_none());
    }

    #[test]
    fn test_transition_display() {
        let t = Transition {
            identifier: "ENG-1".into(),
            from: "Todo".into(),
            to: "Done".into(),
        };
        assert_eq!(t.to_string(), "ENG-1: Todo → Done");
    }

    #[test]
    fn test_batch_summary() {
        let results = vec![
            ItemResult {
                identifier: "ENG-1".into(),
                status: ItemStatus::Updated,
                transition: None,
                error: None,
            },
            ItemResult::failed("ENG-999", ItemStatus::NotFound, "missing".into()),
        ];
        let summary = BatchSummary::from_results(&results, false);
        assert_eq!(summary.to_string(), "1 updated, 1 failed");

        let dry = BatchSummary::from_results(&results[..1], true);
        assert_eq!(dry.to_string(), "1 would be updated, 0 failed (dry run)");
    }
}
