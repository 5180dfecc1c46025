// ABOUTME: Output formatting for linear-ops: compact or pretty JSON and psql-style tables
// ABOUTME: Tables cover sub-issues, teams, the label taxonomy, and the agent matrix

use linear_sdk::{IssueSummary, StateType, Team};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::constants::ui::MAX_TITLE_LEN;
use crate::taxonomy::{Category, LabelDef};

pub fn format_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

pub struct TableFormatter {
    use_color: bool,
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Issue")]
    issue: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "State")]
    state: String,
}

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct LabelRow {
    #[tabled(rename = "Label")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Recommended agents")]
    agents: String,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn truncate_title(title: &str, max_len: usize) -> String {
        if title.chars().count() <= max_len {
            title.to_string()
        } else {
            let kept: String = title.chars().take(max_len - 3).collect();
            format!("{kept}...")
        }
    }

    fn format_state(&self, name: &str, state_type: &StateType) -> String {
        if !self.use_color {
            return name.to_string();
        }
        match state_type {
            StateType::Completed => name.green().to_string(),
            StateType::Canceled => name.red().to_string(),
            StateType::Started => name.yellow().to_string(),
            StateType::Backlog | StateType::Unstarted | StateType::Triage => {
                name.dimmed().to_string()
            }
            StateType::Other(_) => name.to_string(),
        }
    }

    fn format_category(&self, category: Category) -> String {
        if !self.use_color {
            return category.to_string();
        }
        match category {
            Category::Type => category.to_string().blue().to_string(),
            Category::Domain => category.to_string().magenta().to_string(),
            Category::Scope => category.to_string().cyan().to_string(),
        }
    }

    fn render<R: Tabled>(rows: Vec<R>) -> String {
        let mut table = Table::new(rows);
        table.with(Style::psql());
        table.to_string()
    }

    pub fn format_issues(&self, issues: &[IssueSummary]) -> String {
        let rows: Vec<IssueRow> = issues
            .iter()
            .map(|issue| IssueRow {
                issue: issue.identifier.clone(),
                title: Self::truncate_title(&issue.title, MAX_TITLE_LEN),
                state: self.format_state(&issue.state.name, &issue.state.state_type),
            })
            .collect();
        Self::render(rows)
    }

    pub fn format_teams(&self, teams: &[Team]) -> String {
        let rows: Vec<TeamRow> = teams
            .iter()
            .map(|team| TeamRow {
                key: team.key.clone(),
                name: team.name.clone(),
            })
            .collect();
        Self::render(rows)
    }

    pub fn format_labels<'a>(&self, labels: impl IntoIterator<Item = &'a LabelDef>) -> String {
        let rows: Vec<LabelRow> = labels
            .into_iter()
            .map(|label| LabelRow {
                name: label.name.to_string(),
                category: self.format_category(label.category),
                color: label.color.to_string(),
                description: label.description.to_string(),
            })
            .collect();
        Self::render(rows)
    }

    pub fn format_agent_matrix(&self, matrix: &[(&LabelDef, &[&str])]) -> String {
        let rows: Vec<AgentRow> = matrix
            .iter()
            .map(|(label, agents)| AgentRow {
                label: label.name.to_string(),
                category: self.format_category(label.category),
                agents: agents.join(", "),
            })
            .collect();
        Self::render(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy;
    use linear_sdk::WorkflowState;

    fn create_test_issue(identifier: &str, title: &str, state: &str, state_type: &str) -> IssueSummary {
        IssueSummary {
            id: format!("id-{identifier}"),
            identifier: identifier.to_string(),
            title: title.to_string(),
            state: WorkflowState {
                id: format!("state-{state}"),
                name: state.to_string(),
                state_type: StateType::from(state_type.to_string()),
            },
        }
    }

    #[test]
    fn test_format_json_compact_and_pretty() {
        let value = serde_json::json!({ "updated": 2, "failed": 0 });
        let compact = format_json(&value, false).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains(r#""updated":2"#));
        let pretty = format_json(&value, true).unwrap();
        assert!(pretty.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_issue_table_without_color() {
        let formatter = TableFormatter::new(false);
        let issues = vec![
            create_test_issue("ENG-123", "Fix login race condition", "In Progress", "started"),
            create_test_issue(
                "ENG-124",
                "A very long title that should be truncated because it exceeds the maximum allowed length",
                "Done",
                "completed",
            ),
        ];

        let result = formatter.format_issues(&issues);
        assert!(result.contains("ENG-123"));
        assert!(result.contains("In Progress"));
        assert!(result.contains("A very long title that should be truncated because it exc..."));
        assert!(!result.contains("maximum allowed length"));
    }

    #[test]
    fn test_truncate_title_is_char_safe() {
        let title = "é".repeat(70);
        let truncated = TableFormatter::truncate_title(&title, 10);
        assert_eq!(truncated.chars().count(), 10);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_empty_issue_table_keeps_headers() {
        let result = TableFormatter::new(false).format_issues(&[]);
        assert!(result.contains("Issue"));
        assert!(result.contains("Title"));
        assert!(result.contains("State"));
    }

    #[test]
    fn test_colored_state_contains_ansi() {
        let formatter = TableFormatter::new(true);
        let issues = vec![create_test_issue("ENG-1", "Ship it", "Done", "completed")];
        assert!(formatter.format_issues(&issues).contains("\u{1b}["));
    }

    #[test]
    fn test_label_table_lists_taxonomy() {
        let result = TableFormatter::new(false).format_labels(taxonomy::LABELS);
        assert!(result.contains("good-first-issue"));
        assert!(result.contains("#EB5757"));
        assert!(result.contains("domain"));
    }

    #[test]
    fn test_agent_matrix_table() {
        let result = TableFormatter::new(false).format_agent_matrix(&taxonomy::agent_matrix());
        assert!(result.contains("Recommended agents"));
        assert!(result.contains("security-auditor, backend-security-coder"));
    }
}
