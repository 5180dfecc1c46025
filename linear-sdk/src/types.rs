// ABOUTME: Domain types for Linear entities as returned by the GraphQL API
// ABOUTME: Covers teams, projects, initiatives, issues, workflow states, and update health

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GraphQL connection wrapper (`{ nodes: [...], pageInfo }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub nodes: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl<T> Connection<T> {
    /// Cursor for the next page, or `None` once the last page has been read
    pub fn next_cursor(&self) -> Option<&str> {
        self.page_info
            .as_ref()
            .filter(|p| p.has_next_page)
            .and_then(|p| p.end_cursor.as_deref())
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            page_info: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLabel {
    pub id: String,
    pub name: String,
}

/// Discriminator of a team workflow state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StateType {
    Triage,
    Backlog,
    Unstarted,
    Started,
    Completed,
    Canceled,
    Other(String),
}

impl StateType {
    /// Completed and canceled issues both count as resolved work
    pub fn is_resolved(&self) -> bool {
        matches!(self, StateType::Completed | StateType::Canceled)
    }

    pub fn as_str(&self) -> &str {
        match self {
            StateType::Triage => "triage",
            StateType::Backlog => "backlog",
            StateType::Unstarted => "unstarted",
            StateType::Started => "started",
            StateType::Completed => "completed",
            StateType::Canceled => "canceled",
            StateType::Other(s) => s,
        }
    }
}

impl From<String> for StateType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "triage" => StateType::Triage,
            "backlog" => StateType::Backlog,
            "unstarted" => StateType::Unstarted,
            "started" => StateType::Started,
            "completed" => StateType::Completed,
            "canceled" => StateType::Canceled,
            _ => StateType::Other(s),
        }
    }
}

impl From<StateType> for String {
    fn from(t: StateType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub state_type: StateType,
}

/// Lifecycle category of a project status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatusType {
    Backlog,
    Planned,
    Started,
    Paused,
    Completed,
    Canceled,
}

impl ProjectStatusType {
    pub const ALL: [ProjectStatusType; 6] = [
        ProjectStatusType::Backlog,
        ProjectStatusType::Planned,
        ProjectStatusType::Started,
        ProjectStatusType::Paused,
        ProjectStatusType::Completed,
        ProjectStatusType::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatusType::Backlog => "backlog",
            ProjectStatusType::Planned => "planned",
            ProjectStatusType::Started => "started",
            ProjectStatusType::Paused => "paused",
            ProjectStatusType::Completed => "completed",
            ProjectStatusType::Canceled => "canceled",
        }
    }
}

impl FromStr for ProjectStatusType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backlog" => Ok(ProjectStatusType::Backlog),
            "planned" => Ok(ProjectStatusType::Planned),
            "started" | "in-progress" | "in progress" | "active" => {
                Ok(ProjectStatusType::Started)
            }
            "paused" => Ok(ProjectStatusType::Paused),
            "completed" | "done" => Ok(ProjectStatusType::Completed),
            "canceled" | "cancelled" => Ok(ProjectStatusType::Canceled),
            other => Err(format!(
                "Unknown project status '{other}'. Valid: backlog, planned, started, paused, completed, canceled"
            )),
        }
    }
}

impl fmt::Display for ProjectStatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatus {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub status_type: ProjectStatusType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Minimal `{ id name }` reference used inside link entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeToProject {
    pub id: String,
    pub initiative: NamedRef,
    pub project: NamedRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRef {
    pub id: String,
    pub identifier: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Issue with just enough detail to judge completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub state: WorkflowState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    pub state: WorkflowState,
    pub team: Team,
    #[serde(default)]
    pub parent: Option<IssueRef>,
    #[serde(default)]
    pub labels: Connection<TeamLabel>,
}

/// Health of a project or initiative update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Health {
    #[default]
    OnTrack,
    AtRisk,
    OffTrack,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::OnTrack => "onTrack",
            Health::AtRisk => "atRisk",
            Health::OffTrack => "offTrack",
        }
    }
}

impl FromStr for Health {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "ontrack" => Ok(Health::OnTrack),
            "atrisk" => Ok(Health::AtRisk),
            "offtrack" => Ok(Health::OffTrack),
            _ => Err(format!(
                "Invalid health '{s}'. Valid: onTrack, atRisk, offTrack"
            )),
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A posted project or initiative update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedUpdate {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub health: Option<Health>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub id: String,
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    pub url_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub organization: Option<Organization>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_type_round_trip_through_wire_names() {
        let state: WorkflowState = serde_json::from_value(json!({
            "id": "s1",
            "name": "Done",
            "type": "completed"
        }))
        .unwrap();
        assert_eq!(state.state_type, StateType::Completed);
        assert!(state.state_type.is_resolved());

        let custom: StateType = serde_json::from_value(json!("review")).unwrap();
        assert_eq!(custom, StateType::Other("review".to_string()));
        assert!(!custom.is_resolved());
        assert_eq!(serde_json::to_value(&custom).unwrap(), json!("review"));
    }

    #[test]
    fn test_only_completed_and_canceled_are_resolved() {
        assert!(StateType::Completed.is_resolved());
        assert!(StateType::Canceled.is_resolved());
        assert!(!StateType::Started.is_resolved());
        assert!(!StateType::Unstarted.is_resolved());
        assert!(!StateType::Backlog.is_resolved());
        assert!(!StateType::Triage.is_resolved());
    }

    #[test]
    fn test_health_parsing_is_lenient() {
        assert_eq!("onTrack".parse::<Health>(), Ok(Health::OnTrack));
        assert_eq!("on-track".parse::<Health>(), Ok(Health::OnTrack));
        assert_eq!("AT_RISK".parse::<Health>(), Ok(Health::AtRisk));
        assert_eq!("off track".parse::<Health>(), Ok(Health::OffTrack));
        assert!("green".parse::<Health>().is_err());
    }

    #[test]
    fn test_health_wire_format() {
        assert_eq!(serde_json::to_value(Health::AtRisk).unwrap(), json!("atRisk"));
        assert_eq!(Health::default(), Health::OnTrack);
    }

    #[test]
    fn test_project_status_type_parsing() {
        assert_eq!(
            "Completed".parse::<ProjectStatusType>(),
            Ok(ProjectStatusType::Completed)
        );
        assert_eq!(
            "in-progress".parse::<ProjectStatusType>(),
            Ok(ProjectStatusType::Started)
        );
        assert_eq!(
            "cancelled".parse::<ProjectStatusType>(),
            Ok(ProjectStatusType::Canceled)
        );
        assert!("shipping".parse::<ProjectStatusType>().is_err());
    }

    #[test]
    fn test_issue_without_optional_fields() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "i1",
            "identifier": "ENG-1",
            "title": "Title",
            "state": { "id": "s1", "name": "Todo", "type": "unstarted" },
            "team": { "id": "t1", "key": "ENG", "name": "Engineering" }
        }))
        .unwrap();

        assert!(issue.parent.is_none());
        assert!(issue.labels.nodes.is_empty());
        assert!(issue.url.is_none());
    }

    #[test]
    fn test_next_cursor_only_while_pages_remain() {
        let more: Connection<Team> = serde_json::from_value(json!({
            "nodes": [],
            "pageInfo": { "hasNextPage": true, "endCursor": "c1" }
        }))
        .unwrap();
        assert_eq!(more.next_cursor(), Some("c1"));

        let last: Connection<Team> = serde_json::from_value(json!({
            "nodes": [],
            "pageInfo": { "hasNextPage": false, "endCursor": "c2" }
        }))
        .unwrap();
        assert_eq!(last.next_cursor(), None);

        let bare: Connection<Team> = serde_json::from_value(json!({ "nodes": [] })).unwrap();
        assert_eq!(bare.next_cursor(), None);
    }
}
