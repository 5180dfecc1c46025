// ABOUTME: Issue lookup and mutations: identifier parsing, create, update, children, comments
// ABOUTME: Issues are looked up by team key and number so a miss is an empty result, not an error

use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

use crate::types::{Connection, Issue, IssueRef, IssueSummary};
use crate::{LinearClient, LinearError, Result, ensure_success, queries};

/// `TEAM-123` style issue identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueIdentifier {
    pub team_key: String,
    pub number: u32,
}

impl IssueIdentifier {
    /// Parse `ENG-123`, or a bare `123` when a default team key is known.
    pub fn parse(input: &str, default_team: Option<&str>) -> Result<Self> {
        let input = input.trim();

        if let Some((team, number)) = input.rsplit_once('-') {
            let number = number.parse::<u32>().map_err(|_| invalid_identifier(input))?;
            if team.is_empty() || !team.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid_identifier(input));
            }
            return Ok(Self {
                team_key: team.to_uppercase(),
                number,
            });
        }

        let number = input
            .trim_start_matches('#')
            .parse::<u32>()
            .map_err(|_| invalid_identifier(input))?;

        match default_team {
            Some(team) => Ok(Self {
                team_key: team.to_uppercase(),
                number,
            }),
            None => Err(LinearError::InvalidInput(format!(
                "Issue number '{input}' needs a team prefix (e.g. ENG-{number}) or a default_team in config"
            ))),
        }
    }
}

fn invalid_identifier(input: &str) -> LinearError {
    LinearError::InvalidInput(format!(
        "Invalid issue identifier '{input}'. Expected TEAM-123"
    ))
}

impl fmt::Display for IssueIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team_key, self.number)
    }
}

#[derive(Debug, Clone, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreateInput {
    #[builder(setter(into))]
    pub team_id: String,
    #[builder(setter(into))]
    pub title: String,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct IssuePayload {
    success: bool,
    issue: Option<IssueRef>,
}

fn issue_from_payload(payload: IssuePayload, operation: &'static str) -> Result<IssueRef> {
    ensure_success(payload.success, operation)?;
    payload.issue.ok_or(LinearError::InvalidResponse)
}

impl LinearClient {
    pub async fn find_issue(&self, identifier: &IssueIdentifier) -> Result<Option<Issue>> {
        #[derive(Deserialize)]
        struct Data {
            issues: Connection<Issue>,
        }

        let data: Data = self
            .execute(
                "FindIssue",
                queries::FIND_ISSUE,
                serde_json::json!({
                    "teamKey": identifier.team_key,
                    "number": f64::from(identifier.number),
                }),
            )
            .await?;
        Ok(data.issues.nodes.into_iter().next())
    }

    pub async fn issue_children(&self, issue_id: &str) -> Result<Vec<IssueSummary>> {
        #[derive(Deserialize)]
        struct Children {
            children: Connection<IssueSummary>,
        }
        #[derive(Deserialize)]
        struct Data {
            issue: Children,
        }

        let data: Data = self
            .execute(
                "IssueChildren",
                queries::ISSUE_CHILDREN,
                serde_json::json!({ "id": issue_id }),
            )
            .await?;
        Ok(data.issue.children.nodes)
    }

    pub async fn create_issue(&self, input: &IssueCreateInput) -> Result<IssueRef> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            issue_create: IssuePayload,
        }

        let data: Data = self
            .execute(
                "CreateIssue",
                queries::CREATE_ISSUE,
                serde_json::json!({ "input": input }),
            )
            .await?;
        issue_from_payload(data.issue_create, "issueCreate")
    }

    pub async fn update_issue(&self, issue_id: &str, input: &IssueUpdateInput) -> Result<IssueRef> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            issue_update: IssuePayload,
        }

        let data: Data = self
            .execute(
                "UpdateIssue",
                queries::UPDATE_ISSUE,
                serde_json::json!({ "id": issue_id, "input": input }),
            )
            .await?;
        issue_from_payload(data.issue_update, "issueUpdate")
    }

    pub async fn create_comment(&self, issue_id: &str, body: &str) -> Result<()> {
        #[derive(Deserialize)]
        struct CommentPayload {
            success: bool,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            comment_create: CommentPayload,
        }

        let data: Data = self
            .execute(
                "CreateComment",
                queries::CREATE_COMMENT,
                serde_json::json!({ "issueId": issue_id, "body": body }),
            )
            .await?;
        ensure_success(data.comment_create.success, "commentCreate")
    }
}
