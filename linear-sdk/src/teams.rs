// ABOUTME: Team-scoped lookups: team listing, workflow states, and team labels
// ABOUTME: States and labels are fetched per invocation and never cached

use serde::Deserialize;

use crate::types::{Connection, Team, TeamLabel, WorkflowState};
use crate::{LinearClient, Result, queries};

impl LinearClient {
    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        #[derive(Deserialize)]
        struct Data {
            teams: Connection<Team>,
        }

        let data: Data = self
            .execute("ListTeams", queries::LIST_TEAMS, serde_json::json!({}))
            .await?;
        Ok(data.teams.nodes)
    }

    pub async fn team_states(&self, team_id: &str) -> Result<Vec<WorkflowState>> {
        #[derive(Deserialize)]
        struct TeamStates {
            states: Connection<WorkflowState>,
        }
        #[derive(Deserialize)]
        struct Data {
            team: TeamStates,
        }

        let data: Data = self
            .execute(
                "TeamStates",
                queries::TEAM_STATES,
                serde_json::json!({ "teamId": team_id }),
            )
            .await?;
        Ok(data.team.states.nodes)
    }

    pub async fn team_labels(&self, team_id: &str) -> Result<Vec<TeamLabel>> {
        #[derive(Deserialize)]
        struct TeamLabels {
            labels: Connection<TeamLabel>,
        }
        #[derive(Deserialize)]
        struct Data {
            team: TeamLabels,
        }

        let data: Data = self
            .execute(
                "TeamLabels",
                queries::TEAM_LABELS,
                serde_json::json!({ "teamId": team_id }),
            )
            .await?;
        Ok(data.team.labels.nodes)
    }
}
