// ABOUTME: Project operations: issues, workspace statuses, status patch, updates, archive, create
// ABOUTME: Also hosts external link creation, which targets a project or an initiative

use serde::Deserialize;

use crate::resolver::LinkTarget;
use crate::types::{
    Connection, ExternalLink, Health, IssueSummary, PostedUpdate, Project, ProjectStatus,
    ProjectStatusType,
};
use crate::{LinearClient, LinearError, Result, ensure_success, queries};

/// Pick the workspace's status for a lifecycle category. The first status of
/// the requested type wins, matching the order Linear lists them.
pub fn status_of_type(
    statuses: &[ProjectStatus],
    status_type: ProjectStatusType,
) -> Option<&ProjectStatus> {
    statuses.iter().find(|s| s.status_type == status_type)
}

#[derive(Deserialize)]
struct ProjectPayload {
    success: bool,
    project: Option<Project>,
}

impl LinearClient {
    pub async fn project_issues(&self, project_id: &str) -> Result<Vec<IssueSummary>> {
        #[derive(Deserialize)]
        struct ProjectIssues {
            issues: Connection<IssueSummary>,
        }
        #[derive(Deserialize)]
        struct Data {
            project: ProjectIssues,
        }

        let mut issues = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let data: Data = self
                .execute(
                    "ProjectIssues",
                    queries::PROJECT_ISSUES,
                    serde_json::json!({ "projectId": project_id, "after": after }),
                )
                .await?;
            let page = data.project.issues;
            let next = page.next_cursor().map(str::to_string);
            issues.extend(page.nodes);

            match next {
                Some(cursor) => {
                    log::debug!(
                        "ProjectIssues: {} issues so far, fetching next page",
                        issues.len()
                    );
                    after = Some(cursor);
                }
                None => break,
            }
        }
        Ok(issues)
    }

    pub async fn project_statuses(&self) -> Result<Vec<ProjectStatus>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            project_statuses: Connection<ProjectStatus>,
        }

        let data: Data = self
            .execute(
                "ProjectStatuses",
                queries::PROJECT_STATUSES,
                serde_json::json!({}),
            )
            .await?;
        Ok(data.project_statuses.nodes)
    }

    pub async fn set_project_status(&self, project_id: &str, status_id: &str) -> Result<Project> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            project_update: ProjectPayload,
        }

        let data: Data = self
            .execute(
                "UpdateProjectStatus",
                queries::UPDATE_PROJECT_STATUS,
                serde_json::json!({ "id": project_id, "statusId": status_id }),
            )
            .await?;
        ensure_success(data.project_update.success, "projectUpdate")?;
        data.project_update
            .project
            .ok_or(LinearError::InvalidResponse)
    }

    pub async fn create_project_update(
        &self,
        project_id: &str,
        body: &str,
        health: Health,
    ) -> Result<PostedUpdate> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            success: bool,
            project_update: Option<PostedUpdate>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            project_update_create: Payload,
        }

        let data: Data = self
            .execute(
                "CreateProjectUpdate",
                queries::CREATE_PROJECT_UPDATE,
                serde_json::json!({ "projectId": project_id, "body": body, "health": health }),
            )
            .await?;
        ensure_success(data.project_update_create.success, "projectUpdateCreate")?;
        data.project_update_create
            .project_update
            .ok_or(LinearError::InvalidResponse)
    }

    pub async fn archive_project(&self, project_id: &str) -> Result<()> {
        #[derive(Deserialize)]
        struct Payload {
            success: bool,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            project_archive: Payload,
        }

        let data: Data = self
            .execute(
                "ArchiveProject",
                queries::ARCHIVE_PROJECT,
                serde_json::json!({ "id": project_id }),
            )
            .await?;
        ensure_success(data.project_archive.success, "projectArchive")
    }

    pub async fn create_project(
        &self,
        name: &str,
        team_ids: &[String],
        description: Option<&str>,
    ) -> Result<Project> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            project_create: ProjectPayload,
        }

        let data: Data = self
            .execute(
                "CreateProject",
                queries::CREATE_PROJECT,
                serde_json::json!({
                    "name": name,
                    "teamIds": team_ids,
                    "description": description,
                }),
            )
            .await?;
        ensure_success(data.project_create.success, "projectCreate")?;
        data.project_create
            .project
            .ok_or(LinearError::InvalidResponse)
    }

    pub async fn create_external_link(
        &self,
        target: &LinkTarget,
        url: &str,
        label: &str,
    ) -> Result<ExternalLink> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            success: bool,
            entity_external_link: Option<ExternalLink>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            entity_external_link_create: Payload,
        }

        let (project_id, initiative_id) = match target {
            LinkTarget::Project(p) => (Some(p.id.as_str()), None),
            LinkTarget::Initiative(i) => (None, Some(i.id.as_str())),
        };

        let data: Data = self
            .execute(
                "CreateExternalLink",
                queries::CREATE_EXTERNAL_LINK,
                serde_json::json!({
                    "url": url,
                    "label": label,
                    "projectId": project_id,
                    "initiativeId": initiative_id,
                }),
            )
            .await?;
        ensure_success(
            data.entity_external_link_create.success,
            "entityExternalLinkCreate",
        )?;
        data.entity_external_link_create
            .entity_external_link
            .ok_or(LinearError::InvalidResponse)
    }
}
