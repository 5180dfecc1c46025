// ABOUTME: Initiative operations: create, post updates, and manage project links
// ABOUTME: Project links go through the explicit InitiativeToProject link entity

use serde::Deserialize;

use crate::types::{Connection, Health, Initiative, InitiativeToProject, PostedUpdate};
use crate::{LinearClient, LinearError, Result, ensure_success, queries};

impl LinearClient {
    pub async fn create_initiative(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Initiative> {
        #[derive(Deserialize)]
        struct Payload {
            success: bool,
            initiative: Option<Initiative>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            initiative_create: Payload,
        }

        let data: Data = self
            .execute(
                "CreateInitiative",
                queries::CREATE_INITIATIVE,
                serde_json::json!({ "name": name, "description": description }),
            )
            .await?;
        ensure_success(data.initiative_create.success, "initiativeCreate")?;
        data.initiative_create
            .initiative
            .ok_or(LinearError::InvalidResponse)
    }

    pub async fn create_initiative_update(
        &self,
        initiative_id: &str,
        body: &str,
        health: Health,
    ) -> Result<PostedUpdate> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            success: bool,
            initiative_update: Option<PostedUpdate>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            initiative_update_create: Payload,
        }

        let data: Data = self
            .execute(
                "CreateInitiativeUpdate",
                queries::CREATE_INITIATIVE_UPDATE,
                serde_json::json!({
                    "initiativeId": initiative_id,
                    "body": body,
                    "health": health,
                }),
            )
            .await?;
        ensure_success(
            data.initiative_update_create.success,
            "initiativeUpdateCreate",
        )?;
        data.initiative_update_create
            .initiative_update
            .ok_or(LinearError::InvalidResponse)
    }

    /// Find the link entity joining an initiative and a project, if any.
    pub async fn find_initiative_project_link(
        &self,
        initiative_id: &str,
        project_id: &str,
    ) -> Result<Option<InitiativeToProject>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            initiative_to_projects: Connection<InitiativeToProject>,
        }

        // The link entity has no server-side filter, so walk every page
        let mut after: Option<String> = None;
        loop {
            let data: Data = self
                .execute(
                    "InitiativeProjectLinks",
                    queries::INITIATIVE_PROJECT_LINKS,
                    serde_json::json!({ "after": after }),
                )
                .await?;
            let page = data.initiative_to_projects;
            let next = page.next_cursor().map(str::to_string);

            if let Some(link) = page
                .nodes
                .into_iter()
                .find(|link| link.initiative.id == initiative_id && link.project.id == project_id)
            {
                return Ok(Some(link));
            }

            match next {
                Some(cursor) => after = Some(cursor),
                None => return Ok(None),
            }
        }
    }

    pub async fn link_initiative_project(
        &self,
        initiative_id: &str,
        project_id: &str,
    ) -> Result<InitiativeToProject> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            success: bool,
            initiative_to_project: Option<InitiativeToProject>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            initiative_to_project_create: Payload,
        }

        let data: Data = self
            .execute(
                "LinkInitiativeProject",
                queries::LINK_INITIATIVE_PROJECT,
                serde_json::json!({ "initiativeId": initiative_id, "projectId": project_id }),
            )
            .await?;
        ensure_success(
            data.initiative_to_project_create.success,
            "initiativeToProjectCreate",
        )?;
        data.initiative_to_project_create
            .initiative_to_project
            .ok_or(LinearError::InvalidResponse)
    }

    pub async fn unlink_initiative_project(&self, link_id: &str) -> Result<()> {
        #[derive(Deserialize)]
        struct Payload {
            success: bool,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            initiative_to_project_delete: Payload,
        }

        let data: Data = self
            .execute(
                "UnlinkInitiativeProject",
                queries::UNLINK_INITIATIVE_PROJECT,
                serde_json::json!({ "id": link_id }),
            )
            .await?;
        ensure_success(
            data.initiative_to_project_delete.success,
            "initiativeToProjectDelete",
        )
    }
}
