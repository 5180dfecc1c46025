// ABOUTME: Name-based entity resolution for teams, projects, initiatives, and link targets
// ABOUTME: Case-insensitive substring search with exact-over-partial, then first-result tie-break

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Connection, Initiative, Project, Team};
use crate::{LinearClient, LinearError, Result, queries};

/// Kinds of remote entities a name can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Team,
    Project,
    Initiative,
    Issue,
    WorkflowState,
    ProjectStatus,
    Label,
    LinkTarget,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Team => "Team",
            EntityKind::Project => "Project",
            EntityKind::Initiative => "Initiative",
            EntityKind::Issue => "Issue",
            EntityKind::WorkflowState => "Workflow state",
            EntityKind::ProjectStatus => "Project status",
            EntityKind::Label => "Label",
            EntityKind::LinkTarget => "Project or initiative",
        };
        f.write_str(name)
    }
}

/// Something that can be matched by name
pub trait Named {
    fn name(&self) -> &str;

    /// Short key that takes precedence over the name (team keys)
    fn key(&self) -> Option<&str> {
        None
    }
}

impl Named for Team {
    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Initiative {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of a resolution: the chosen entity plus how it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub entity: T,
    pub candidates: usize,
    pub exact: bool,
}

impl<T> Resolved<T> {
    /// Several candidates matched and none matched exactly; the first won.
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1 && !self.exact
    }

    pub fn into_inner(self) -> T {
        self.entity
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            entity: f(self.entity),
            candidates: self.candidates,
            exact: self.exact,
        }
    }
}

/// Pick the best candidate for `search`.
///
/// Order of preference: exact key match, exact name match (both
/// case-insensitive), then the first candidate in the order the API
/// returned them. Returns `None` for an empty candidate list.
pub fn pick_best<T: Named>(search: &str, candidates: Vec<T>) -> Option<Resolved<T>> {
    let needle = search.trim().to_lowercase();
    let count = candidates.len();

    let exact_index = candidates
        .iter()
        .position(|c| c.key().is_some_and(|k| k.to_lowercase() == needle))
        .or_else(|| {
            candidates
                .iter()
                .position(|c| c.name().to_lowercase() == needle)
        });

    let (index, exact) = match exact_index {
        Some(index) => (index, true),
        None if count > 0 => (0, false),
        None => return None,
    };

    candidates.into_iter().nth(index).map(|entity| Resolved {
        entity,
        candidates: count,
        exact,
    })
}

/// Either half of the project-then-initiative lookup used by external links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LinkTarget {
    Project(Project),
    Initiative(Initiative),
}

impl LinkTarget {
    pub fn id(&self) -> &str {
        match self {
            LinkTarget::Project(p) => &p.id,
            LinkTarget::Initiative(i) => &i.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LinkTarget::Project(p) => &p.name,
            LinkTarget::Initiative(i) => &i.name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            LinkTarget::Project(_) => EntityKind::Project,
            LinkTarget::Initiative(_) => EntityKind::Initiative,
        }
    }
}

fn require_search(search: &str, kind: EntityKind) -> Result<&str> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        return Err(LinearError::InvalidInput(format!(
            "{kind} search string must not be empty"
        )));
    }
    Ok(trimmed)
}

impl LinearClient {
    pub async fn find_team(&self, search: &str) -> Result<Option<Resolved<Team>>> {
        #[derive(Deserialize)]
        struct Data {
            teams: Connection<Team>,
        }

        let search = require_search(search, EntityKind::Team)?;
        let data: Data = self
            .execute(
                "FindTeams",
                queries::FIND_TEAMS,
                serde_json::json!({ "search": search }),
            )
            .await?;
        Ok(pick_best(search, data.teams.nodes))
    }

    pub async fn find_project(&self, search: &str) -> Result<Option<Resolved<Project>>> {
        #[derive(Deserialize)]
        struct Data {
            projects: Connection<Project>,
        }

        let search = require_search(search, EntityKind::Project)?;
        let data: Data = self
            .execute(
                "FindProjects",
                queries::FIND_PROJECTS,
                serde_json::json!({ "search": search }),
            )
            .await?;
        Ok(pick_best(search, data.projects.nodes))
    }

    pub async fn find_initiative(&self, search: &str) -> Result<Option<Resolved<Initiative>>> {
        #[derive(Deserialize)]
        struct Data {
            initiatives: Connection<Initiative>,
        }

        let search = require_search(search, EntityKind::Initiative)?;
        let data: Data = self
            .execute(
                "FindInitiatives",
                queries::FIND_INITIATIVES,
                serde_json::json!({ "search": search }),
            )
            .await?;
        Ok(pick_best(search, data.initiatives.nodes))
    }

    /// Try the name as a project first, then as an initiative.
    pub async fn resolve_link_target(&self, search: &str) -> Result<Option<Resolved<LinkTarget>>> {
        if let Some(project) = self.find_project(search).await? {
            return Ok(Some(project.map(LinkTarget::Project)));
        }

        Ok(self
            .find_initiative(search)
            .await?
            .map(|initiative| initiative.map(LinkTarget::Initiative)))
    }
}
