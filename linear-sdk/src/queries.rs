// ABOUTME: GraphQL documents sent to the Linear API
// ABOUTME: Each document carries a unique operation name used for logging and test matching

pub const VIEWER: &str = r#"
query Viewer {
  viewer { id name email organization { name urlKey } }
}
"#;

pub const LIST_TEAMS: &str = r#"
query ListTeams {
  teams(first: 100) { nodes { id key name } }
}
"#;

pub const FIND_TEAMS: &str = r#"
query FindTeams($search: String!) {
  teams(filter: { or: [
    { key: { eqIgnoreCase: $search } },
    { name: { containsIgnoreCase: $search } }
  ] }) {
    nodes { id key name }
  }
}
"#;

pub const TEAM_STATES: &str = r#"
query TeamStates($teamId: String!) {
  team(id: $teamId) { states { nodes { id name type } } }
}
"#;

pub const TEAM_LABELS: &str = r#"
query TeamLabels($teamId: String!) {
  team(id: $teamId) { labels(first: 250) { nodes { id name } } }
}
"#;

pub const FIND_PROJECTS: &str = r#"
query FindProjects($search: String!) {
  projects(filter: { name: { containsIgnoreCase: $search } }) {
    nodes { id name url status { id name type } }
  }
}
"#;

pub const PROJECT_ISSUES: &str = r#"
query ProjectIssues($projectId: String!, $after: String) {
  project(id: $projectId) {
    issues(first: 250, after: $after) {
      nodes { id identifier title state { id name type } }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

pub const PROJECT_STATUSES: &str = r#"
query ProjectStatuses {
  projectStatuses { nodes { id name type } }
}
"#;

pub const UPDATE_PROJECT_STATUS: &str = r#"
mutation UpdateProjectStatus($id: String!, $statusId: String!) {
  projectUpdate(id: $id, input: { statusId: $statusId }) {
    success
    project { id name url status { id name type } }
  }
}
"#;

pub const CREATE_PROJECT_UPDATE: &str = r#"
mutation CreateProjectUpdate($projectId: String!, $body: String!, $health: ProjectUpdateHealthType) {
  projectUpdateCreate(input: { projectId: $projectId, body: $body, health: $health }) {
    success
    projectUpdate { id url health }
  }
}
"#;

pub const ARCHIVE_PROJECT: &str = r#"
mutation ArchiveProject($id: String!) {
  projectArchive(id: $id) { success }
}
"#;

pub const CREATE_PROJECT: &str = r#"
mutation CreateProject($name: String!, $teamIds: [String!]!, $description: String) {
  projectCreate(input: { name: $name, teamIds: $teamIds, description: $description }) {
    success
    project { id name url status { id name type } }
  }
}
"#;

pub const CREATE_EXTERNAL_LINK: &str = r#"
mutation CreateExternalLink($url: String!, $label: String!, $projectId: String, $initiativeId: String) {
  entityExternalLinkCreate(input: { url: $url, label: $label, projectId: $projectId, initiativeId: $initiativeId }) {
    success
    entityExternalLink { id url label }
  }
}
"#;

pub const FIND_INITIATIVES: &str = r#"
query FindInitiatives($search: String!) {
  initiatives(filter: { name: { containsIgnoreCase: $search } }) {
    nodes { id name status url }
  }
}
"#;

pub const CREATE_INITIATIVE: &str = r#"
mutation CreateInitiative($name: String!, $description: String) {
  initiativeCreate(input: { name: $name, description: $description }) {
    success
    initiative { id name status url }
  }
}
"#;

pub const CREATE_INITIATIVE_UPDATE: &str = r#"
mutation CreateInitiativeUpdate($initiativeId: String!, $body: String!, $health: InitiativeUpdateHealthType) {
  initiativeUpdateCreate(input: { initiativeId: $initiativeId, body: $body, health: $health }) {
    success
    initiativeUpdate { id url health }
  }
}
"#;

pub const INITIATIVE_PROJECT_LINKS: &str = r#"
query InitiativeProjectLinks($after: String) {
  initiativeToProjects(first: 250, after: $after) {
    nodes { id initiative { id name } project { id name } }
    pageInfo { hasNextPage endCursor }
  }
}
"#;

pub const LINK_INITIATIVE_PROJECT: &str = r#"
mutation LinkInitiativeProject($initiativeId: String!, $projectId: String!) {
  initiativeToProjectCreate(input: { initiativeId: $initiativeId, projectId: $projectId }) {
    success
    initiativeToProject { id initiative { id name } project { id name } }
  }
}
"#;

pub const UNLINK_INITIATIVE_PROJECT: &str = r#"
mutation UnlinkInitiativeProject($id: String!) {
  initiativeToProjectDelete(id: $id) { success }
}
"#;

const ISSUE_FIELDS: &str = "id identifier title url state { id name type } team { id key name } parent { id identifier title url } labels { nodes { id name } }";

pub const FIND_ISSUE: &str = const_format::concatcp!(
    r#"
query FindIssue($teamKey: String!, $number: Float!) {
  issues(filter: { team: { key: { eq: $teamKey } }, number: { eq: $number } }) {
    nodes { "#,
    ISSUE_FIELDS,
    r#" }
  }
}
"#
);

pub const ISSUE_CHILDREN: &str = r#"
query IssueChildren($id: String!) {
  issue(id: $id) {
    children(first: 250) { nodes { id identifier title state { id name type } } }
  }
}
"#;

pub const CREATE_ISSUE: &str = r#"
mutation CreateIssue($input: IssueCreateInput!) {
  issueCreate(input: $input) {
    success
    issue { id identifier title url }
  }
}
"#;

pub const UPDATE_ISSUE: &str = r#"
mutation UpdateIssue($id: String!, $input: IssueUpdateInput!) {
  issueUpdate(id: $id, input: $input) {
    success
    issue { id identifier title url }
  }
}
"#;

pub const CREATE_COMMENT: &str = r#"
mutation CreateComment($issueId: String!, $body: String!) {
  commentCreate(input: { issueId: $issueId, body: $body }) {
    success
  }
}
"#;
