// ABOUTME: CLI argument definitions for the linear-ops application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};

use crate::taxonomy::Category;

#[derive(Parser, Debug)]
#[command(name = "linear-ops")]
#[command(about = "Workflow automation for Linear", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Pretty print the final JSON result
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an ad hoc GraphQL document and print the data object
    Query {
        /// GraphQL query or mutation text
        query: String,

        /// Variables as a JSON object
        variables: Option<String>,
    },
    /// Move several issues to one workflow state, with an optional comment
    Sync {
        /// Issue identifiers (comma separated, e.g. ENG-1,ENG-2)
        #[arg(long, value_delimiter = ',', required = true, num_args = 1..)]
        issues: Vec<String>,

        /// Target workflow state name or shorthand (done, wip, todo)
        #[arg(long)]
        state: String,

        /// Comment to add to every updated issue
        #[arg(long)]
        comment: Option<String>,

        /// Print the transitions without changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Mark a project completed and post a summary update
    PhaseComplete {
        /// Project name (case-insensitive substring)
        project: String,

        /// Archive the project after completion
        #[arg(long)]
        archive: bool,

        /// Complete even when some issues are unresolved
        #[arg(long)]
        force: bool,

        /// Print the plan without changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Post a project update
    #[command(alias = "create-project-update")]
    ProjectUpdate {
        /// Project name (case-insensitive substring)
        project: String,

        /// Markdown body
        body: String,

        /// onTrack, atRisk, or offTrack
        #[arg(default_value = "onTrack")]
        health: String,
    },
    /// Post an initiative update
    #[command(alias = "create-initiative-update")]
    InitiativeUpdate {
        /// Initiative name (case-insensitive substring)
        initiative: String,

        /// Markdown body
        body: String,

        /// onTrack, atRisk, or offTrack
        #[arg(default_value = "onTrack")]
        health: String,
    },
    /// Create an issue
    CreateIssue {
        /// Issue title
        title: String,

        /// Team key or name (defaults to default_team from config)
        #[arg(long)]
        team: Option<String>,

        /// Issue description (markdown)
        #[arg(long)]
        description: Option<String>,

        /// Project name to add the issue to
        #[arg(long)]
        project: Option<String>,

        /// Labels (comma separated)
        #[arg(long, value_delimiter = ',')]
        labels: Vec<String>,

        /// Priority (1=Urgent, 2=High, 3=Normal, 4=Low)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
        priority: Option<u8>,
    },
    /// Create an issue under a parent issue
    CreateSubIssue {
        /// Parent issue identifier (e.g. ENG-123)
        parent: String,

        /// Sub-issue title
        title: String,

        /// Sub-issue description (markdown)
        #[arg(long)]
        description: Option<String>,

        /// Labels (comma separated)
        #[arg(long, value_delimiter = ',')]
        labels: Vec<String>,

        /// Priority (1=Urgent, 2=High, 3=Normal, 4=Low)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
        priority: Option<u8>,
    },
    /// Make issues children of a parent issue
    SetParent {
        /// Parent issue identifier
        parent: String,

        /// Child issue identifiers
        #[arg(required = true)]
        children: Vec<String>,
    },
    /// List the sub-issues of an issue
    ListSubIssues {
        /// Parent issue identifier
        parent: String,
    },
    /// Create an initiative
    CreateInitiative {
        name: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// Create a project, optionally linked to an initiative
    CreateProject {
        name: String,

        /// Team key or name (defaults to default_team from config)
        #[arg(long)]
        team: Option<String>,

        /// Initiative to link the new project to
        #[arg(long)]
        initiative: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Set a project's status (backlog, planned, started, paused, completed, canceled)
    ProjectStatus {
        project: String,
        status: String,
    },
    /// Link a project to an initiative
    LinkInitiative {
        initiative: String,
        project: String,
    },
    /// Remove a project from an initiative
    UnlinkInitiative {
        initiative: String,
        project: String,
    },
    /// Attach an external link to a project, or to an initiative if no project matches
    AddLink {
        /// Project or initiative name
        target: String,
        url: String,
        label: String,
    },
    /// Move issues to a workflow state
    Status {
        /// Target workflow state name or shorthand (done, wip, todo)
        state: String,

        /// Issue identifiers
        #[arg(required = true)]
        issues: Vec<String>,
    },
    /// Move issues to Done
    Done {
        #[arg(required = true)]
        issues: Vec<String>,
    },
    /// Move issues to In Progress
    Wip {
        #[arg(required = true)]
        issues: Vec<String>,
    },
    /// Work with the label taxonomy
    Labels {
        #[command(subcommand)]
        command: LabelsCommand,
    },
    /// Show the authenticated user
    Whoami,
    /// Check the API key and connectivity, and list teams
    Setup,
}

#[derive(Subcommand, Debug)]
pub enum LabelsCommand {
    /// List the approved labels
    List {
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Check labels against the taxonomy
    Validate {
        /// Labels (space or comma separated)
        #[arg(required = true, value_delimiter = ',')]
        labels: Vec<String>,
    },
    /// Suggest labels for an issue title or description
    Suggest {
        text: String,
    },
    /// Show recommended agents for labels, or the full matrix
    Agents {
        #[arg(value_delimiter = ',')]
        labels: Vec<String>,
    },
    /// Replace an issue's labels
    Set {
        issue: String,

        /// Labels (space or comma separated)
        #[arg(required = true, value_delimiter = ',')]
        labels: Vec<String>,
    },
}

impl Commands {
    /// Commands that never touch the network and need no API key
    pub fn is_local(&self) -> bool {
        match self {
            Commands::Labels { command } => !matches!(command, LabelsCommand::Set { .. }),
            _ => false,
        }
    }
}
