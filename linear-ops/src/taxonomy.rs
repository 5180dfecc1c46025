// ABOUTME: Compiled-in label taxonomy with type, domain, and scope categories
// ABOUTME: Pure validation, keyword-based suggestion, and recommended-agent lookups

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Type,
    Domain,
    Scope,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Type => "type",
            Category::Domain => "domain",
            Category::Scope => "scope",
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LabelDef {
    pub name: &'static str,
    pub category: Category,
    pub color: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub agents: &'static [&'static str],
}

/// Most domain labels an issue should carry
pub const MAX_DOMAIN_LABELS: usize = 2;

pub static LABELS: &[LabelDef] = &[
    // type
    LabelDef {
        name: "feature",
        category: Category::Type,
        color: "#4EA7FC",
        description: "New user-facing capability",
        keywords: &[
            "add",
            "implement",
            "new",
            "create",
            "support",
            "introduce",
            "feature",
            "enable",
        ],
        agents: &["product-engineer", "fullstack-developer"],
    },
    LabelDef {
        name: "bug",
        category: Category::Type,
        color: "#EB5757",
        description: "Something is broken or behaves incorrectly",
        keywords: &[
            "fix",
            "bug",
            "broken",
            "crash",
            "error",
            "fails",
            "failing",
            "regression",
            "incorrect",
            "wrong",
        ],
        agents: &["debugger", "code-reviewer"],
    },
    LabelDef {
        name: "refactor",
        category: Category::Type,
        color: "#9B51E0",
        description: "Restructure code without changing behavior",
        keywords: &[
            "refactor",
            "restructure",
            "cleanup",
            "clean up",
            "simplify",
            "extract",
            "rename",
            "reorganize",
        ],
        agents: &["refactoring-specialist", "code-reviewer"],
    },
    LabelDef {
        name: "chore",
        category: Category::Type,
        color: "#95A2B3",
        description: "Maintenance with no user-facing change",
        keywords: &[
            "chore",
            "bump",
            "upgrade",
            "update dependencies",
            "dependency",
            "dependencies",
            "config",
            "ci",
        ],
        agents: &["devops-engineer"],
    },
    LabelDef {
        name: "spike",
        category: Category::Type,
        color: "#F2C94C",
        description: "Time-boxed research or prototype",
        keywords: &["spike", "investigate", "research", "explore", "prototype", "evaluate", "poc"],
        agents: &["research-analyst", "architect-reviewer"],
    },
    LabelDef {
        name: "docs",
        category: Category::Type,
        color: "#0F7488",
        description: "Documentation only",
        keywords: &[
            "docs",
            "documentation",
            "readme",
            "guide",
            "document",
            "tutorial",
            "changelog",
        ],
        agents: &["docs-architect", "technical-writer"],
    },
    // domain
    LabelDef {
        name: "security",
        category: Category::Domain,
        color: "#C52828",
        description: "Authentication, authorization, and vulnerability work",
        keywords: &[
            "security",
            "xss",
            "csrf",
            "injection",
            "vulnerability",
            "cve",
            "auth",
            "authentication",
            "authorization",
            "login",
            "password",
            "token",
            "secret",
            "encrypt",
            "encryption",
            "permission",
        ],
        agents: &["security-auditor", "backend-security-coder"],
    },
    LabelDef {
        name: "frontend",
        category: Category::Domain,
        color: "#26B5CE",
        description: "Browser UI, components, and styling",
        keywords: &[
            "frontend",
            "ui",
            "ux",
            "css",
            "component",
            "react",
            "button",
            "form",
            "page",
            "layout",
            "modal",
            "style",
            "responsive",
        ],
        agents: &["frontend-developer", "ui-ux-designer"],
    },
    LabelDef {
        name: "backend",
        category: Category::Domain,
        color: "#5E6AD2",
        description: "Server-side services and business logic",
        keywords: &[
            "backend", "server", "service", "worker", "queue", "job", "cron", "handler", "endpoint",
        ],
        agents: &["backend-architect", "backend-developer"],
    },
    LabelDef {
        name: "database",
        category: Category::Domain,
        color: "#F2994A",
        description: "Schema, migrations, and query performance",
        keywords: &[
            "database",
            "db",
            "sql",
            "postgres",
            "mysql",
            "migration",
            "schema",
            "index",
            "query",
            "table",
        ],
        agents: &["database-optimizer", "database-admin"],
    },
    LabelDef {
        name: "infrastructure",
        category: Category::Domain,
        color: "#6B7280",
        description: "Deployment, CI/CD, and cloud resources",
        keywords: &[
            "infrastructure",
            "infra",
            "deploy",
            "deployment",
            "docker",
            "kubernetes",
            "k8s",
            "terraform",
            "ci",
            "pipeline",
            "aws",
            "gcp",
            "cloud",
        ],
        agents: &["devops-engineer", "cloud-architect"],
    },
    LabelDef {
        name: "testing",
        category: Category::Domain,
        color: "#27AE60",
        description: "Test coverage, fixtures, and test infrastructure",
        keywords: &[
            "test",
            "tests",
            "testing",
            "coverage",
            "e2e",
            "unit test",
            "integration test",
            "flaky",
            "fixture",
        ],
        agents: &["test-automator", "qa-expert"],
    },
    LabelDef {
        name: "performance",
        category: Category::Domain,
        color: "#F2C94C",
        description: "Latency, throughput, and resource usage",
        keywords: &[
            "performance",
            "slow",
            "latency",
            "speed",
            "optimize",
            "optimise",
            "memory",
            "cpu",
            "cache",
            "caching",
            "throughput",
        ],
        agents: &["performance-engineer"],
    },
    LabelDef {
        name: "mlops",
        category: Category::Domain,
        color: "#BB87FC",
        description: "Model training, serving, and evaluation pipelines",
        keywords: &[
            "model",
            "training",
            "inference",
            "ml",
            "llm",
            "embedding",
            "embeddings",
            "dataset",
            "evaluation",
            "mlops",
        ],
        agents: &["ml-engineer", "mlops-engineer"],
    },
    LabelDef {
        name: "api",
        category: Category::Domain,
        color: "#0EA5E9",
        description: "Public or internal API contracts",
        keywords: &["api", "rest", "graphql", "endpoint", "webhook", "sdk", "openapi", "grpc"],
        agents: &["api-designer", "backend-architect"],
    },
    LabelDef {
        name: "accessibility",
        category: Category::Domain,
        color: "#14B8A6",
        description: "Assistive technology support and WCAG compliance",
        keywords: &[
            "accessibility",
            "a11y",
            "aria",
            "screen reader",
            "wcag",
            "contrast",
            "keyboard navigation",
        ],
        agents: &["accessibility-tester", "frontend-developer"],
    },
    // scope
    LabelDef {
        name: "blocked",
        category: Category::Scope,
        color: "#EB5757",
        description: "Waiting on another issue or an external party",
        keywords: &["blocked", "blocker", "waiting on", "depends on", "dependent on"],
        agents: &[],
    },
    LabelDef {
        name: "breaking-change",
        category: Category::Scope,
        color: "#C52828",
        description: "Changes a public contract incompatibly",
        keywords: &[
            "breaking",
            "breaking change",
            "deprecate",
            "deprecation",
            "remove support",
            "incompatible",
        ],
        agents: &["architect-reviewer"],
    },
    LabelDef {
        name: "tech-debt",
        category: Category::Scope,
        color: "#95A2B3",
        description: "Shortcut that will cost more later",
        keywords: &["tech debt", "debt", "legacy", "hack", "workaround", "todo", "deprecated"],
        agents: &["refactoring-specialist"],
    },
    LabelDef {
        name: "needs-split",
        category: Category::Scope,
        color: "#F2994A",
        description: "Too large for one issue; break it down",
        keywords: &["epic", "overhaul", "rewrite", "entire", "everything", "all pages", "multiple"],
        agents: &[],
    },
    LabelDef {
        name: "good-first-issue",
        category: Category::Scope,
        color: "#4CB782",
        description: "Small and well-scoped for a new contributor",
        keywords: &["typo", "good first issue", "small", "simple", "minor", "easy"],
        agents: &[],
    },
];

static INDEX: Lazy<HashMap<String, &'static LabelDef>> = Lazy::new(|| {
    LABELS
        .iter()
        .map(|label| (label.name.to_string(), label))
        .collect()
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+").expect("valid regex"));

/// Case-insensitive lookup of an approved label
pub fn lookup(name: &str) -> Option<&'static LabelDef> {
    INDEX.get(name.trim().to_lowercase().as_str()).copied()
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static LabelDef> {
    LABELS.iter().filter(move |l| l.category == category)
}

fn names(labels: &[&LabelDef]) -> String {
    labels.iter().map(|l| l.name).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// Canonical names of approved labels, in input order
    pub valid: Vec<&'static str>,
    pub unknown: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.warnings.is_empty()
    }
}

/// Classify labels against the taxonomy. Unknown labels are reported, never
/// rejected.
pub fn validate<S: AsRef<str>>(labels: &[S]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut known: Vec<&'static LabelDef> = Vec::new();

    for raw in labels {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            continue;
        }
        match lookup(raw) {
            Some(def) if !known.iter().any(|k| k.name == def.name) => {
                known.push(def);
                report.valid.push(def.name);
            }
            Some(_) => {}
            None => report.unknown.push(raw.to_string()),
        }
    }

    let types: Vec<&LabelDef> = known
        .iter()
        .copied()
        .filter(|l| l.category == Category::Type)
        .collect();
    let domains: Vec<&LabelDef> = known
        .iter()
        .copied()
        .filter(|l| l.category == Category::Domain)
        .collect();

    match types.len() {
        0 => report.warnings.push(format!(
            "No type label; add exactly one of: {}",
            names(&by_category(Category::Type).collect::<Vec<_>>())
        )),
        1 => {}
        _ => report
            .warnings
            .push(format!("Multiple type labels: {}", names(&types))),
    }

    if domains.len() > MAX_DOMAIN_LABELS {
        report.warnings.push(format!(
            "More than {MAX_DOMAIN_LABELS} domain labels: {}",
            names(&domains)
        ));
    }

    report
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub label: &'static str,
    pub category: Category,
    pub matched: Vec<&'static str>,
}

// Lowercase words separated by single spaces, padded so " word " matches
fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let words: Vec<&str> = WORD.find_iter(&lower).map(|m| m.as_str()).collect();
    format!(" {} ", words.join(" "))
}

fn matches_for(def: &'static LabelDef, haystack: &str) -> Vec<&'static str> {
    def.keywords
        .iter()
        .copied()
        .filter(|kw| haystack.contains(&normalize(kw)))
        .collect()
}

/// Suggest labels for an issue title or description: the best type label,
/// up to two domain labels, and every matching scope label. Ties keep
/// taxonomy order.
pub fn suggest(text: &str) -> Vec<Suggestion> {
    let haystack = normalize(text);

    let mut scored: Vec<Suggestion> = LABELS
        .iter()
        .filter_map(|def| {
            let matched = matches_for(def, &haystack);
            (!matched.is_empty()).then(|| Suggestion {
                label: def.name,
                category: def.category,
                matched,
            })
        })
        .collect();

    // Stable sort keeps taxonomy order among equal scores
    scored.sort_by(|a, b| b.matched.len().cmp(&a.matched.len()));

    let mut picked = Vec::new();
    picked.extend(
        scored
            .iter()
            .filter(|s| s.category == Category::Type)
            .take(1)
            .cloned(),
    );
    picked.extend(
        scored
            .iter()
            .filter(|s| s.category == Category::Domain)
            .take(MAX_DOMAIN_LABELS)
            .cloned(),
    );
    picked.extend(
        scored
            .iter()
            .filter(|s| s.category == Category::Scope)
            .cloned(),
    );
    picked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentHint {
    pub agent: &'static str,
    /// Labels that recommend this agent
    pub labels: Vec<&'static str>,
}

/// Recommended agents for a label set, first recommendation first.
/// Unknown labels contribute nothing.
pub fn agents_for<S: AsRef<str>>(labels: &[S]) -> Vec<AgentHint> {
    let mut hints: Vec<AgentHint> = Vec::new();

    for def in labels.iter().filter_map(|l| lookup(l.as_ref())) {
        for agent in def.agents {
            match hints.iter_mut().find(|h| h.agent == *agent) {
                Some(hint) => {
                    if !hint.labels.contains(&def.name) {
                        hint.labels.push(def.name);
                    }
                }
                None => hints.push(AgentHint {
                    agent,
                    labels: vec![def.name],
                }),
            }
        }
    }

    hints
}

/// Every label that recommends agents, with its agents
pub fn agent_matrix() -> Vec<(&'static LabelDef, &'static [&'static str])> {
    LABELS
        .iter()
        .filter(|l| !l.agents.is_empty())
        .map(|l| (l, l.agents))
        .collect()
}
