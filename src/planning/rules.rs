//! Rule-based decomposition.
//!
//! Detects topics in the requirement text with word-boundary patterns and
//! emits canned task templates for each one. Topics are independent: every
//! match contributes its templates. Text that hits no topic is split into one
//! generic task per sentence instead.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::features::{assess_complexity, extract_features};
use super::model::{
    Analysis, DependencyKind, FileAction, FileChange, Priority, StoryPoints, TaskDependency,
    TaskDraft, TaskStatus,
};

/// Symbolic reference the login UI task uses to point at the auth backend task.
pub const AUTH_BACKEND_REF: &str = "AUTH_BACKEND";

/// Most sentences turned into generic tasks.
const MAX_GENERIC_TASKS: usize = 5;
/// Characters of sentence text kept in a generic task title.
const GENERIC_TITLE_CHARS: usize = 50;
/// Most extracted features used as generic task tags.
const GENERIC_TAG_LIMIT: usize = 3;

/// Advice attached to every rule-based analysis.
pub const STANDARD_SUGGESTIONS: &[&str] = &[
    "Consider breaking down large tasks into smaller, testable units",
    "Add error handling and validation for each component",
    "Include unit tests for critical functionality",
];

/// A requirement theme with its own task templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Accounts, sessions, tokens.
    Authentication,
    /// Storage and schemas.
    Database,
    /// Service endpoints.
    Api,
    /// User-facing screens.
    Ui,
}

// ASCII word boundaries and case folding: a letter like "é" does not glue
// onto a keyword.
static AUTH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\b(?:auth|login|signup|register|password|session|jwt|token)\b")
        .expect("authentication pattern is valid")
});
static DATABASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\b(?:database|db|mongo|postgres|sql|schema|model|collection)\b")
        .expect("database pattern is valid")
});
static API_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\b(?:api|endpoint|rest|graphql|route|controller)\b")
        .expect("api pattern is valid")
});
static UI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\b(?:ui|interface|frontend|component|view|page|form|button)\b")
        .expect("ui pattern is valid")
});
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"));

impl Topic {
    /// Topics in the order their templates are emitted.
    pub const ALL: [Self; 4] = [Self::Authentication, Self::Database, Self::Api, Self::Ui];

    /// Lowercase label for logs and output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Database => "database",
            Self::Api => "api",
            Self::Ui => "ui",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Authentication => &AUTH_PATTERN,
            Self::Database => &DATABASE_PATTERN,
            Self::Api => &API_PATTERN,
            Self::Ui => &UI_PATTERN,
        }
    }

    /// Whether `text` mentions this topic as a whole word.
    #[must_use]
    pub fn matches(self, text: &str) -> bool {
        self.pattern().is_match(text)
    }

    /// The canned tasks this topic contributes.
    #[must_use]
    pub fn templates(self) -> Vec<TaskDraft> {
        match self {
            Self::Authentication => auth_templates(),
            Self::Database => database_templates(),
            Self::Api => api_templates(),
            Self::Ui => ui_templates(),
        }
    }
}

/// Topics mentioned in `text`, in emission order.
#[must_use]
pub fn detect_topics(text: &str) -> Vec<Topic> {
    Topic::ALL.into_iter().filter(|topic| topic.matches(text)).collect()
}

/// Drafts tasks for `requirements` without any external help.
#[must_use]
pub fn generate(requirements: &str) -> Vec<TaskDraft> {
    let topics = detect_topics(requirements);
    debug!(topics = ?topics.iter().map(|t| t.label()).collect::<Vec<_>>(), "detected topics");

    if topics.is_empty() {
        let features = extract_features(requirements);
        return generic_tasks(requirements, &features);
    }
    topics.into_iter().flat_map(Topic::templates).collect()
}

/// Full rule-based analysis: tasks, the standard suggestions, and complexity.
#[must_use]
pub fn analyze(requirements: &str) -> Analysis {
    Analysis {
        tasks: generate(requirements),
        suggestions: STANDARD_SUGGESTIONS.iter().map(|s| (*s).to_string()).collect(),
        complexity: assess_complexity(requirements),
    }
}

/// One task per sentence, for text that matched no topic.
fn generic_tasks(requirements: &str, features: &[&str]) -> Vec<TaskDraft> {
    let tags: Vec<String> =
        features.iter().take(GENERIC_TAG_LIMIT).map(|f| (*f).to_string()).collect();

    SENTENCE_BREAK
        .split(requirements)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .take(MAX_GENERIC_TASKS)
        .zip(1..)
        .map(|(sentence, order)| {
            let head: String = sentence.chars().take(GENERIC_TITLE_CHARS).collect();
            TaskDraft {
                title: format!("Implement: {head}..."),
                description: sentence.to_string(),
                status: TaskStatus::Pending,
                priority: Priority::Medium,
                estimated_complexity: StoryPoints::Three,
                dependencies: Vec::new(),
                file_changes: Vec::new(),
                acceptance_criteria: strings(&[
                    "Feature is implemented",
                    "Code is tested",
                    "Documentation is updated",
                ]),
                tags: tags.clone(),
                order,
            }
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn auth_templates() -> Vec<TaskDraft> {
    vec![
        TaskDraft {
            title: "Set up authentication system".into(),
            description: "Implement user authentication with secure password hashing".into(),
            status: TaskStatus::Pending,
            priority: Priority::High,
            estimated_complexity: StoryPoints::Five,
            dependencies: Vec::new(),
            file_changes: vec![
                FileChange::new(
                    "backend/src/models/User.ts",
                    FileAction::Create,
                    "Create User model with password hashing",
                ),
                FileChange::new(
                    "backend/src/routes/auth.ts",
                    FileAction::Create,
                    "Create authentication routes",
                ),
            ],
            acceptance_criteria: strings(&[
                "Users can register with email and password",
                "Passwords are hashed using bcrypt",
                "JWT tokens are generated on successful login",
                "Protected routes verify JWT tokens",
            ]),
            tags: strings(&["authentication", "security"]),
            order: 1,
        },
        TaskDraft {
            title: "Create login UI component".into(),
            description: "Build user-friendly login form with validation".into(),
            status: TaskStatus::Pending,
            priority: Priority::High,
            estimated_complexity: StoryPoints::Three,
            dependencies: vec![TaskDependency::new(AUTH_BACKEND_REF, DependencyKind::Requires)],
            file_changes: vec![FileChange::new(
                "frontend/src/components/LoginForm.vue",
                FileAction::Create,
                "Create login form component",
            )],
            acceptance_criteria: strings(&[
                "Form validates email format",
                "Shows error messages for invalid credentials",
                "Redirects to dashboard on successful login",
            ]),
            tags: strings(&["ui", "authentication"]),
            order: 2,
        },
    ]
}

fn database_templates() -> Vec<TaskDraft> {
    vec![TaskDraft {
        title: "Design database schema".into(),
        description: "Create database models and relationships".into(),
        status: TaskStatus::Pending,
        priority: Priority::High,
        estimated_complexity: StoryPoints::Five,
        dependencies: Vec::new(),
        file_changes: vec![FileChange::new(
            "backend/src/models/",
            FileAction::Create,
            "Create data models",
        )],
        acceptance_criteria: strings(&[
            "Schema supports all required entities",
            "Proper indexing for performance",
            "Relationships are correctly defined",
        ]),
        tags: strings(&["database", "backend"]),
        order: 1,
    }]
}

fn api_templates() -> Vec<TaskDraft> {
    vec![TaskDraft {
        title: "Implement RESTful API endpoints".into(),
        description: "Create API routes with proper error handling".into(),
        status: TaskStatus::Pending,
        priority: Priority::High,
        estimated_complexity: StoryPoints::Five,
        dependencies: Vec::new(),
        file_changes: vec![FileChange::new(
            "backend/src/routes/",
            FileAction::Create,
            "Create API route handlers",
        )],
        acceptance_criteria: strings(&[
            "All CRUD operations are available",
            "Proper HTTP status codes",
            "Input validation is implemented",
            "Error responses are standardized",
        ]),
        tags: strings(&["api", "backend"]),
        order: 2,
    }]
}

fn ui_templates() -> Vec<TaskDraft> {
    vec![TaskDraft {
        title: "Create UI components".into(),
        description: "Build reusable frontend components".into(),
        status: TaskStatus::Pending,
        priority: Priority::Medium,
        estimated_complexity: StoryPoints::Three,
        dependencies: Vec::new(),
        file_changes: vec![FileChange::new(
            "frontend/src/components/",
            FileAction::Create,
            "Create Vue components",
        )],
        acceptance_criteria: strings(&[
            "Components are responsive",
            "Consistent styling across the app",
            "Proper state management",
        ]),
        tags: strings(&["ui", "frontend"]),
        order: 3,
    }]
}
