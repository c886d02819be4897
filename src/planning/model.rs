//! Plan and task data model.
//!
//! Field names serialize in camelCase so stored plans and AI responses share
//! one wire shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Implements `as_str`, `Display`, and `FromStr` for a unit-only enum.
macro_rules! labelled_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire label for this variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
                    $($label => Ok(Self::$variant),)+
                    other => {
                        let expected: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        Err(format!(
                            "invalid {}: {other:?} (expected one of {})",
                            stringify!($name),
                            expected.join(", ")
                        ))
                    }
                }
            }
        }
    };
}

/// How one task relates to the task it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// The referenced task cannot start until this one is done.
    Blocks,
    /// Loosely related work.
    RelatesTo,
    /// This task needs the referenced task first.
    Requires,
}

labelled_enum!(DependencyKind {
    Blocks => "blocks",
    RelatesTo => "relates_to",
    Requires => "requires",
});

/// A free-text reference from one task to another.
///
/// `target` is a title or id and is never checked against the plan's tasks:
/// drafts routinely point at work that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDependency {
    /// Title or id of the referenced task.
    #[serde(rename = "taskId")]
    pub target: String,
    /// Relationship to the referenced task.
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

impl TaskDependency {
    /// Builds a dependency on `target` of the given kind.
    pub fn new(target: impl Into<String>, kind: DependencyKind) -> Self {
        Self { target: target.into(), kind }
    }
}

/// What a file change does to its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    /// New file.
    Create,
    /// Edit an existing file.
    Modify,
    /// Remove a file.
    Delete,
}

labelled_enum!(FileAction {
    Create => "create",
    Modify => "modify",
    Delete => "delete",
});

/// A descriptive hint about a file a task will touch. Nothing is written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    /// Path relative to the project root.
    #[serde(rename = "filePath")]
    pub path: String,
    /// Kind of change.
    pub action: FileAction,
    /// What changes and why.
    pub description: String,
    /// Optional example code.
    #[serde(rename = "codeSnippet", default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl FileChange {
    /// Builds a file change without a snippet.
    pub fn new(path: impl Into<String>, action: FileAction, description: impl Into<String>) -> Self {
        Self { path: path.into(), action, description: description.into(), snippet: None }
    }
}

/// Progress state of a task. Any state may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
    /// Waiting on something outside the task.
    Blocked,
}

labelled_enum!(TaskStatus {
    Pending => "pending",
    InProgress => "in_progress",
    Completed => "completed",
    Blocked => "blocked",
});

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Nice to have.
    Low,
    /// Default priority.
    Medium,
    /// Should be done early.
    High,
    /// Everything else waits on it.
    Critical,
}

labelled_enum!(Priority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

/// Relative effort on the 1, 2, 3, 5, 8 point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StoryPoints {
    /// 1 point.
    One,
    /// 2 points.
    Two,
    /// 3 points.
    Three,
    /// 5 points.
    Five,
    /// 8 points.
    Eight,
}

impl StoryPoints {
    /// Numeric value of the estimate.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Five => 5,
            Self::Eight => 8,
        }
    }
}

impl TryFrom<u8> for StoryPoints {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            5 => Ok(Self::Five),
            8 => Ok(Self::Eight),
            other => Err(format!("estimated complexity must be one of 1, 2, 3, 5, 8 (got {other})")),
        }
    }
}

impl From<StoryPoints> for u8 {
    fn from(points: StoryPoints) -> Self {
        points.value()
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for StoryPoints {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.trim().parse().map_err(|e| format!("invalid estimate {s:?}: {e}"))?;
        Self::try_from(value)
    }
}

/// Coarse size of a whole requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Short text touching few features.
    Simple,
    /// Medium text or a handful of features.
    Moderate,
    /// Everything larger.
    Complex,
}

labelled_enum!(Complexity {
    Simple => "simple",
    Moderate => "moderate",
    Complex => "complex",
});

/// Lifecycle state of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Freshly generated, not yet accepted.
    #[default]
    Draft,
    /// Being executed.
    Active,
    /// All work finished.
    Completed,
    /// Kept for reference only.
    Archived,
}

labelled_enum!(PlanStatus {
    Draft => "draft",
    Active => "active",
    Completed => "completed",
    Archived => "archived",
});

/// A task as produced by a decomposition strategy, before it has an id or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Short title.
    pub title: String,
    /// What the task involves.
    pub description: String,
    /// Progress state.
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Effort estimate.
    pub estimated_complexity: StoryPoints,
    /// References to other tasks.
    #[serde(default)]
    pub dependencies: Vec<TaskDependency>,
    /// Files the task is expected to touch.
    #[serde(default)]
    pub file_changes: Vec<FileChange>,
    /// Conditions for calling the task done.
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display order. Not enforced.
    pub order: u32,
}

/// One actionable unit of work within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identity, fixed at materialization.
    pub id: String,
    /// Short title.
    pub title: String,
    /// What the task involves.
    pub description: String,
    /// Progress state.
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Effort estimate.
    pub estimated_complexity: StoryPoints,
    /// References to other tasks.
    #[serde(default)]
    pub dependencies: Vec<TaskDependency>,
    /// Files the task is expected to touch.
    #[serde(default)]
    pub file_changes: Vec<FileChange>,
    /// Conditions for calling the task done.
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display order. Not enforced.
    pub order: u32,
    /// Set once at materialization.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every change to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Gives a draft its identity and timestamps.
    #[must_use]
    pub fn from_draft(draft: TaskDraft, id: String, now: DateTime<Utc>) -> Self {
        let TaskDraft {
            title,
            description,
            status,
            priority,
            estimated_complexity,
            dependencies,
            file_changes,
            acceptance_criteria,
            tags,
            order,
        } = draft;
        Self {
            id,
            title,
            description,
            status,
            priority,
            estimated_complexity,
            dependencies,
            file_changes,
            acceptance_criteria,
            tags,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    /// The task's content without identity or timestamps.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            estimated_complexity: self.estimated_complexity,
            dependencies: self.dependencies.clone(),
            file_changes: self.file_changes.clone(),
            acceptance_criteria: self.acceptance_criteria.clone(),
            tags: self.tags.clone(),
            order: self.order,
        }
    }
}

/// Aggregate counters derived from a plan's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    /// Number of tasks.
    pub total_tasks: usize,
    /// Number of tasks in [`TaskStatus::Completed`].
    pub completed_tasks: usize,
    /// Sum of task estimates when the plan was created.
    pub estimated_effort: u32,
    /// Size label of the requirement text.
    pub complexity: Complexity,
}

impl PlanMetadata {
    /// Completed share of tasks as a whole percentage, 0 for an empty plan.
    ///
    /// Clamped to 100 when hand-edited counters claim more completed tasks
    /// than exist.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        if self.total_tasks == 0 {
            return 0;
        }
        let completed = self.completed_tasks.min(self.total_tasks) as u128;
        let percent = completed * 100 / self.total_tasks as u128;
        u32::try_from(percent).unwrap_or(100)
    }
}

/// Requirements text plus its decomposed task list and aggregate metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Identity, fixed at materialization.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Short summary; the first 200 characters of the requirements at creation.
    pub description: String,
    /// Original requirement text.
    pub requirements: String,
    /// Tasks in display order.
    pub tasks: Vec<Task>,
    /// Lifecycle state.
    pub status: PlanStatus,
    /// Derived counters.
    pub metadata: PlanMetadata,
    /// Set once at materialization.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every change to the plan or one of its tasks.
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

/// Output of a decomposition strategy: task drafts plus advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Drafted tasks, in the order the strategy produced them.
    pub tasks: Vec<TaskDraft>,
    /// Improvement suggestions for the requirement as a whole.
    pub suggestions: Vec<String>,
    /// Size label of the requirement text.
    pub complexity: Complexity,
}

impl Analysis {
    /// Sum of the drafted tasks' estimates.
    #[must_use]
    pub fn estimated_effort(&self) -> u32 {
        self.tasks.iter().map(|t| u32::from(t.estimated_complexity.value())).sum()
    }
}

/// Partial update for a task. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New estimate. Does not change the plan's `estimated_effort`.
    pub estimated_complexity: Option<StoryPoints>,
    /// Replacement dependency list.
    pub dependencies: Option<Vec<TaskDependency>>,
    /// Replacement file-change list.
    pub file_changes: Option<Vec<FileChange>>,
    /// Replacement acceptance criteria.
    pub acceptance_criteria: Option<Vec<String>>,
    /// Replacement tags.
    pub tags: Option<Vec<String>>,
    /// New display order.
    pub order: Option<u32>,
}

impl TaskPatch {
    /// Whether the patch sets no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update for a plan. `None` leaves the field unchanged.
///
/// Supplied `metadata` replaces the stored counters verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New requirements text.
    pub requirements: Option<String>,
    /// New lifecycle state.
    pub status: Option<PlanStatus>,
    /// Replacement task list.
    pub tasks: Option<Vec<Task>>,
    /// Replacement metadata.
    pub metadata: Option<PlanMetadata>,
}

impl PlanPatch {
    /// Whether the patch sets no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
