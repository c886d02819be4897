//! Planning and decomposition engine.
//!
//! Requirements text goes in, a [`Plan`] comes out:
//!
//! ```text
//! decompose ──► rules::analyze      ──┐
//!          └──► AiAnalyzer::analyze ──┴─► materialize ──► Plan
//! ```
//!
//! The engine holds no state of its own. Ids, time, the language model, and
//! storage all arrive through the ports in [`crate::ports`].

pub mod ai;
pub mod features;
pub mod materialize;
pub mod model;
pub mod orchestrator;
pub mod rules;
pub mod templates;

pub use ai::AiAnalyzer;
pub use features::{assess_complexity, extract_features};
pub use materialize::{apply_plan_update, apply_task_update, materialize};
pub use model::{
    Analysis, Complexity, DependencyKind, FileAction, FileChange, Plan, PlanMetadata, PlanPatch,
    PlanStatus, Priority, StoryPoints, Task, TaskDependency, TaskDraft, TaskPatch, TaskStatus,
};
pub use orchestrator::{decompose, DecomposeOptions, Decomposition, Method};
pub use rules::Topic;
