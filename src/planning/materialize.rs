//! Turning analyses into plans, and keeping plan metadata in step with edits.
//!
//! - [`materialize`] stamps ids and timestamps onto drafted tasks and builds
//!   the plan with its initial metadata.
//! - [`apply_task_update`] merges a [`TaskPatch`] into one task and recounts
//!   tasks. `estimated_effort` is a creation-time snapshot and is left alone.
//! - [`apply_plan_update`] merges a [`PlanPatch`] without touching metadata
//!   unless the patch supplies it.

use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::ports::{Clock, IdGenerator};

use super::model::{Analysis, Plan, PlanMetadata, PlanPatch, PlanStatus, Task, TaskPatch, TaskStatus};

/// Characters of the requirements kept as the plan description.
pub const DESCRIPTION_CHARS: usize = 200;

/// Builds a plan from an analysis, giving it and every task a fresh identity.
#[must_use]
pub fn materialize(
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
    title: &str,
    requirements: &str,
    analysis: Analysis,
) -> Plan {
    let now = clock.now();
    let complexity = analysis.complexity;
    let estimated_effort = analysis.estimated_effort();

    let tasks: Vec<Task> = analysis
        .tasks
        .into_iter()
        .map(|draft| Task::from_draft(draft, format!("task_{}", ids.generate_id()), now))
        .collect();

    let mut plan = Plan {
        id: format!("plan_{}", ids.generate_id()),
        title: title.to_string(),
        description: requirements.chars().take(DESCRIPTION_CHARS).collect(),
        requirements: requirements.to_string(),
        tasks,
        status: PlanStatus::Draft,
        metadata: PlanMetadata { total_tasks: 0, completed_tasks: 0, estimated_effort, complexity },
        created_at: now,
        updated_at: now,
    };
    recount(&mut plan);

    info!(plan_id = %plan.id, tasks = plan.metadata.total_tasks, estimated_effort, "materialized plan");
    plan
}

/// Merges `patch` into the task `task_id` and refreshes the derived counters.
///
/// # Errors
///
/// Returns [`PlanError::NotFound`] when the plan has no such task; the plan is
/// left untouched in that case.
pub fn apply_task_update(
    plan: &mut Plan,
    task_id: &str,
    patch: TaskPatch,
    clock: &dyn Clock,
) -> Result<()> {
    let task = plan
        .tasks
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or_else(|| PlanError::task_not_found(task_id))?;

    let now = clock.now();
    merge_task(task, patch);
    task.updated_at = now;

    recount(plan);
    plan.updated_at = now;
    debug!(
        plan_id = %plan.id,
        task_id,
        completed = plan.metadata.completed_tasks,
        total = plan.metadata.total_tasks,
        "applied task update"
    );
    Ok(())
}

/// Merges `patch` into the plan and refreshes `updated_at`.
pub fn apply_plan_update(plan: &mut Plan, patch: PlanPatch, clock: &dyn Clock) {
    let PlanPatch { title, description, requirements, status, tasks, metadata } = patch;

    if let Some(title) = title {
        plan.title = title;
    }
    if let Some(description) = description {
        plan.description = description;
    }
    if let Some(requirements) = requirements {
        plan.requirements = requirements;
    }
    if let Some(status) = status {
        plan.status = status;
    }
    if let Some(tasks) = tasks {
        plan.tasks = tasks;
    }
    if let Some(metadata) = metadata {
        plan.metadata = metadata;
    }
    plan.updated_at = clock.now();
}

fn merge_task(task: &mut Task, patch: TaskPatch) {
    let TaskPatch {
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
    } = patch;

    if let Some(title) = title {
        task.title = title;
    }
    if let Some(description) = description {
        task.description = description;
    }
    if let Some(status) = status {
        task.status = status;
    }
    if let Some(priority) = priority {
        task.priority = priority;
    }
    if let Some(points) = estimated_complexity {
        task.estimated_complexity = points;
    }
    if let Some(dependencies) = dependencies {
        task.dependencies = dependencies;
    }
    if let Some(file_changes) = file_changes {
        task.file_changes = file_changes;
    }
    if let Some(criteria) = acceptance_criteria {
        task.acceptance_criteria = criteria;
    }
    if let Some(tags) = tags {
        task.tags = tags;
    }
    if let Some(order) = order {
        task.order = order;
    }
}

fn recount(plan: &mut Plan) {
    plan.metadata.total_tasks = plan.tasks.len();
    plan.metadata.completed_tasks =
        plan.tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::adapters::fixed::{FixedClock, SequentialIdGenerator};
    use crate::planning::model::{Complexity, Priority, StoryPoints};
    use crate::planning::rules;

    const REQUIREMENTS: &str = "Users sign in with a password; admins manage a sql schema.";

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap())
    }

    fn sample_plan(clock: &FixedClock) -> Plan {
        let ids = SequentialIdGenerator::new();
        materialize(&ids, clock, "Accounts", REQUIREMENTS, rules::analyze(REQUIREMENTS))
    }

    #[test]
    fn materialize_assigns_ids_timestamps_and_metadata() {
        let clock = clock();
        let plan = sample_plan(&clock);

        assert_eq!(plan.id, "plan_4");
        assert_eq!(
            plan.tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["task_1", "task_2", "task_3"]
        );
        assert_eq!(plan.status, PlanStatus::Draft);
        assert_eq!(plan.description, REQUIREMENTS);
        assert_eq!(plan.created_at, clock.now());
        assert!(plan.tasks.iter().all(|t| t.created_at == plan.created_at && t.updated_at == plan.created_at));
        assert_eq!(
            plan.metadata,
            PlanMetadata {
                total_tasks: 3,
                completed_tasks: 0,
                estimated_effort: 13,
                complexity: Complexity::Simple,
            }
        );
    }

    #[test]
    fn description_is_first_200_characters() {
        let requirements = "é".repeat(250);
        let plan = materialize(
            &SequentialIdGenerator::new(),
            &clock(),
            "Long",
            &requirements,
            rules::analyze(&requirements),
        );
        assert_eq!(plan.description.chars().count(), DESCRIPTION_CHARS);
        assert_eq!(plan.requirements, requirements);
    }

    #[test]
    fn materialize_twice_differs_only_in_identity() {
        let clock = clock();
        let ids = SequentialIdGenerator::new();
        let first = materialize(&ids, &clock, "T", REQUIREMENTS, rules::analyze(REQUIREMENTS));
        let second = materialize(&ids, &clock, "T", REQUIREMENTS, rules::analyze(REQUIREMENTS));

        assert_ne!(first.id, second.id);
        assert!(first.tasks.iter().zip(&second.tasks).all(|(a, b)| a.id != b.id));
        assert_eq!(
            first.tasks.iter().map(Task::to_draft).collect::<Vec<_>>(),
            second.tasks.iter().map(Task::to_draft).collect::<Vec<_>>()
        );
        assert_eq!(first.metadata, second.metadata);
    }

    #[test]
    fn completing_a_task_updates_counts_and_timestamps() {
        let clock = clock();
        let mut plan = sample_plan(&clock);
        let created = plan.created_at;
        apply_task_update(
            &mut plan,
            "task_2",
            TaskPatch { status: Some(TaskStatus::Completed), ..TaskPatch::default() },
            &clock,
        )
        .unwrap();
        clock.advance(Duration::minutes(5));

        apply_task_update(
            &mut plan,
            "task_1",
            TaskPatch { status: Some(TaskStatus::Completed), ..TaskPatch::default() },
            &clock,
        )
        .unwrap();

        assert_eq!(plan.metadata.completed_tasks, 2);
        assert_eq!(plan.metadata.total_tasks, 3);
        assert_eq!(plan.created_at, created);
        assert_eq!(plan.updated_at, created + Duration::minutes(5));
        assert_eq!(plan.tasks[0].updated_at, created + Duration::minutes(5));
        assert_eq!(plan.tasks[1].updated_at, created);
        assert_eq!(plan.tasks[2].updated_at, created);
    }

    #[test]
    fn completed_count_tracks_any_sequence_of_updates() {
        let clock = clock();
        let mut plan = sample_plan(&clock);
        let sequence = [
            ("task_1", TaskStatus::Completed),
            ("task_2", TaskStatus::InProgress),
            ("task_3", TaskStatus::Completed),
            ("task_1", TaskStatus::Blocked),
            ("task_2", TaskStatus::Completed),
            ("task_3", TaskStatus::Pending),
            ("task_1", TaskStatus::Completed),
        ];

        for (task_id, status) in sequence {
            let patch = TaskPatch { status: Some(status), ..TaskPatch::default() };
            apply_task_update(&mut plan, task_id, patch, &clock).unwrap();
            let expected = plan.tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
            assert_eq!(plan.metadata.completed_tasks, expected);
        }
        assert_eq!(plan.metadata.completed_tasks, 2);
    }

    #[test]
    fn unspecified_fields_are_unchanged_and_effort_is_a_snapshot() {
        let clock = clock();
        let mut plan = sample_plan(&clock);
        let before = plan.task("task_1").unwrap().clone();

        let patch = TaskPatch {
            priority: Some(Priority::Critical),
            estimated_complexity: Some(StoryPoints::Eight),
            acceptance_criteria: Some(vec!["Lockout after 5 failures".into()]),
            ..TaskPatch::default()
        };
        apply_task_update(&mut plan, "task_1", patch, &clock).unwrap();

        let after = plan.task("task_1").unwrap();
        assert_eq!(after.priority, Priority::Critical);
        assert_eq!(after.estimated_complexity, StoryPoints::Eight);
        assert_eq!(after.acceptance_criteria, vec!["Lockout after 5 failures"]);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.file_changes, before.file_changes);
        assert_eq!(after.status, before.status);
        assert_eq!(plan.metadata.estimated_effort, 13);
    }

    #[test]
    fn unknown_task_is_not_found_and_plan_untouched() {
        let clock = clock();
        let mut plan = sample_plan(&clock);
        let original = plan.clone();
        clock.advance(Duration::hours(1));

        let err = apply_task_update(&mut plan, "task_99", TaskPatch::default(), &clock).unwrap_err();

        assert_eq!(err, PlanError::task_not_found("task_99"));
        assert_eq!(plan, original);
    }

    #[test]
    fn plan_update_merges_fields_and_trusts_metadata() {
        let clock = clock();
        let mut plan = sample_plan(&clock);
        clock.advance(Duration::seconds(30));

        let supplied = PlanMetadata {
            total_tasks: 10,
            completed_tasks: 7,
            estimated_effort: 40,
            complexity: Complexity::Complex,
        };
        apply_plan_update(
            &mut plan,
            PlanPatch {
                status: Some(PlanStatus::Active),
                metadata: Some(supplied),
                ..PlanPatch::default()
            },
            &clock,
        );

        assert_eq!(plan.status, PlanStatus::Active);
        assert_eq!(plan.title, "Accounts");
        assert_eq!(plan.metadata, supplied);
        assert_eq!(plan.updated_at, plan.created_at + Duration::seconds(30));
    }

    #[test]
    fn plan_update_without_metadata_does_not_recount() {
        let clock = clock();
        let mut plan = sample_plan(&clock);
        let metadata = plan.metadata;

        apply_plan_update(&mut plan, PlanPatch { tasks: Some(Vec::new()), ..PlanPatch::default() }, &clock);

        assert!(plan.tasks.is_empty());
        assert_eq!(plan.metadata, metadata);
    }
}
