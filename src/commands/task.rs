//! Task-level commands: `update-task` and `suggest`.

use crate::context::ServiceContext;
use crate::planning::{Priority, StoryPoints, TaskPatch, TaskStatus};
use crate::service::PlanService;

/// Builds a patch from CLI flags; an empty criteria list leaves criteria alone.
#[must_use]
pub fn patch_from_args(
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    points: Option<StoryPoints>,
    description: Option<String>,
    criteria: &[String],
) -> TaskPatch {
    TaskPatch {
        status,
        priority,
        estimated_complexity: points,
        description,
        acceptance_criteria: (!criteria.is_empty()).then(|| criteria.to_vec()),
        ..TaskPatch::default()
    }
}

/// Execute the `update-task` command.
///
/// # Errors
///
/// Returns an error string when nothing would change or an id is unknown.
pub fn update(
    ctx: &ServiceContext,
    plan_id: &str,
    task_id: &str,
    patch: TaskPatch,
) -> Result<(), String> {
    if patch.is_empty() {
        return Err(
            "Nothing to update: pass --status, --priority, --points, --description, or --criterion"
                .to_string(),
        );
    }
    let plan =
        PlanService::new(ctx).update_task(plan_id, task_id, patch).map_err(|e| e.to_string())?;
    println!(
        "Updated task {task_id}. Plan {} is {}/{} complete ({}%).",
        plan.id,
        plan.metadata.completed_tasks,
        plan.metadata.total_tasks,
        plan.metadata.progress_percent()
    );
    Ok(())
}

/// Execute the `suggest` command.
///
/// # Errors
///
/// Returns an error string for unknown ids, a blank path, or an AI failure.
pub async fn suggest(
    ctx: &ServiceContext,
    plan_id: &str,
    task_id: &str,
    file_path: &str,
) -> Result<(), String> {
    let code = PlanService::new(ctx)
        .suggest_code(plan_id, task_id, file_path)
        .await
        .map_err(|e| e.to_string())?;
    println!("{code}");
    Ok(())
}
